//! TransactionEventPublisher port - Interface for notification signals.
//!
//! Signals are fire-and-forget: a failed publish is logged by the caller and never
//! changes the outcome of notification handling.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::payment::TransactionEvent;

/// Failure reported by a publisher adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to publish transaction event: {0}")]
pub struct EventPublishError(pub String);

impl EventPublishError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Port for publishing "received" and "verified" transaction signals.
#[async_trait]
pub trait TransactionEventPublisher: Send + Sync {
    async fn publish(&self, event: TransactionEvent) -> Result<(), EventPublishError>;
}
