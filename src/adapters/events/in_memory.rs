//! In-memory transaction event publisher for testing.
//!
//! Captures every published event for assertions.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock operations
//! which will panic if locks are poisoned.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::payment::{TransactionEvent, TransactionEventKind};
use crate::ports::{EventPublishError, TransactionEventPublisher};

/// Capturing publisher for tests.
///
/// # Example
///
/// ```ignore
/// let publisher = Arc::new(InMemoryEventPublisher::new());
///
/// handler.handle(cmd).await?;
///
/// assert_eq!(publisher.event_count(), 2);
/// assert!(publisher.has_event("przelewy24.transaction.verified.v1"));
/// ```
#[derive(Default)]
pub struct InMemoryEventPublisher {
    published: RwLock<Vec<TransactionEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Returns all published events in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn published_events(&self) -> Vec<TransactionEvent> {
        self.published
            .read()
            .expect("InMemoryEventPublisher: published lock poisoned")
            .clone()
    }

    /// Kinds of the published events, in order.
    pub fn kinds(&self) -> Vec<TransactionEventKind> {
        self.published_events().iter().map(|e| e.kind).collect()
    }

    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventPublisher: published lock poisoned")
            .len()
    }

    /// Checks if an event with the given routing key was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .expect("InMemoryEventPublisher: published lock poisoned")
            .iter()
            .any(|e| e.event_type() == event_type)
    }

    /// Clears all published events (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventPublisher: published write lock poisoned")
            .clear();
    }
}

#[async_trait]
impl TransactionEventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: TransactionEvent) -> Result<(), EventPublishError> {
        self.published
            .write()
            .map_err(|_| EventPublishError::new("published lock poisoned"))?
            .push(event);
        Ok(())
    }
}
