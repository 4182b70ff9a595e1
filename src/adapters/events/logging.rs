//! Publisher that writes transaction signals to the tracing log.

use async_trait::async_trait;

use crate::domain::payment::{TransactionEvent, TransactionEventKind};
use crate::ports::{EventPublishError, TransactionEventPublisher};

/// Logs each event; never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransactionEventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: TransactionEvent) -> Result<(), EventPublishError> {
        let n = &event.notification;
        match event.kind {
            TransactionEventKind::Received => tracing::info!(
                event_id = %event.event_id,
                event_type = event.event_type(),
                session_id = %n.session_id,
                amount = ?n.amount,
                currency = %n.currency,
                "Transaction notification received"
            ),
            TransactionEventKind::Verified => tracing::info!(
                event_id = %event.event_id,
                event_type = event.event_type(),
                session_id = %n.session_id,
                order_id = ?n.order_id,
                "Transaction verified"
            ),
        }
        Ok(())
    }
}
