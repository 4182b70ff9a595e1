//! Broadcast-channel publisher for in-process subscribers.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::payment::TransactionEvent;
use crate::ports::{EventPublishError, TransactionEventPublisher};

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 256;

/// Fans events out to any number of in-process receivers.
///
/// Publishing with no live receiver is not an error; the event is dropped.
#[derive(Debug, Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<TransactionEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// New receiver seeing events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<TransactionEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl TransactionEventPublisher for BroadcastEventPublisher {
    async fn publish(&self, event: TransactionEvent) -> Result<(), EventPublishError> {
        if self.sender.send(event).is_err() {
            tracing::debug!("No subscribers for transaction event");
        }
        Ok(())
    }
}
