//! Transaction event publishers.
//!
//! Adapters implement the `TransactionEventPublisher` port for different environments:
//!
//! - `InMemoryEventPublisher` - Capturing publisher for tests
//! - `LoggingEventPublisher` - Writes signals to the tracing log
//! - `BroadcastEventPublisher` - Fans signals out over a tokio broadcast channel

mod broadcast;
mod in_memory;
mod logging;

pub use broadcast::{BroadcastEventPublisher, DEFAULT_CAPACITY};
pub use in_memory::InMemoryEventPublisher;
pub use logging::LoggingEventPublisher;
