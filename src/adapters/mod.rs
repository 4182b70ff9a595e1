//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the core to external systems:
//! - `przelewy24` - Gateway and REST API clients
//! - `events` - Transaction event publishers (in-memory, logging, broadcast)
//! - `http` - Notification webhook endpoint

pub mod events;
pub mod http;
pub mod przelewy24;

pub use events::{BroadcastEventPublisher, InMemoryEventPublisher, LoggingEventPublisher};
pub use przelewy24::{
    MockPaymentGateway, Przelewy24ApiClient, Przelewy24ApiConfig, Przelewy24Client,
    Przelewy24ClientConfig,
};
