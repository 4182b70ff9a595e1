//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the notification handling core and the outside world. Adapters implement these ports.
//!
//! - `PaymentGateway` - Signed request/verify exchange with the payment gateway
//! - `TransactionEventPublisher` - Fire-and-forget notification signals

mod event_publisher;
mod payment_gateway;

pub use event_publisher::{EventPublishError, TransactionEventPublisher};
pub use payment_gateway::PaymentGateway;
