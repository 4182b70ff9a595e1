//! Application handlers.
//!
//! Command handlers that orchestrate the gateway and event ports.

mod handle_transaction_notification;

pub use handle_transaction_notification::{
    HandleTransactionNotificationCommand, HandleTransactionNotificationHandler,
    HandleTransactionNotificationResult,
};
