//! Payment domain module.
//!
//! Gateway payloads, the decoded gateway reply and notification signals.
//!
//! # Module Structure
//!
//! - `constants` - Endpoint modes, wire enums and protocol constants
//! - `test_connection` - Connection test payload
//! - `transaction` - Transaction registration payload
//! - `item` - Transaction line items
//! - `confirmation` - Transaction verification payload
//! - `response` - Form-encoded gateway reply
//! - `events` - Received/verified notification signals

mod confirmation;
mod constants;
mod events;
mod item;
mod response;
mod test_connection;
mod transaction;

pub use confirmation::TransactionConfirmation;
pub use constants::{
    Channel, Currency, Encoding, Language, Mode, TransactionStatus, API_VERSION,
    TIME_LIMIT_UNLIMITED,
};
pub use events::{TransactionEvent, TransactionEventKind, TransactionNotification};
pub use item::Item;
pub use response::GatewayResponse;
pub use test_connection::TestConnection;
pub use transaction::Transaction;
