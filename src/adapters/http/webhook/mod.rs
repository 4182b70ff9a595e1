//! Przelewy24 notification webhook HTTP adapter.
//!
//! - `routes` - Router wiring for the webhook and health endpoints
//! - `handlers` - Axum handlers, error mapping and the redirect helper
//! - `request` - Notification form decoding and validation
//! - `client_ip` - Source address resolution

mod client_ip;
mod handlers;
mod request;
mod routes;

pub use client_ip::client_ip;
pub use handlers::{
    found, handle_transaction_notification, health_check, ErrorResponse, WebhookApiError,
    WebhookAppState,
};
pub use request::{parse_form, validate_notification, FieldError, NUMERIC_FIELDS, REQUIRED_FIELDS};
pub use routes::{app_router, webhook_routes, WEBHOOK_PATH};
