//! HTTP adapters - Axum endpoints.

pub mod webhook;

// Re-export key types for convenience
pub use webhook::{app_router, found, webhook_routes, WebhookAppState, WEBHOOK_PATH};
