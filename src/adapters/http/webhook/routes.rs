//! Axum router configuration for the notification webhook.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{handle_transaction_notification, health_check, WebhookAppState};

/// Path the gateway posts notifications to, relative to the application URL.
pub const WEBHOOK_PATH: &str = "/webhook/przelewy24";

/// Create the webhook router.
///
/// # Routes
/// - `POST /przelewy24` - Handle a transaction notification
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/przelewy24", post(handle_transaction_notification))
}

/// Create the complete application router.
///
/// The webhook is mounted at `/webhook` only when `mount_webhook` is set;
/// `GET /health` is always available.
///
/// # Example
///
/// ```ignore
/// let app = app_router(state, config.gateway.routes_enabled());
/// axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
/// ```
pub fn app_router(state: WebhookAppState, mount_webhook: bool) -> Router {
    let mut router = Router::new().route("/health", get(health_check));
    if mount_webhook {
        router = router.nest("/webhook", webhook_routes());
    }
    router.layer(TraceLayer::new_for_http()).with_state(state)
}
