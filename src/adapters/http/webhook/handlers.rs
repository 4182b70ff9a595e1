//! HTTP handlers for gateway notifications.
//!
//! The handler resolves the source address, authorizes it, validates the form and
//! delegates to `HandleTransactionNotificationHandler`. It replies with plain text `OK` unless
//! processing aborts.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::handlers::{
    HandleTransactionNotificationCommand, HandleTransactionNotificationHandler,
};
use crate::domain::foundation::Przelewy24Error;

use super::client_ip::client_ip;
use super::request::{parse_form, validate_notification, FieldError};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for webhook handlers.
#[derive(Clone)]
pub struct WebhookAppState {
    pub notification_handler: Arc<HandleTransactionNotificationHandler>,
    /// Read the source address from proxy headers.
    pub trust_forwarded_headers: bool,
}

impl WebhookAppState {
    pub fn new(notification_handler: Arc<HandleTransactionNotificationHandler>) -> Self {
        Self {
            notification_handler,
            trust_forwarded_headers: false,
        }
    }

    pub fn with_trusted_forwarded_headers(mut self, trust: bool) -> Self {
        self.trust_forwarded_headers = trust;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /webhook/przelewy24 - Handle a transaction notification
pub async fn handle_transaction_notification(
    State(state): State<WebhookAppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let source_ip = client_ip(&headers, connect_info.as_ref(), state.trust_forwarded_headers);

    // Unauthorized sources get 403 before the body is inspected
    state.notification_handler.authorize(source_ip)?;

    let fields = parse_form(&body).map_err(WebhookApiError::Validation)?;
    validate_notification(&fields).map_err(WebhookApiError::Validation)?;

    let cmd = HandleTransactionNotificationCommand { source_ip, fields };

    state.notification_handler.handle(cmd).await?;

    Ok((StatusCode::OK, "OK"))
}

/// GET /health - Liveness check
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `302 Found` redirect, used to send the customer to the gateway after registration.
pub fn found(url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Redirect URL is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Error body for failed notifications.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// API error type that converts notification failures to HTTP responses.
#[derive(Debug)]
pub enum WebhookApiError {
    Validation(Vec<FieldError>),
    Notification(Przelewy24Error),
}

impl From<Przelewy24Error> for WebhookApiError {
    fn from(err: Przelewy24Error) -> Self {
        Self::Notification(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        match self {
            WebhookApiError::Validation(fields) => {
                let body = ErrorResponse {
                    error_code: "VALIDATION_FAILED".to_string(),
                    message: "Notification is missing or has malformed fields".to_string(),
                    fields: Some(fields),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            WebhookApiError::Notification(Przelewy24Error::Forbidden) => {
                (StatusCode::FORBIDDEN, "Forbidden").into_response()
            }
            WebhookApiError::Notification(err) => {
                tracing::error!(error = %err, "Transaction notification failed");
                let body = ErrorResponse {
                    error_code: "NOTIFICATION_FAILED".to_string(),
                    message: err.to_string(),
                    fields: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
