//! Error types shared by the payload models, the gateway clients and the webhook layer.

use thiserror::Error;

/// Every failure the integration layer can report.
///
/// Attribute errors are programming-contract violations and should not be caught.
/// Transport and protocol errors propagate to the caller untouched; this layer never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Przelewy24Error {
    /// Field name is not in the payload's whitelist.
    #[error("Attribute {0} is not supported for this instance")]
    UnsupportedAttribute(String),

    /// Network or HTTP-layer failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Well-formed gateway response signalling a business-level rejection.
    #[error("Gateway rejected request: {0}")]
    GatewayRejected(String),

    /// REST API failure with the HTTP status code and its mapped message.
    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    /// Webhook source is not an authorized gateway server.
    #[error("Forbidden")]
    Forbidden,
}

impl Przelewy24Error {
    pub fn unsupported_attribute(name: impl Into<String>) -> Self {
        Przelewy24Error::UnsupportedAttribute(name.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Przelewy24Error::Transport(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Przelewy24Error::Protocol(message.into())
    }

    pub fn gateway_rejected(message: impl Into<String>) -> Self {
        Przelewy24Error::GatewayRejected(message.into())
    }

    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Przelewy24Error::Api {
            code,
            message: message.into(),
        }
    }

    /// Check if the caller could reasonably retry the operation.
    ///
    /// Advisory only; nothing in this crate acts on it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Przelewy24Error::Transport(_))
    }
}
