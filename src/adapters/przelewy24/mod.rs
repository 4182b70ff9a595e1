//! Przelewy24 gateway adapters.
//!
//! - `Przelewy24Client` - Signed form-encoded gateway protocol (`PaymentGateway`)
//! - `Przelewy24ApiClient` - Read-oriented REST API with basic auth
//! - `MockPaymentGateway` - Configurable test double

mod api_client;
mod gateway_client;
mod mock_gateway;

pub use api_client::{ApiTransaction, Przelewy24ApiClient, Przelewy24ApiConfig};
pub use gateway_client::{
    allowed_addresses, Przelewy24Client, Przelewy24ClientConfig, RedirectTarget, DEFAULT_TIMEOUT,
};
pub use mock_gateway::{GatewayCall, MockPaymentGateway, MOCK_CRC};

use crate::domain::foundation::Przelewy24Error;

/// Map an HTTP client failure (connect, timeout, body read) to `Transport`.
pub(crate) fn transport_error(err: reqwest::Error) -> Przelewy24Error {
    Przelewy24Error::transport(err.to_string())
}
