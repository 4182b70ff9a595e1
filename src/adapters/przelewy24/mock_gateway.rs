//! Mock payment gateway for testing.
//!
//! Provides a configurable implementation of `PaymentGateway` for unit and
//! integration tests. Supports:
//! - Live/sandbox mode and a custom address allow-list
//! - Error injection per operation
//! - Call tracking, including the signed fields sent to `verify`

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::foundation::{PayloadDefaults, Przelewy24Error, Signable};
use crate::domain::payment::{
    GatewayResponse, Mode, TestConnection, Transaction, TransactionConfirmation,
};
use crate::ports::PaymentGateway;

/// CRC the mock signs with.
pub const MOCK_CRC: &str = "mock-crc";

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::live().with_allowed_address("10.0.0.1".parse()?);
/// mock.fail_on("verify", Przelewy24Error::gateway_rejected("Invalid signature"));
///
/// let result = mock.verify(&confirmation).await;
/// assert_eq!(mock.calls_to("verify"), 1);
/// ```
#[derive(Clone)]
pub struct MockPaymentGateway {
    mode: Mode,
    defaults: PayloadDefaults,
    allowed: Vec<IpAddr>,
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Errors returned by the named operation.
    method_errors: HashMap<&'static str, Przelewy24Error>,

    /// Token handed out by `register`.
    token: Option<String>,

    /// Track method calls for assertions.
    call_log: Vec<GatewayCall>,
}

/// Recorded call with the signed form fields the real client would send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayCall {
    pub method: &'static str,
    pub fields: Vec<(String, String)>,
}

impl GatewayCall {
    /// Value of a recorded field.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl MockPaymentGateway {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            defaults: PayloadDefaults::new(1, 1),
            allowed: Vec::new(),
            inner: Arc::new(Mutex::new(MockState::default())),
        }
    }

    pub fn sandbox() -> Self {
        Self::new(Mode::Sandbox)
    }

    pub fn live() -> Self {
        Self::new(Mode::Live)
    }

    /// Merchant ids used for the connection test payload.
    pub fn with_defaults(mut self, defaults: PayloadDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_allowed_address(mut self, address: IpAddr) -> Self {
        self.allowed.push(address);
        self
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Make the named operation fail with the given error.
    pub fn fail_on(&self, method: &'static str, error: Przelewy24Error) {
        self.state().method_errors.insert(method, error);
    }

    /// Token returned in the `register` reply.
    pub fn set_token(&self, token: impl Into<String>) {
        self.state().token = Some(token.into());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertions
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state().call_log.clone()
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    /// Most recent `verify` call.
    pub fn last_verification(&self) -> Option<GatewayCall> {
        self.state()
            .call_log
            .iter()
            .rev()
            .find(|call| call.method == "verify")
            .cloned()
    }

    fn record<P: Signable>(
        &self,
        method: &'static str,
        payload: &P,
    ) -> Result<GatewayResponse, Przelewy24Error> {
        let mut state = self.state();
        state.call_log.push(GatewayCall {
            method,
            fields: payload.signed_attributes(MOCK_CRC),
        });

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        let mut reply = HashMap::from([("error".to_string(), "0".to_string())]);
        if method == "register" {
            let token = state.token.clone().unwrap_or_else(|| "MOCK-TOKEN".to_string());
            reply.insert("token".to_string(), token);
        }
        Ok(GatewayResponse::new(reply))
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::sandbox()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn is_allowed_address(&self, address: IpAddr) -> bool {
        self.allowed.contains(&address)
    }

    fn signature_matches(&self, confirmation: &TransactionConfirmation, provided: &str) -> bool {
        confirmation.signature_matches(MOCK_CRC, provided)
    }

    async fn test_connection(&self) -> Result<GatewayResponse, Przelewy24Error> {
        let payload = TestConnection::new(&self.defaults);
        self.test_connection_with(&payload).await
    }

    async fn test_connection_with(
        &self,
        payload: &TestConnection,
    ) -> Result<GatewayResponse, Przelewy24Error> {
        self.record("test_connection", payload)
    }

    async fn register(&self, transaction: &Transaction) -> Result<GatewayResponse, Przelewy24Error> {
        self.record("register", transaction)
    }

    async fn verify(
        &self,
        confirmation: &TransactionConfirmation,
    ) -> Result<GatewayResponse, Przelewy24Error> {
        self.record("verify", confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmation() -> TransactionConfirmation {
        let mut confirmation = TransactionConfirmation::new(&PayloadDefaults::new(1, 1));
        confirmation.set_session_id("s1").set_order_id(9);
        confirmation
    }

    #[tokio::test]
    async fn records_verify_fields() {
        let mock = MockPaymentGateway::sandbox();
        mock.verify(&confirmation()).await.unwrap();

        let call = mock.last_verification().unwrap();
        assert_eq!(call.field("p24_session_id"), Some("s1"));
        assert_eq!(call.field("p24_order_id"), Some("9"));
        assert!(call.field("p24_sign").is_some());
    }

    #[tokio::test]
    async fn injected_error_is_returned() {
        let mock = MockPaymentGateway::sandbox();
        mock.fail_on("verify", Przelewy24Error::gateway_rejected("Invalid signature"));

        let result = mock.verify(&confirmation()).await;

        assert_eq!(result, Err(Przelewy24Error::gateway_rejected("Invalid signature")));
        assert_eq!(mock.calls_to("verify"), 1);
    }

    #[tokio::test]
    async fn register_returns_token() {
        let mock = MockPaymentGateway::sandbox();
        mock.set_token("T-1");

        let response = mock.register(&Transaction::new(&PayloadDefaults::new(1, 1))).await.unwrap();
        assert_eq!(response.token(), Some("T-1"));
    }

    #[test]
    fn allow_list_is_explicit() {
        let address: IpAddr = "10.0.0.1".parse().unwrap();
        let mock = MockPaymentGateway::live().with_allowed_address(address);

        assert!(mock.is_allowed_address(address));
        assert!(!mock.is_allowed_address("10.0.0.2".parse().unwrap()));
        assert!(!mock.is_sandbox());
    }
}
