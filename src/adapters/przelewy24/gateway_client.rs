//! Form-encoded Przelewy24 gateway client.
//!
//! Implements the `PaymentGateway` port: signs payloads with the merchant CRC, posts them to
//! the endpoint selected by the configured mode and decodes the form-encoded reply.
//!
//! # Protocol
//!
//! - `testConnection` precedes every registration and verification
//! - A reply with `error > 0` is a business rejection, not a transport failure
//! - One attempt per call; no retries
//!
//! # Configuration
//!
//! ```ignore
//! let config = Przelewy24ClientConfig::new(Mode::Sandbox, crc, defaults);
//! let client = Przelewy24Client::new(config)?;
//! ```

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{PayloadDefaults, Przelewy24Error, Signable};
use crate::domain::payment::{
    GatewayResponse, Mode, TestConnection, Transaction, TransactionConfirmation,
};
use crate::ports::PaymentGateway;

use super::transport_error;

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Servers allowed to deliver transaction notifications.
static ALLOWED_ADDRESSES: Lazy<Vec<IpAddr>> = Lazy::new(|| {
    let first = (181..=185).map(|octet| IpAddr::V4(Ipv4Addr::new(91, 216, 191, octet)));
    let second = (144..=159).map(|octet| IpAddr::V4(Ipv4Addr::new(92, 43, 119, octet)));
    first.chain(second).collect()
});

/// Addresses the gateway sends notifications from.
pub fn allowed_addresses() -> &'static [IpAddr] {
    &ALLOWED_ADDRESSES
}

/// Gateway client configuration.
#[derive(Clone)]
pub struct Przelewy24ClientConfig {
    mode: Mode,

    /// Shared signing secret.
    crc: SecretString,

    /// Merchant ids and URLs for payloads the client builds itself.
    defaults: PayloadDefaults,

    /// Endpoint override (for testing).
    base_url: Option<String>,

    timeout: Duration,
}

impl Przelewy24ClientConfig {
    pub fn new(mode: Mode, crc: impl Into<String>, defaults: PayloadDefaults) -> Self {
        Self {
            mode,
            crc: SecretString::new(crc.into()),
            defaults,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom endpoint URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn defaults(&self) -> &PayloadDefaults {
        &self.defaults
    }
}

impl fmt::Debug for Przelewy24ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Przelewy24ClientConfig")
            .field("mode", &self.mode)
            .field("crc", &"[REDACTED]")
            .field("defaults", &self.defaults)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// What a redirect URL is built from.
#[derive(Debug, Clone, Copy)]
pub enum RedirectTarget<'a> {
    /// Token from an earlier registration.
    Token(&'a str),
    /// Registration reply carrying the token.
    Response(&'a GatewayResponse),
    /// Transaction not registered yet; registered before redirecting.
    Transaction(&'a Transaction),
}

/// Przelewy24 form-encoded gateway client.
pub struct Przelewy24Client {
    config: Przelewy24ClientConfig,
    http_client: reqwest::Client,
}

impl Przelewy24Client {
    /// Create a client; fails only when the HTTP client cannot be built.
    pub fn new(config: Przelewy24ClientConfig) -> Result<Self, Przelewy24Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &Przelewy24ClientConfig {
        &self.config
    }

    /// Scheme and host requests are sent to.
    pub fn endpoint_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.config.mode.endpoint_url())
    }

    /// Full URL for an endpoint path, with exactly one slash between host and path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// True when the reply reports a rejection.
    pub fn response_is_error(&self, response: &GatewayResponse) -> bool {
        response.is_error()
    }

    /// Sign a payload, post it and decode the reply.
    ///
    /// A non-success HTTP status is a `Transport` error; a well-formed reply with
    /// `error > 0` becomes `GatewayRejected`.
    pub async fn request<P>(&self, path: &str, payload: &P) -> Result<GatewayResponse, Przelewy24Error>
    where
        P: Signable + Sync,
    {
        let url = self.url(path);
        let form = payload.signed_attributes(self.config.crc.expose_secret());

        tracing::debug!(url = %url, path = path, fields = form.len(), "Sending gateway request");

        let response = self
            .http_client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path = path, status = status.as_u16(), "Gateway request failed");
            return Err(Przelewy24Error::transport(format!(
                "Gateway returned HTTP {} for {}",
                status.as_u16(),
                path
            )));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        let response = GatewayResponse::parse(&body)?;

        if self.response_is_error(&response) {
            tracing::warn!(
                path = path,
                error_code = response.error_code(),
                message = response.error_message(),
                "Gateway rejected request"
            );
            return Err(Przelewy24Error::gateway_rejected(response.error_message()));
        }

        Ok(response)
    }

    /// Redirect URL for a registered transaction: `{endpoint}/trnRequest/{token}`.
    pub async fn redirect_target(
        &self,
        target: RedirectTarget<'_>,
    ) -> Result<String, Przelewy24Error> {
        let token = match target {
            RedirectTarget::Token(token) => token.to_string(),
            RedirectTarget::Response(response) => Self::token_of(response)?,
            RedirectTarget::Transaction(transaction) => {
                let response = self.register(transaction).await?;
                Self::token_of(&response)?
            }
        };

        Ok(self.url(&format!("trnRequest/{}", token)))
    }

    fn token_of(response: &GatewayResponse) -> Result<String, Przelewy24Error> {
        response
            .token()
            .map(str::to_string)
            .ok_or_else(|| Przelewy24Error::protocol("Response does not carry a token"))
    }
}

#[async_trait]
impl PaymentGateway for Przelewy24Client {
    fn mode(&self) -> Mode {
        self.config.mode
    }

    fn is_allowed_address(&self, address: IpAddr) -> bool {
        let address = match address {
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(address),
            v4 => v4,
        };
        allowed_addresses().contains(&address)
    }

    fn signature_matches(&self, confirmation: &TransactionConfirmation, provided: &str) -> bool {
        confirmation.signature_matches(self.config.crc.expose_secret(), provided)
    }

    async fn test_connection(&self) -> Result<GatewayResponse, Przelewy24Error> {
        let payload = TestConnection::new(&self.config.defaults);
        self.test_connection_with(&payload).await
    }

    async fn test_connection_with(
        &self,
        payload: &TestConnection,
    ) -> Result<GatewayResponse, Przelewy24Error> {
        self.request("testConnection", payload).await
    }

    async fn register(&self, transaction: &Transaction) -> Result<GatewayResponse, Przelewy24Error> {
        self.test_connection().await?;
        let response = self.request("trnRegister", transaction).await?;

        tracing::info!(
            session_id = ?transaction.session_id().map(ToString::to_string),
            "Transaction registered"
        );

        Ok(response)
    }

    async fn verify(
        &self,
        confirmation: &TransactionConfirmation,
    ) -> Result<GatewayResponse, Przelewy24Error> {
        self.test_connection().await?;
        self.request("trnVerify", confirmation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(mode: Mode) -> Przelewy24Client {
        let config = Przelewy24ClientConfig::new(mode, "crc", PayloadDefaults::new(1000, 1000));
        Przelewy24Client::new(config).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // URL Construction Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn endpoint_follows_mode() {
        assert_eq!(client(Mode::Sandbox).endpoint_url(), "https://sandbox.przelewy24.pl");
        assert_eq!(client(Mode::Live).endpoint_url(), "https://secure.przelewy24.pl");
    }

    #[test]
    fn url_enforces_single_leading_slash() {
        let client = client(Mode::Sandbox);

        assert_eq!(client.url("trnRegister"), "https://sandbox.przelewy24.pl/trnRegister");
        assert_eq!(client.url("/trnRegister"), "https://sandbox.przelewy24.pl/trnRegister");
        assert_eq!(client.url("//trnRegister"), "https://sandbox.przelewy24.pl/trnRegister");
    }

    #[test]
    fn url_handles_base_url_with_trailing_slash() {
        let config = Przelewy24ClientConfig::new(Mode::Sandbox, "crc", PayloadDefaults::new(1, 1))
            .with_base_url("http://localhost:9999/");
        let client = Przelewy24Client::new(config).unwrap();

        assert_eq!(client.url("/testConnection"), "http://localhost:9999/testConnection");
    }

    #[tokio::test]
    async fn redirect_target_from_token() {
        let url = client(Mode::Live)
            .redirect_target(RedirectTarget::Token("ABC-123"))
            .await
            .unwrap();

        assert_eq!(url, "https://secure.przelewy24.pl/trnRequest/ABC-123");
    }

    #[tokio::test]
    async fn redirect_target_from_response() {
        let response = GatewayResponse::parse(b"error=0&token=T1").unwrap();
        let url = client(Mode::Sandbox)
            .redirect_target(RedirectTarget::Response(&response))
            .await
            .unwrap();

        assert_eq!(url, "https://sandbox.przelewy24.pl/trnRequest/T1");
    }

    #[tokio::test]
    async fn redirect_target_without_token_is_protocol_error() {
        let response = GatewayResponse::parse(b"error=0").unwrap();
        let result = client(Mode::Sandbox)
            .redirect_target(RedirectTarget::Response(&response))
            .await;

        assert!(matches!(result, Err(Przelewy24Error::Protocol(_))));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Source Address Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn allowed_list_covers_both_ranges() {
        assert_eq!(allowed_addresses().len(), 21);

        let client = client(Mode::Live);
        assert!(client.is_allowed_address("91.216.191.181".parse().unwrap()));
        assert!(client.is_allowed_address("91.216.191.185".parse().unwrap()));
        assert!(client.is_allowed_address("92.43.119.144".parse().unwrap()));
        assert!(client.is_allowed_address("92.43.119.159".parse().unwrap()));
    }

    #[test]
    fn addresses_outside_ranges_are_rejected() {
        let client = client(Mode::Live);

        assert!(!client.is_allowed_address("91.216.191.186".parse().unwrap()));
        assert!(!client.is_allowed_address("92.43.119.160".parse().unwrap()));
        assert!(!client.is_allowed_address("127.0.0.1".parse().unwrap()));
    }

    #[test]
    fn ipv4_mapped_ipv6_addresses_are_recognized() {
        let client = client(Mode::Live);
        assert!(client.is_allowed_address("::ffff:91.216.191.183".parse().unwrap()));
    }

    #[test]
    fn sandbox_flag_follows_mode() {
        assert!(client(Mode::Sandbox).is_sandbox());
        assert!(!client(Mode::Live).is_sandbox());
    }

    #[test]
    fn config_debug_redacts_crc() {
        let config = Przelewy24ClientConfig::new(Mode::Sandbox, "super-secret", PayloadDefaults::new(1, 1));
        let debug = format!("{:?}", config);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
