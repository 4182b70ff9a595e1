//! Przelewy24 REST API client.
//!
//! Read-oriented JSON client for the versioned API. Authenticates with HTTP basic auth
//! (merchant id + API key) and does not sign payloads.
//!
//! Non-success statuses map through a code → message table into `Przelewy24Error::Api`.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::domain::foundation::Przelewy24Error;
use crate::domain::payment::{Mode, TransactionStatus};

use super::gateway_client::DEFAULT_TIMEOUT;
use super::transport_error;

/// Messages used when a status code has no per-call override.
const DEFAULT_ERROR_MESSAGES: &[(u16, &str)] = &[
    (400, "Invalid input data"),
    (401, "Incorrect authentication"),
    (403, "Not authorized"),
    (404, "Not found"),
    (409, "Conflict"),
    (500, "Undefined error"),
];

/// Overrides applied to transaction lookups.
const TRANSACTION_LOOKUP_MESSAGES: &[(u16, &str)] = &[
    (400, "Invalid input data"),
    (401, "Incorrect authentication"),
    (404, "Transaction does not exist"),
];

/// REST API client configuration.
#[derive(Clone)]
pub struct Przelewy24ApiConfig {
    mode: Mode,

    /// Basic auth user.
    merchant_id: u64,

    /// Basic auth password.
    api_key: SecretString,

    /// API base override (for testing).
    base_url: Option<String>,

    timeout: Duration,

    /// Status code → error message table.
    messages: BTreeMap<u16, String>,
}

impl Przelewy24ApiConfig {
    pub fn new(mode: Mode, merchant_id: u64, api_key: impl Into<String>) -> Self {
        Self {
            mode,
            merchant_id,
            api_key: SecretString::new(api_key.into()),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            messages: DEFAULT_ERROR_MESSAGES
                .iter()
                .map(|(code, message)| (*code, message.to_string()))
                .collect(),
        }
    }

    /// Set a custom API base URL (for testing).
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

    pub fn merchant_id(&self) -> u64 {
        self.merchant_id
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replace or add messages in the error table.
    pub fn with_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = (u16, S)>,
        S: Into<String>,
    {
        self.messages
            .extend(messages.into_iter().map(|(code, message)| (code, message.into())));
        self
    }
}

impl fmt::Debug for Przelewy24ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Przelewy24ApiConfig")
            .field("mode", &self.mode)
            .field("merchant_id", &self.merchant_id)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Transaction record returned by a session id lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiTransaction {
    body: Value,
}

impl ApiTransaction {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Whole decoded response body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// The `data` object of the response.
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }

    /// Decoded `data.status`.
    pub fn status(&self) -> Option<TransactionStatus> {
        self.data()
            .and_then(|data| data.get("status"))
            .and_then(Value::as_i64)
            .and_then(TransactionStatus::from_code)
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Przelewy24 REST API client.
pub struct Przelewy24ApiClient {
    config: Przelewy24ApiConfig,
    http_client: reqwest::Client,
}

impl Przelewy24ApiClient {
    pub fn new(config: Przelewy24ApiConfig) -> Result<Self, Przelewy24Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Versioned API base the requests go to.
    pub fn endpoint_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.config.mode.api_url())
    }

    /// Full URL for an API path, with exactly one slash between base and path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Check the API credentials.
    pub async fn test_connection(&self) -> Result<Value, Przelewy24Error> {
        let url = self.parse_url(&self.url("testAccess"))?;
        self.get_json(url, &[]).await
    }

    /// Look up a transaction by the merchant's session id.
    ///
    /// Returns `None` when the API answers 404.
    pub async fn transaction_by_session_id(
        &self,
        session_id: &str,
    ) -> Result<Option<ApiTransaction>, Przelewy24Error> {
        let mut url = self.parse_url(&self.url("transaction/by/sessionId"))?;
        url.path_segments_mut()
            .map_err(|_| Przelewy24Error::transport("API base URL cannot take a path"))?
            .push(session_id);

        match self.get_json(url, TRANSACTION_LOOKUP_MESSAGES).await {
            Ok(body) => Ok(Some(ApiTransaction::new(body))),
            Err(Przelewy24Error::Api { code: 404, .. }) => {
                tracing::debug!(session_id = session_id, "Transaction not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Message for a failed status, per-call overrides first, then the configured table.
    pub fn error_message(&self, code: u16, overrides: &[(u16, &str)]) -> String {
        overrides
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, message)| message.to_string())
            .or_else(|| self.config.messages.get(&code).cloned())
            .unwrap_or_else(|| format!("Unknown exception code [{}]", code))
    }

    fn parse_url(&self, raw: &str) -> Result<Url, Przelewy24Error> {
        Url::parse(raw)
            .map_err(|e| Przelewy24Error::transport(format!("Invalid API URL {}: {}", raw, e)))
    }

    async fn get_json(&self, url: Url, overrides: &[(u16, &str)]) -> Result<Value, Przelewy24Error> {
        tracing::debug!(url = %url, "Sending API request");

        let response = self
            .http_client
            .get(url)
            .basic_auth(
                self.config.merchant_id,
                Some(self.config.api_key.expose_secret()),
            )
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.status_error(status, overrides));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Null) | Err(_) => Err(Przelewy24Error::protocol("Could not parse response")),
            Ok(value) => Ok(value),
        }
    }

    fn status_error(&self, status: StatusCode, overrides: &[(u16, &str)]) -> Przelewy24Error {
        let code = status.as_u16();
        let message = self.error_message(code, overrides);

        tracing::warn!(status = code, message = %message, "API request failed");

        Przelewy24Error::api(code, message)
    }
}
