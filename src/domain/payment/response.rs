//! Decoded reply of the form-encoded gateway endpoints.

use std::collections::HashMap;

use crate::domain::foundation::Przelewy24Error;

/// Immutable key/value view of a gateway reply.
///
/// A reply is well formed when its body decodes as form pairs and carries an
/// integer `error` field; `error > 0` signals a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    attributes: HashMap<String, String>,
}

impl GatewayResponse {
    pub fn new(attributes: HashMap<String, String>) -> Self {
        Self { attributes }
    }

    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn parse(body: &[u8]) -> Result<Self, Przelewy24Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|e| Przelewy24Error::protocol(format!("Invalid response body: {}", e)))?;

        let response = Self::new(pairs.into_iter().collect());
        match response.get("error") {
            None => Err(Przelewy24Error::protocol("Response is missing the error field")),
            Some(_) if response.error_code().is_none() => Err(Przelewy24Error::protocol(
                "Response error field is not an integer",
            )),
            Some(_) => Ok(response),
        }
    }

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Numeric `error` field, when present and numeric.
    pub fn error_code(&self) -> Option<i64> {
        self.get("error").and_then(|v| v.trim().parse().ok())
    }

    /// True when the gateway reported a rejection.
    pub fn is_error(&self) -> bool {
        self.error_code().map_or(false, |code| code > 0)
    }

    /// Gateway-supplied rejection message, empty when absent.
    pub fn error_message(&self) -> &str {
        self.get("errorMessage").unwrap_or_default()
    }

    /// Token returned by transaction registration.
    pub fn token(&self) -> Option<&str> {
        self.get("token").filter(|t| !t.is_empty())
    }
}
