//! Gateway configuration

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::adapters::http::WEBHOOK_PATH;
use crate::adapters::przelewy24::Przelewy24ApiConfig;
use crate::domain::foundation::PayloadDefaults;
use crate::domain::payment::Mode;

use super::error::ValidationError;

/// Przelewy24 merchant and endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Endpoint selection; sandbox also disables webhook IP filtering
    #[serde(default)]
    pub mode: Mode,

    /// Merchant identifier, also the REST API basic auth user
    pub merchant_id: u64,

    /// Store identifier, defaults to the merchant identifier
    pub pos_id: Option<u64>,

    /// Signing secret
    pub crc: SecretString,

    /// REST API key
    pub api_key: Option<SecretString>,

    /// Default return URL for new transactions
    pub return_route: Option<String>,

    /// Public base URL of this application
    pub app_url: Option<String>,

    /// Mount the built-in webhook route
    #[serde(default = "default_true")]
    pub package_routes: bool,

    /// Force the built-in webhook route off
    #[serde(default)]
    pub disable_package_routes: bool,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Confirm notified transactions with the gateway
    #[serde(default = "default_true")]
    pub verify_transactions: bool,
}

impl GatewayConfig {
    /// Create a configuration with defaults for everything but credentials
    pub fn new(merchant_id: u64, crc: impl Into<String>) -> Self {
        Self {
            mode: Mode::default(),
            merchant_id,
            pos_id: None,
            crc: SecretString::new(crc.into()),
            api_key: None,
            return_route: None,
            app_url: None,
            package_routes: true,
            disable_package_routes: false,
            timeout_secs: default_timeout(),
            verify_transactions: true,
        }
    }

    pub fn pos_id(&self) -> u64 {
        self.pos_id.unwrap_or(self.merchant_id)
    }

    /// Whether the webhook route is mounted
    pub fn routes_enabled(&self) -> bool {
        self.package_routes && !self.disable_package_routes
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Notification URL handed to the gateway with new transactions
    pub fn status_url(&self) -> Option<String> {
        if !self.routes_enabled() {
            return None;
        }
        self.app_url
            .as_ref()
            .map(|url| format!("{}{}", url.trim_end_matches('/'), WEBHOOK_PATH))
    }

    /// Merchant values every new payload starts with
    pub fn payload_defaults(&self) -> PayloadDefaults {
        let mut defaults = PayloadDefaults::new(self.merchant_id, self.pos_id());
        if let Some(url) = self.status_url() {
            defaults = defaults.with_url_status(url);
        }
        if let Some(url) = &self.return_route {
            defaults = defaults.with_url_return(url.clone());
        }
        defaults
    }

    /// REST API client settings, `None` without an API key
    pub fn api_config(&self) -> Option<Przelewy24ApiConfig> {
        let api_key = self.api_key.as_ref()?;
        Some(
            Przelewy24ApiConfig::new(self.mode, self.merchant_id, api_key.expose_secret().clone())
                .with_timeout(self.timeout()),
        )
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.merchant_id == 0 {
            return Err(ValidationError::MissingRequired("GATEWAY__MERCHANT_ID"));
        }
        if self.crc.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY__CRC"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        if let Some(url) = &self.app_url {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidUrl("GATEWAY__APP_URL"));
            }
            if self.mode.is_live() && !url.starts_with("https://") {
                return Err(ValidationError::UrlMustBeHttps("GATEWAY__APP_URL"));
            }
        }
        if let Some(url) = &self.return_route {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidUrl("GATEWAY__RETURN_ROUTE"));
            }
        }

        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}
