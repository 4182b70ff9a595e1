//! Payment gateway port.
//!
//! Defines what the webhook handling core needs from the form-encoded gateway client:
//! the signed exchanges, the endpoint mode and the source address allow-list.

use std::net::IpAddr;

use async_trait::async_trait;

use crate::domain::foundation::Przelewy24Error;
use crate::domain::payment::{
    GatewayResponse, Mode, TestConnection, Transaction, TransactionConfirmation,
};

/// Port for the signed gateway protocol.
///
/// Every exchange is a single attempt; retry policy belongs to the caller.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Endpoint mode fixed at construction.
    fn mode(&self) -> Mode;

    /// Sandbox mode bypasses source address filtering for notifications.
    fn is_sandbox(&self) -> bool {
        self.mode().is_sandbox()
    }

    /// True when the address may deliver notifications.
    fn is_allowed_address(&self, address: IpAddr) -> bool;

    /// Compare a notification signature against the locally computed one.
    fn signature_matches(&self, confirmation: &TransactionConfirmation, provided: &str) -> bool;

    /// Check credentials with the default connection test payload.
    async fn test_connection(&self) -> Result<GatewayResponse, Przelewy24Error>;

    /// Check credentials with a caller-built payload.
    async fn test_connection_with(
        &self,
        payload: &TestConnection,
    ) -> Result<GatewayResponse, Przelewy24Error>;

    /// Register a transaction; the reply carries the redirect token.
    async fn register(&self, transaction: &Transaction) -> Result<GatewayResponse, Przelewy24Error>;

    /// Confirm a notified transaction with the gateway.
    async fn verify(
        &self,
        confirmation: &TransactionConfirmation,
    ) -> Result<GatewayResponse, Przelewy24Error>;
}
