//! HandleTransactionNotificationHandler - Command handler for gateway transaction notifications.
//!
//! Two checks run before a notification counts as legitimate:
//! 1. Source authorization: sandbox mode, or a source address on the gateway's allow-list
//! 2. Verification: the recognized fields are re-signed and confirmed with the gateway

use std::net::IpAddr;
use std::sync::Arc;

use crate::domain::foundation::{Model, PayloadDefaults, Przelewy24Error, SIGNATURE_KEY};
use crate::domain::payment::{TransactionConfirmation, TransactionEvent, TransactionNotification};
use crate::ports::{PaymentGateway, TransactionEventPublisher};

/// Command to handle an inbound transaction notification.
#[derive(Debug, Clone)]
pub struct HandleTransactionNotificationCommand {
    /// Address the notification came from, when known.
    pub source_ip: Option<IpAddr>,
    /// Form fields as received.
    pub fields: Vec<(String, String)>,
}

/// Result of notification processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleTransactionNotificationResult {
    /// Gateway confirmed the transaction.
    Verified {
        session_id: String,
        order_id: Option<i64>,
    },
    /// Accepted without the verification round trip.
    Acknowledged { session_id: String },
}

/// Handler for gateway transaction notifications.
///
/// Publishes a "received" signal as soon as the source is authorized and a
/// "verified" signal once the gateway confirms the transaction.
pub struct HandleTransactionNotificationHandler {
    gateway: Arc<dyn PaymentGateway>,
    event_publisher: Arc<dyn TransactionEventPublisher>,
    defaults: PayloadDefaults,
    verify_transactions: bool,
}

impl HandleTransactionNotificationHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        event_publisher: Arc<dyn TransactionEventPublisher>,
        defaults: PayloadDefaults,
    ) -> Self {
        Self {
            gateway,
            event_publisher,
            defaults,
            verify_transactions: true,
        }
    }

    /// Turn the verification round trip on or off.
    pub fn with_verification(mut self, verify_transactions: bool) -> Self {
        self.verify_transactions = verify_transactions;
        self
    }

    pub async fn handle(
        &self,
        cmd: HandleTransactionNotificationCommand,
    ) -> Result<HandleTransactionNotificationResult, Przelewy24Error> {
        // 1. Authorize the source
        self.authorize(cmd.source_ip)?;

        let notification = TransactionNotification::from_fields(&cmd.fields);
        self.publish(TransactionEvent::received(notification.clone()))
            .await;

        if !self.verify_transactions {
            return Ok(HandleTransactionNotificationResult::Acknowledged {
                session_id: notification.session_id,
            });
        }

        // 2. Rebuild the confirmation from recognized fields only
        let confirmation = self.confirmation_from(&cmd.fields)?;

        if let Some((_, provided)) = cmd.fields.iter().find(|(k, _)| k == SIGNATURE_KEY) {
            if !self.gateway.signature_matches(&confirmation, provided) {
                tracing::warn!(
                    session_id = %notification.session_id,
                    "Notification signature does not match local computation"
                );
            }
        }

        // 3. Confirm with the gateway
        self.gateway.verify(&confirmation).await?;

        tracing::info!(
            session_id = %notification.session_id,
            order_id = ?notification.order_id,
            "Transaction notification verified"
        );

        let result = HandleTransactionNotificationResult::Verified {
            session_id: notification.session_id.clone(),
            order_id: notification.order_id,
        };
        self.publish(TransactionEvent::verified(notification)).await;

        Ok(result)
    }

    /// Reject unless in sandbox mode or the source is an allowed gateway server.
    pub fn authorize(&self, source_ip: Option<IpAddr>) -> Result<(), Przelewy24Error> {
        if self.gateway.is_sandbox() {
            return Ok(());
        }

        match source_ip {
            Some(address) if self.gateway.is_allowed_address(address) => Ok(()),
            other => {
                tracing::warn!(source_ip = ?other, "Notification from unauthorized address");
                Err(Przelewy24Error::Forbidden)
            }
        }
    }

    /// Confirmation payload built from the fields it recognizes; others are ignored.
    pub fn confirmation_from(
        &self,
        fields: &[(String, String)],
    ) -> Result<TransactionConfirmation, Przelewy24Error> {
        let keys = TransactionConfirmation::attribute_keys();
        let mut confirmation = TransactionConfirmation::new(&self.defaults);
        confirmation.set_many(
            fields
                .iter()
                .filter(|(key, _)| keys.contains(key))
                .map(|(key, value)| (key.as_str(), value.as_str())),
        )?;
        Ok(confirmation)
    }

    async fn publish(&self, event: TransactionEvent) {
        let event_type = event.event_type();
        if let Err(e) = self.event_publisher.publish(event).await {
            tracing::warn!(error = %e, event_type = event_type, "Failed to publish transaction event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventPublisher;
    use crate::adapters::przelewy24::{MockPaymentGateway, MOCK_CRC};
    use crate::domain::foundation::Signable;
    use crate::domain::payment::TransactionEventKind;

    fn fields() -> Vec<(String, String)> {
        [
            ("p24_merchant_id", "1"),
            ("p24_pos_id", "1"),
            ("p24_session_id", "s1"),
            ("p24_amount", "100"),
            ("p24_currency", "PLN"),
            ("p24_order_id", "9"),
            ("p24_method", "1"),
            ("p24_statement", "x"),
            ("p24_sign", "ignored"),
            ("p24_extra", "dropped"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn command(source_ip: Option<&str>) -> HandleTransactionNotificationCommand {
        HandleTransactionNotificationCommand {
            source_ip: source_ip.map(|ip| ip.parse().unwrap()),
            fields: fields(),
        }
    }

    fn handler(
        gateway: MockPaymentGateway,
    ) -> (
        HandleTransactionNotificationHandler,
        Arc<MockPaymentGateway>,
        Arc<InMemoryEventPublisher>,
    ) {
        let gateway = Arc::new(gateway);
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = HandleTransactionNotificationHandler::new(
            gateway.clone(),
            publisher.clone(),
            PayloadDefaults::new(1, 1),
        );
        (handler, gateway, publisher)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Authorization Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn live_mode_rejects_unknown_source_without_gateway_call() {
        let (handler, gateway, publisher) = handler(MockPaymentGateway::live());

        let result = handler.handle(command(Some("8.8.8.8"))).await;

        assert_eq!(result, Err(Przelewy24Error::Forbidden));
        assert!(gateway.calls().is_empty());
        assert_eq!(publisher.event_count(), 0);
    }

    #[tokio::test]
    async fn live_mode_rejects_missing_source() {
        let (handler, _, _) = handler(MockPaymentGateway::live());

        let result = handler.handle(command(None)).await;

        assert_eq!(result, Err(Przelewy24Error::Forbidden));
    }

    #[tokio::test]
    async fn live_mode_accepts_allowed_source() {
        let gateway = MockPaymentGateway::live().with_allowed_address("10.0.0.1".parse().unwrap());
        let (handler, gateway, _) = handler(gateway);

        let result = handler.handle(command(Some("10.0.0.1"))).await.unwrap();

        assert_eq!(
            result,
            HandleTransactionNotificationResult::Verified {
                session_id: "s1".to_string(),
                order_id: Some(9)
            }
        );
        assert_eq!(gateway.calls_to("verify"), 1);
    }

    #[tokio::test]
    async fn sandbox_mode_accepts_any_source() {
        let (handler, gateway, _) = handler(MockPaymentGateway::sandbox());

        assert!(handler.handle(command(Some("8.8.8.8"))).await.is_ok());
        assert!(handler.handle(command(None)).await.is_ok());
        assert_eq!(gateway.calls_to("verify"), 2);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Verification Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verify_receives_recognized_fields_signed() {
        let (handler, gateway, _) = handler(MockPaymentGateway::sandbox());

        handler.handle(command(None)).await.unwrap();

        let call = gateway.last_verification().unwrap();
        assert_eq!(call.field("p24_session_id"), Some("s1"));
        assert_eq!(call.field("p24_order_id"), Some("9"));
        assert_eq!(call.field("p24_amount"), Some("100"));
        assert_eq!(call.field("p24_currency"), Some("PLN"));
        assert_eq!(call.field("p24_merchant_id"), Some("1"));
        assert_eq!(call.field("p24_pos_id"), Some("1"));
        assert_eq!(call.field("p24_extra"), None);

        let expected = handler.confirmation_from(&fields()).unwrap().sign(MOCK_CRC);
        assert_eq!(call.field("p24_sign"), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn publishes_received_then_verified() {
        let (handler, _, publisher) = handler(MockPaymentGateway::sandbox());

        handler.handle(command(None)).await.unwrap();

        assert_eq!(
            publisher.kinds(),
            vec![TransactionEventKind::Received, TransactionEventKind::Verified]
        );
        assert_eq!(publisher.published_events()[1].notification.order_id, Some(9));
    }

    #[tokio::test]
    async fn gateway_rejection_propagates_after_received_signal() {
        let gateway = MockPaymentGateway::sandbox();
        gateway.fail_on("verify", Przelewy24Error::gateway_rejected("Invalid signature"));
        let (handler, _, publisher) = handler(gateway);

        let result = handler.handle(command(None)).await;

        assert_eq!(result, Err(Przelewy24Error::gateway_rejected("Invalid signature")));
        assert_eq!(publisher.kinds(), vec![TransactionEventKind::Received]);
    }

    #[tokio::test]
    async fn verification_can_be_disabled() {
        let (handler, gateway, publisher) = handler(MockPaymentGateway::sandbox());
        let handler = handler.with_verification(false);

        let result = handler.handle(command(None)).await.unwrap();

        assert_eq!(
            result,
            HandleTransactionNotificationResult::Acknowledged {
                session_id: "s1".to_string()
            }
        );
        assert!(gateway.calls().is_empty());
        assert_eq!(publisher.kinds(), vec![TransactionEventKind::Received]);
    }

    #[test]
    fn confirmation_from_ignores_unknown_fields() {
        let (handler, _, _) = handler(MockPaymentGateway::sandbox());

        let confirmation = handler.confirmation_from(&fields()).unwrap();

        assert_eq!(confirmation.attributes().len(), 8);
        assert!(confirmation.get("sign").is_err());
    }
}
