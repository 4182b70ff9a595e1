//! Notification signals raised while processing gateway webhooks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::attribute_key;

/// Transaction details reported by a gateway notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionNotification {
    /// Unique identifier from the merchant's system.
    pub session_id: String,
    /// Amount in the smallest currency unit.
    pub amount: Option<i64>,
    pub currency: String,
    /// Transaction number assigned by the gateway.
    pub order_id: Option<i64>,
    /// Payment method used by the customer.
    pub method: Option<i64>,
    /// Transfer title.
    pub statement: String,
}

impl TransactionNotification {
    /// Pick the notification fields out of inbound form pairs; unknown keys are ignored.
    pub fn from_fields(fields: &[(String, String)]) -> Self {
        let text = |name: &str| -> String {
            let key = attribute_key(name);
            fields
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };
        let number = |name: &str| text(name).trim().parse::<i64>().ok();

        Self {
            session_id: text("session_id"),
            amount: number("amount"),
            currency: text("currency"),
            order_id: number("order_id"),
            method: number("method"),
            statement: text("statement"),
        }
    }
}

/// Stage of notification processing a signal reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionEventKind {
    /// Notification accepted from an authorized source, not yet verified.
    Received,
    /// Gateway confirmed the transaction.
    Verified,
}

/// Fire-and-forget signal for external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub event_id: Uuid,
    pub kind: TransactionEventKind,
    pub occurred_at: DateTime<Utc>,
    pub notification: TransactionNotification,
}

impl TransactionEvent {
    pub fn new(kind: TransactionEventKind, notification: TransactionNotification) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind,
            occurred_at: Utc::now(),
            notification,
        }
    }

    pub fn received(notification: TransactionNotification) -> Self {
        Self::new(TransactionEventKind::Received, notification)
    }

    pub fn verified(notification: TransactionNotification) -> Self {
        Self::new(TransactionEventKind::Verified, notification)
    }

    /// Routing key, e.g. `przelewy24.transaction.verified.v1`.
    pub fn event_type(&self) -> &'static str {
        match self.kind {
            TransactionEventKind::Received => "przelewy24.transaction.received.v1",
            TransactionEventKind::Verified => "przelewy24.transaction.verified.v1",
        }
    }
}
