//! Transaction verification payload.

use subtle::ConstantTimeEq;

use crate::domain::foundation::{attribute_accessors, Attributes, Model, PayloadDefaults, Signable};

/// Payload for the `trnVerify` endpoint.
///
/// Usually rebuilt from the fields of an inbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionConfirmation {
    attributes: Attributes,
}

impl TransactionConfirmation {
    pub fn new(defaults: &PayloadDefaults) -> Self {
        let mut attributes = Attributes::new(Self::FILLABLE);
        defaults.fill(&mut attributes);
        Self { attributes }
    }

    attribute_accessors! {
        merchant_id => set_merchant_id,
        pos_id => set_pos_id,
        session_id => set_session_id,
        amount => set_amount,
        currency => set_currency,
        order_id => set_order_id,
        method => set_method,
        statement => set_statement,
    }

    /// Compare a signature received from the gateway with the locally computed one.
    ///
    /// The notification signature covers the same fields as the verification request.
    pub fn signature_matches(&self, crc: &str, provided: &str) -> bool {
        let expected = self.sign(crc);
        let provided = provided.trim().to_ascii_lowercase();
        expected.as_bytes().ct_eq(provided.as_bytes()).unwrap_u8() == 1
    }
}

impl Model for TransactionConfirmation {
    const FILLABLE: &'static [&'static str] = &[
        "merchant_id",
        "pos_id",
        "session_id",
        "amount",
        "currency",
        "order_id",
        "method",
        "statement",
    ];

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Signable for TransactionConfirmation {
    const SIGNABLE: &'static [&'static str] = &["session_id", "order_id", "amount", "currency"];
}
