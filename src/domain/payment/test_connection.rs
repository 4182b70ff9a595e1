//! Connection test payload.

use crate::domain::foundation::{attribute_accessors, Attributes, Model, PayloadDefaults, Signable};

/// Payload for the `testConnection` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConnection {
    attributes: Attributes,
}

impl TestConnection {
    pub fn new(defaults: &PayloadDefaults) -> Self {
        let mut attributes = Attributes::new(Self::FILLABLE);
        defaults.fill(&mut attributes);
        Self { attributes }
    }

    attribute_accessors! {
        merchant_id => set_merchant_id,
        pos_id => set_pos_id,
    }
}

impl Model for TestConnection {
    const FILLABLE: &'static [&'static str] = &["merchant_id", "pos_id"];

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Signable for TestConnection {
    const SIGNABLE: &'static [&'static str] = &["pos_id"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AttributeValue, Przelewy24Error};

    #[test]
    fn new_fills_merchant_and_pos() {
        let payload = TestConnection::new(&PayloadDefaults::new(1000, 2000));

        assert_eq!(payload.merchant_id(), Some(&AttributeValue::Integer(1000)));
        assert_eq!(payload.pos_id(), Some(&AttributeValue::Integer(2000)));
    }

    #[test]
    fn signs_pos_id_with_crc() {
        let mut payload = TestConnection::new(&PayloadDefaults::new(1, 1));
        payload.set_pos_id(12345);

        // md5("12345|abc")
        assert_eq!(payload.sign("abc"), "ebde25d781fd2713220e264990b395cb");
    }

    #[test]
    fn rejects_transaction_fields() {
        let mut payload = TestConnection::new(&PayloadDefaults::new(1, 1));
        assert_eq!(
            payload.set("p24_amount", 100),
            Err(Przelewy24Error::UnsupportedAttribute("amount".to_string()))
        );
    }
}
