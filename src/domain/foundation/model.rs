//! Payload model traits: whitelisted attribute access and MD5 request signing.

use md5::{Digest, Md5};

use super::attributes::{attribute_key, AttributeValue, Attributes, IntoAttributeValue, SIGNATURE_KEY};
use super::errors::Przelewy24Error;

/// Separator placed between signed values and before the shared secret.
pub const SIGNATURE_SEPARATOR: char = '|';

/// Merchant-level values every new payload starts with.
///
/// Built from configuration and passed into payload constructors explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDefaults {
    pub merchant_id: u64,
    pub pos_id: u64,
    /// Notification URL for new transactions.
    pub url_status: Option<String>,
    /// Return URL for new transactions.
    pub url_return: Option<String>,
}

impl PayloadDefaults {
    pub fn new(merchant_id: u64, pos_id: u64) -> Self {
        Self {
            merchant_id,
            pos_id,
            url_status: None,
            url_return: None,
        }
    }

    pub fn with_url_status(mut self, url: impl Into<String>) -> Self {
        self.url_status = Some(url.into());
        self
    }

    pub fn with_url_return(mut self, url: impl Into<String>) -> Self {
        self.url_return = Some(url.into());
        self
    }

    /// Fill merchant and store ids into the bag when its whitelist has them.
    pub(crate) fn fill(&self, attributes: &mut Attributes) {
        if attributes.is_fillable("merchant_id") {
            attributes.put("merchant_id", self.merchant_id);
        }
        if attributes.is_fillable("pos_id") {
            attributes.put("pos_id", self.pos_id);
        }
    }
}

/// A payload backed by a whitelisted attribute bag.
pub trait Model {
    /// Field names this payload accepts, without prefix.
    const FILLABLE: &'static [&'static str];

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    fn get(&self, name: &str) -> Result<Option<&AttributeValue>, Przelewy24Error> {
        self.attributes().get(name)
    }

    fn set(&mut self, name: &str, value: impl IntoAttributeValue) -> Result<(), Przelewy24Error>
    where
        Self: Sized,
    {
        self.attributes_mut().set(name, value)
    }

    fn set_many<I, K, V>(&mut self, entries: I) -> Result<(), Przelewy24Error>
    where
        Self: Sized,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoAttributeValue,
    {
        self.attributes_mut().set_many(entries)
    }

    /// Prefixed key of every whitelisted field.
    ///
    /// Used to filter inbound requests down to recognized fields.
    fn attribute_keys() -> Vec<String>
    where
        Self: Sized,
    {
        Self::FILLABLE.iter().map(|name| attribute_key(name)).collect()
    }

    /// Wire pairs sent to the gateway, in order.
    fn form_attributes(&self) -> Vec<(String, String)> {
        self.attributes().to_pairs()
    }
}

/// A payload the gateway expects signed with the merchant CRC.
pub trait Signable: Model {
    /// Ordered subset of `FILLABLE` covered by the signature.
    const SIGNABLE: &'static [&'static str];

    /// MD5 over the signable values and the secret, hex encoded.
    ///
    /// Missing values count as empty strings, so the separator count never changes.
    fn sign(&self, crc: &str) -> String {
        let mut payload = String::new();
        for name in Self::SIGNABLE {
            if let Some(value) = self.attributes().value(name) {
                payload.push_str(&value.to_string());
            }
            payload.push(SIGNATURE_SEPARATOR);
        }
        payload.push_str(crc);

        hex::encode(Md5::digest(payload.as_bytes()))
    }

    /// Wire pairs plus the `p24_sign` entry.
    fn signed_attributes(&self, crc: &str) -> Vec<(String, String)> {
        let mut attributes = self.form_attributes();
        attributes.push((SIGNATURE_KEY.to_string(), self.sign(crc)));
        attributes
    }
}

/// Generate typed getters and chaining setters for whitelisted fields.
///
/// Every accessor goes through the owning struct's `attributes` bag.
macro_rules! attribute_accessors {
    ($($field:ident => $setter:ident),* $(,)?) => {
        $(
            #[doc = concat!("Current `", stringify!($field), "` value.")]
            pub fn $field(&self) -> Option<&$crate::domain::foundation::AttributeValue> {
                self.attributes.value(stringify!($field))
            }

            #[doc = concat!("Set `", stringify!($field), "`; an empty value removes it.")]
            pub fn $setter(
                &mut self,
                value: impl $crate::domain::foundation::IntoAttributeValue,
            ) -> &mut Self {
                self.attributes.put(stringify!($field), value);
                self
            }
        )*
    };
}

pub(crate) use attribute_accessors;
