//! Whitelisted, prefix-normalized attribute storage backing every gateway payload.
//!
//! Field names may be given with or without the `p24_` prefix; they are stored under the
//! prefixed key. Setting an empty value removes the key instead of storing it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::Przelewy24Error;

/// Prefix carried by every key on the wire.
pub const ATTRIBUTE_PREFIX: &str = "p24_";

/// Key holding the computed signature in signed attribute maps.
pub const SIGNATURE_KEY: &str = "p24_sign";

/// A single attribute value as sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Text(String),
}

impl AttributeValue {
    /// Integer view of the value, parsing text when it holds a number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(v) => Some(*v),
            AttributeValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::Integer(_) => None,
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, AttributeValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(v) => write!(f, "{}", v),
            AttributeValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Conversion into an optional attribute value; `None` is the removal sentinel.
pub trait IntoAttributeValue {
    fn into_attribute_value(self) -> Option<AttributeValue>;
}

impl IntoAttributeValue for AttributeValue {
    fn into_attribute_value(self) -> Option<AttributeValue> {
        Some(self)
    }
}

impl IntoAttributeValue for &AttributeValue {
    fn into_attribute_value(self) -> Option<AttributeValue> {
        Some(self.clone())
    }
}

impl IntoAttributeValue for String {
    fn into_attribute_value(self) -> Option<AttributeValue> {
        Some(AttributeValue::Text(self))
    }
}

impl IntoAttributeValue for &String {
    fn into_attribute_value(self) -> Option<AttributeValue> {
        Some(AttributeValue::Text(self.clone()))
    }
}

impl IntoAttributeValue for &str {
    fn into_attribute_value(self) -> Option<AttributeValue> {
        Some(AttributeValue::Text(self.to_string()))
    }
}

macro_rules! integer_attribute_value {
    ($($ty:ty),*) => {
        $(
            impl IntoAttributeValue for $ty {
                fn into_attribute_value(self) -> Option<AttributeValue> {
                    Some(match i64::try_from(self) {
                        Ok(v) => AttributeValue::Integer(v),
                        Err(_) => AttributeValue::Text(self.to_string()),
                    })
                }
            }
        )*
    };
}

integer_attribute_value!(i32, i64, u8, u16, u32, u64, usize);

impl<T: IntoAttributeValue> IntoAttributeValue for Option<T> {
    fn into_attribute_value(self) -> Option<AttributeValue> {
        self.and_then(IntoAttributeValue::into_attribute_value)
    }
}

/// Strip the wire prefix from a field name, if present.
pub fn normalize_name(name: &str) -> &str {
    name.strip_prefix(ATTRIBUTE_PREFIX).unwrap_or(name)
}

/// Wire key for a field name, adding the prefix when missing.
pub fn attribute_key(name: &str) -> String {
    format!("{}{}", ATTRIBUTE_PREFIX, normalize_name(name))
}

/// Ordered attribute map restricted to a fixed whitelist of field names.
///
/// Insertion order is kept so the form body reads in the order fields were set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    fillable: &'static [&'static str],
    values: Vec<(String, AttributeValue)>,
}

impl Attributes {
    /// Create an empty bag accepting only the given (unprefixed) field names.
    pub fn new(fillable: &'static [&'static str]) -> Self {
        Self {
            fillable,
            values: Vec::new(),
        }
    }

    pub fn fillable(&self) -> &'static [&'static str] {
        self.fillable
    }

    pub fn is_fillable(&self, name: &str) -> bool {
        self.fillable.contains(&normalize_name(name))
    }

    fn check_name<'a>(&self, name: &'a str) -> Result<&'a str, Przelewy24Error> {
        let normalized = normalize_name(name);
        if self.fillable.contains(&normalized) {
            Ok(normalized)
        } else {
            Err(Przelewy24Error::unsupported_attribute(normalized))
        }
    }

    /// Set a whitelisted attribute. `None` or an empty string removes it.
    pub fn set(
        &mut self,
        name: &str,
        value: impl IntoAttributeValue,
    ) -> Result<(), Przelewy24Error> {
        let name = self.check_name(name)?;
        self.store(name, value.into_attribute_value());
        Ok(())
    }

    /// Apply `set` for each entry in the given order, stopping at the first rejected name.
    pub fn set_many<I, K, V>(&mut self, entries: I) -> Result<(), Przelewy24Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoAttributeValue,
    {
        for (name, value) in entries {
            self.set(name.as_ref(), value)?;
        }
        Ok(())
    }

    /// Get a whitelisted attribute, `None` when unset.
    pub fn get(&self, name: &str) -> Result<Option<&AttributeValue>, Przelewy24Error> {
        let name = self.check_name(name)?;
        Ok(self.value(name))
    }

    /// Prefixed key for every whitelisted field.
    pub fn keys(&self) -> Vec<String> {
        self.fillable.iter().map(|name| attribute_key(name)).collect()
    }

    /// Iterate stored `(prefixed key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored pairs rendered as wire strings.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    /// Set a field known to be whitelisted at compile time.
    pub(crate) fn put(&mut self, name: &'static str, value: impl IntoAttributeValue) {
        debug_assert!(
            self.is_fillable(name),
            "attribute {} is not fillable",
            name
        );
        self.store(normalize_name(name), value.into_attribute_value());
    }

    /// Lookup without the whitelist check, for names already validated.
    pub(crate) fn value(&self, name: &str) -> Option<&AttributeValue> {
        let key = attribute_key(name);
        self.values.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    fn store(&mut self, name: &str, value: Option<AttributeValue>) {
        let key = attribute_key(name);
        let position = self.values.iter().position(|(k, _)| *k == key);

        match (value.filter(|v| !v.is_empty()), position) {
            (Some(value), Some(index)) => self.values[index].1 = value,
            (Some(value), None) => self.values.push((key, value)),
            (None, Some(index)) => {
                self.values.remove(index);
            }
            (None, None) => {}
        }
    }
}
