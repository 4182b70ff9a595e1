//! Gateway vocabulary: endpoint modes, currencies, languages, channels and encodings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AttributeValue, IntoAttributeValue};

/// Protocol version sent with every transaction.
pub const API_VERSION: &str = "3.2";

/// `time_limit` value meaning the transaction never expires.
pub const TIME_LIMIT_UNLIMITED: i64 = 0;

/// Endpoint selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Live,
    #[default]
    Sandbox,
}

impl Mode {
    /// Scheme and host of the classic form-encoded endpoint.
    pub fn endpoint_url(&self) -> &'static str {
        match self {
            Mode::Live => "https://secure.przelewy24.pl",
            Mode::Sandbox => "https://sandbox.przelewy24.pl",
        }
    }

    /// Base URL of the versioned REST API.
    pub fn api_url(&self) -> &'static str {
        match self {
            Mode::Live => "https://secure.przelewy24.pl/api/v1",
            Mode::Sandbox => "https://sandbox.przelewy24.pl/api/v1",
        }
    }

    pub fn is_live(&self) -> bool {
        *self == Mode::Live
    }

    pub fn is_sandbox(&self) -> bool {
        *self == Mode::Sandbox
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Live => write!(f, "live"),
            Mode::Sandbox => write!(f, "sandbox"),
        }
    }
}

/// Declares a string-valued wire enum usable directly as an attribute value.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl IntoAttributeValue for $name {
            fn into_attribute_value(self) -> Option<AttributeValue> {
                Some(AttributeValue::Text(self.as_str().to_string()))
            }
        }
    };
}

wire_enum!(
    /// Currencies accepted by the gateway.
    Currency {
        Pln => "PLN",
        Eur => "EUR",
        Gbp => "GBP",
        Czk => "CZK",
    }
);

wire_enum!(
    /// Payment page languages.
    Language {
        Pl => "PL",
        En => "EN",
        De => "DE",
        Es => "ES",
        It => "IT",
    }
);

wire_enum!(
    /// Character encodings the gateway decodes request bodies with.
    Encoding {
        Iso8859_2 => "ISO-8859-2",
        Utf8 => "UTF-8",
        Windows1250 => "Windows-1250",
    }
);

/// Payment channel flags; combine with [`Channel::combine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Cards = 1,
    Transfer = 2,
    TraditionalTransfer = 4,
    Prepaid = 32,
    PayByLink = 64,
}

impl Channel {
    pub fn bits(&self) -> i64 {
        *self as i64
    }

    /// Bitwise union of the given channels, as the `channel` field expects.
    pub fn combine(channels: &[Channel]) -> i64 {
        channels.iter().fold(0, |acc, c| acc | c.bits())
    }
}

impl IntoAttributeValue for Channel {
    fn into_attribute_value(self) -> Option<AttributeValue> {
        Some(AttributeValue::Integer(self.bits()))
    }
}

/// Transaction state reported by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    NoPayment,
    AdvancePayment,
    Done,
    Returned,
}

impl TransactionStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TransactionStatus::NoPayment),
            1 => Some(TransactionStatus::AdvancePayment),
            2 => Some(TransactionStatus::Done),
            3 => Some(TransactionStatus::Returned),
            _ => None,
        }
    }
}
