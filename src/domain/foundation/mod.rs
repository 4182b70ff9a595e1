//! Foundation module - Shared payload primitives.
//!
//! Contains the attribute bag, the model/signing traits and the error taxonomy
//! that every gateway payload builds on.

mod attributes;
mod errors;
mod model;

pub use attributes::{
    attribute_key, normalize_name, AttributeValue, Attributes, IntoAttributeValue,
    ATTRIBUTE_PREFIX, SIGNATURE_KEY,
};
pub use errors::Przelewy24Error;
pub use model::{Model, PayloadDefaults, Signable, SIGNATURE_SEPARATOR};

pub(crate) use model::attribute_accessors;
