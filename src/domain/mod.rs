//! Domain layer containing payload types and gateway vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Attribute bag, model/signing traits, error taxonomy
//! - `payment` - Gateway payloads, responses, notification events and constants

pub mod foundation;
pub mod payment;
