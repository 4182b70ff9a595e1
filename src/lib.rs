//! Przelewy24 - Payment gateway integration
//!
//! Builds signed requests for the classic form-encoded gateway (connection test,
//! transaction registration, verification), reads transactions from the REST API
//! and verifies inbound transaction notifications.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
