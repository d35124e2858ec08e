//! Service layer for business logic
//!
//! Shared between the HTTP handlers and the startup wiring.

mod contact;

pub use contact::{ContactForm, ContactService, MessageStore};
