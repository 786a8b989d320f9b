//! # Access Webhooks Protocols
//!
//! Shared definitions for the access webhook manager.
//! Contains only types and interface definitions - no transport.
//!
//! ## Core Items
//!
//! - [`WebhookRegistry`] - Trait for registry implementations (HTTP, fakes)
//! - [`WebhookEndpoint`] - A subscription record as the registry reports it
//! - [`WebhookDraft`] - A validated create/update payload
//! - [`EventType`] - Event names, with the fixed selectable catalog

pub mod error;
pub mod registry;
pub mod types;

pub use error::{FormError, RegistryError};
pub use registry::WebhookRegistry;
pub use types::*;
