//! # Access Webhooks Config
//!
//! Configuration management for the access webhook manager: registry host
//! and credentials, request timeout, certificate trust and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, Severity, ValidationIssue, ValidationResult};
