//! Client construction errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid registry host '{host}': {message}")]
    InvalidHost { host: String, message: String },

    #[error("Invalid CA certificate: {0}")]
    InvalidCertificate(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}
