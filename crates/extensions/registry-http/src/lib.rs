//! HTTP webhook registry for the access developer API.

mod api;
mod client;
mod error;
mod response;

pub use client::{HttpRegistry, HttpRegistryConfig, ENDPOINTS_PATH};
pub use error::BuildError;
