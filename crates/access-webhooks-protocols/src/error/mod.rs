//! Error types for the access webhook manager.

mod form;
mod registry;

pub use form::*;
pub use registry::*;
