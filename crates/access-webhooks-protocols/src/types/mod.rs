//! Domain types shared by the registry client and the form controller.

mod endpoint;
mod event;

pub use endpoint::*;
pub use event::*;
