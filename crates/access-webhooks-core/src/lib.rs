//! # Access Webhooks Core
//!
//! Everything between the operator and the registry that does not depend on
//! a presentation toolkit:
//!
//! - [`FormSession`] - stages and validates one record for create or edit
//! - [`Snapshot`] - the single in-memory copy of the listed collection
//! - [`WebhookManager`] - owns the snapshot and sequences registry calls

mod form;
mod manager;
mod snapshot;

#[cfg(test)]
mod fake_registry;

pub use form::{EventOption, FormMode, FormSession};
pub use manager::{Confirmation, DeleteOutcome, WebhookManager};
pub use snapshot::{DisplayRow, Snapshot};
