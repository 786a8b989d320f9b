//! Form errors.

use thiserror::Error;

use super::RegistryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A local precondition failed; nothing was sent.
    #[error("Incomplete form: {0}")]
    IncompleteForm(String),

    #[error("Event cannot be selected: {0}")]
    UnsupportedEvent(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl FormError {
    /// The registry error behind this failure, if the request was sent.
    pub fn registry_error(&self) -> Option<&RegistryError> {
        match self {
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}
