//! Webhook endpoint records and drafts.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use super::EventType;
use crate::error::FormError;

/// A webhook subscription as reported by the registry.
///
/// `id` is assigned by the registry and never generated locally. Every
/// other field tolerates being absent or null, so one sparse record does
/// not spoil a whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEndpoint {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub endpoint: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: BTreeSet<EventType>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl WebhookEndpoint {
    /// Events joined for a single display column.
    pub fn events_label(&self) -> String {
        self.events
            .iter()
            .map(EventType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Events on this record that the catalog does not offer.
    pub fn unsupported_events(&self) -> impl Iterator<Item = &EventType> {
        self.events.iter().filter(|event| !event.is_supported())
    }
}

/// A validated create/update payload.
///
/// Construction fails unless the name and endpoint are non-blank and at
/// least one event is present, so a draft can always be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookDraft {
    name: String,
    endpoint: String,
    events: BTreeSet<EventType>,
}

impl WebhookDraft {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        events: impl IntoIterator<Item = EventType>,
    ) -> Result<Self, FormError> {
        let events: BTreeSet<EventType> = events.into_iter().collect();
        if events.is_empty() {
            return Err(FormError::IncompleteForm(
                "select at least one event".to_string(),
            ));
        }

        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(FormError::IncompleteForm("name is required".to_string()));
        }

        let endpoint = endpoint.into().trim().to_string();
        if endpoint.is_empty() {
            return Err(FormError::IncompleteForm("endpoint is required".to_string()));
        }

        Ok(Self {
            name,
            endpoint,
            events,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn events(&self) -> &BTreeSet<EventType> {
        &self.events
    }

    /// The record the registry holds after accepting this draft for `id`.
    pub fn into_endpoint(self, id: impl Into<String>) -> WebhookEndpoint {
        WebhookEndpoint {
            id: id.into(),
            name: self.name,
            endpoint: self.endpoint,
            events: self.events,
        }
    }
}
