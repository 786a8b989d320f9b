//! Developer API wire types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use access_webhooks_protocols::{EventType, WebhookDraft, WebhookEndpoint};

/// Status code the API reports for a successful call.
pub const SUCCESS_CODE: &str = "SUCCESS";

/// Codes the API uses for a record that does not exist.
pub const NOT_FOUND_CODES: [&str; 2] = ["CODE_NOT_EXISTS", "CODE_RESOURCE_NOT_FOUND"];

/// Create/update request body.
#[derive(Debug, Serialize)]
pub struct EndpointPayload<'a> {
    pub name: &'a str,
    pub endpoint: &'a str,
    pub events: Vec<&'a str>,
}

impl<'a> From<&'a WebhookDraft> for EndpointPayload<'a> {
    fn from(draft: &'a WebhookDraft) -> Self {
        Self {
            name: draft.name(),
            endpoint: draft.endpoint(),
            events: draft.events().iter().map(EventType::as_str).collect(),
        }
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn is_not_found(&self) -> bool {
        NOT_FOUND_CODES.contains(&self.code.as_str())
    }

    /// Server code and message, verbatim.
    pub fn describe(&self) -> String {
        match self.msg.as_deref() {
            Some(msg) if !msg.is_empty() => format!("{}: {}", self.code, msg),
            _ => self.code.clone(),
        }
    }
}

/// A record as returned by create/update. Fields the server omits are
/// filled from the submitted draft.
#[derive(Debug, Deserialize)]
pub struct RecordData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub events: Option<BTreeSet<EventType>>,
}

impl RecordData {
    pub fn merge(self, draft: &WebhookDraft) -> WebhookEndpoint {
        WebhookEndpoint {
            id: self.id,
            name: self.name.unwrap_or_else(|| draft.name().to_string()),
            endpoint: self.endpoint.unwrap_or_else(|| draft.endpoint().to_string()),
            events: self.events.unwrap_or_else(|| draft.events().clone()),
        }
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
