//! Form staging for create and edit.

use std::collections::BTreeSet;

use tracing::debug;

use access_webhooks_protocols::{
    EventType, FormError, WebhookDraft, WebhookEndpoint, WebhookRegistry,
};

/// What a form session will do on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Edit the record as last seen in the snapshot.
    Edit(WebhookEndpoint),
}

/// One selectable (or carried-over) event as offered by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOption {
    pub event: EventType,
    pub selected: bool,
    /// False for events outside the catalog: they can only be deselected.
    pub selectable: bool,
}

/// Staged input for a single record.
///
/// A failed [`submit`](Self::submit) leaves every entered value in place.
#[derive(Debug, Clone)]
pub struct FormSession {
    mode: FormMode,
    name: String,
    endpoint: String,
    events: BTreeSet<EventType>,
}

impl FormSession {
    pub fn open(mode: FormMode) -> Self {
        let (name, endpoint, events) = match &mode {
            FormMode::Create => (String::new(), String::new(), BTreeSet::new()),
            FormMode::Edit(existing) => (
                existing.name.clone(),
                existing.endpoint.clone(),
                existing.events.clone(),
            ),
        };
        Self {
            mode,
            name,
            endpoint,
            events,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Id of the record being edited.
    pub fn editing_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit(existing) => Some(&existing.id),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn selected_events(&self) -> &BTreeSet<EventType> {
        &self.events
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = endpoint.into();
    }

    /// Select an event. Only catalog events can be newly selected.
    pub fn select_event(&mut self, event: EventType) -> Result<(), FormError> {
        if self.events.contains(&event) {
            return Ok(());
        }
        if !event.is_supported() {
            return Err(FormError::UnsupportedEvent(event.to_string()));
        }
        self.events.insert(event);
        Ok(())
    }

    /// Returns whether the event was selected.
    pub fn deselect_event(&mut self, event: &EventType) -> bool {
        self.events.remove(event)
    }

    /// Flip an event; returns whether it is selected afterwards.
    pub fn toggle_event(&mut self, event: EventType) -> Result<bool, FormError> {
        if self.deselect_event(&event) {
            return Ok(false);
        }
        self.select_event(event)?;
        Ok(true)
    }

    /// The catalog in display order, followed by any selected events the
    /// catalog does not offer.
    pub fn options(&self) -> Vec<EventOption> {
        let catalog = EventType::catalog().iter().map(|event| EventOption {
            event: event.clone(),
            selected: self.events.contains(event),
            selectable: true,
        });
        let carried = self
            .events
            .iter()
            .filter(|event| !event.is_supported())
            .map(|event| EventOption {
                event: event.clone(),
                selected: true,
                selectable: false,
            });
        catalog.chain(carried).collect()
    }

    pub fn validate(&self) -> Result<WebhookDraft, FormError> {
        WebhookDraft::new(
            self.name.as_str(),
            self.endpoint.as_str(),
            self.events.iter().cloned(),
        )
    }

    /// Validate, then create or update depending on the mode.
    ///
    /// Nothing is sent when validation fails.
    pub async fn submit(
        &self,
        registry: &dyn WebhookRegistry,
    ) -> Result<WebhookEndpoint, FormError> {
        let draft = self.validate()?;
        let saved = match &self.mode {
            FormMode::Create => {
                debug!("Submitting new webhook '{}'", draft.name());
                registry.create(&draft).await?
            }
            FormMode::Edit(existing) => {
                debug!("Submitting changes to webhook {}", existing.id);
                registry.update(&existing.id, &draft).await?
            }
        };
        Ok(saved)
    }

    /// Discard the session.
    pub fn cancel(self) {
        debug!("Form cancelled ({:?})", self.editing_id());
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
