//! Tests for FormSession.

use super::*;
use crate::fake_registry::FakeRegistry;
use access_webhooks_protocols::RegistryError;

fn existing() -> WebhookEndpoint {
    WebhookEndpoint {
        id: "wh-1".to_string(),
        name: "Lobby".to_string(),
        endpoint: "https://example.com/lobby".to_string(),
        events: [
            EventType::DoorUnlock,
            EventType::Other("access.visitor.arrived".to_string()),
        ]
        .into_iter()
        .collect(),
    }
}

#[test]
fn test_create_starts_empty() {
    let form = FormSession::open(FormMode::Create);
    assert_eq!(form.name(), "");
    assert_eq!(form.endpoint(), "");
    assert!(form.selected_events().is_empty());
    assert!(form.editing_id().is_none());

    let options = form.options();
    assert_eq!(options.len(), 6);
    assert!(options.iter().all(|o| !o.selected && o.selectable));
}

#[test]
fn test_edit_prefills_from_existing() {
    let form = FormSession::open(FormMode::Edit(existing()));
    assert_eq!(form.editing_id(), Some("wh-1"));
    assert_eq!(form.name(), "Lobby");
    assert_eq!(form.endpoint(), "https://example.com/lobby");
    assert_eq!(form.selected_events().len(), 2);
}

#[test]
fn test_edit_options_carry_unknown_event() {
    let form = FormSession::open(FormMode::Edit(existing()));
    let options = form.options();
    assert_eq!(options.len(), 7);

    let unlock = options
        .iter()
        .find(|o| o.event == EventType::DoorUnlock)
        .unwrap();
    assert!(unlock.selected);

    let carried = options.last().unwrap();
    assert_eq!(carried.event.as_str(), "access.visitor.arrived");
    assert!(carried.selected);
    assert!(!carried.selectable);
}

#[test]
fn test_unknown_event_cannot_be_newly_selected() {
    let mut form = FormSession::open(FormMode::Create);
    let err = form
        .select_event(EventType::from("access.visitor.arrived"))
        .unwrap_err();
    assert_eq!(
        err,
        FormError::UnsupportedEvent("access.visitor.arrived".to_string())
    );
    assert!(form.selected_events().is_empty());
}

#[test]
fn test_carried_unknown_event_can_be_dropped_but_not_restored() {
    let mut form = FormSession::open(FormMode::Edit(existing()));
    let visitor = EventType::from("access.visitor.arrived");

    assert!(form.deselect_event(&visitor));
    assert!(form.select_event(visitor.clone()).is_err());
    assert!(!form.selected_events().contains(&visitor));
}

#[test]
fn test_select_is_idempotent() {
    let mut form = FormSession::open(FormMode::Create);
    form.select_event(EventType::DoorUnlock).unwrap();
    form.select_event(EventType::DoorUnlock).unwrap();
    assert_eq!(form.selected_events().len(), 1);
}

#[test]
fn test_toggle_event() {
    let mut form = FormSession::open(FormMode::Create);
    assert!(form.toggle_event(EventType::DeviceDpsStatus).unwrap());
    assert!(!form.toggle_event(EventType::DeviceDpsStatus).unwrap());
    assert!(form.selected_events().is_empty());
}

#[test]
fn test_validate_requires_events() {
    let mut form = FormSession::open(FormMode::Create);
    form.set_name("Front Door");
    form.set_endpoint("https://example.com/hook");
    assert!(matches!(form.validate(), Err(FormError::IncompleteForm(_))));
}

#[test]
fn test_validate_requires_name() {
    let mut form = FormSession::open(FormMode::Create);
    form.set_endpoint("https://example.com/hook");
    form.select_event(EventType::DoorUnlock).unwrap();
    assert!(matches!(form.validate(), Err(FormError::IncompleteForm(_))));
}

#[test]
fn test_validate_produces_draft() {
    let mut form = FormSession::open(FormMode::Create);
    form.set_name("Front Door");
    form.set_endpoint("https://example.com/hook");
    form.select_event(EventType::DoorUnlock).unwrap();

    let draft = form.validate().unwrap();
    assert_eq!(draft.name(), "Front Door");
    assert_eq!(draft.events().len(), 1);
}

#[tokio::test]
async fn test_submit_without_events_sends_nothing() {
    let registry = FakeRegistry::new();
    let mut form = FormSession::open(FormMode::Create);
    form.set_name("Front Door");
    form.set_endpoint("https://example.com/hook");

    let err = form.submit(&registry).await.unwrap_err();
    assert!(matches!(err, FormError::IncompleteForm(_)));
    assert_eq!(registry.calls(), 0);
}

#[tokio::test]
async fn test_submit_create() {
    let registry = FakeRegistry::new();
    let mut form = FormSession::open(FormMode::Create);
    form.set_name("Front Door");
    form.set_endpoint("https://example.com/hook");
    form.select_event(EventType::DoorUnlock).unwrap();

    let saved = form.submit(&registry).await.unwrap();
    assert!(!saved.id.is_empty());
    assert_eq!(saved.name, "Front Door");
    assert_eq!(registry.calls(), 1);
}

#[tokio::test]
async fn test_submit_edit_keeps_values_on_not_found() {
    let registry = FakeRegistry::new();
    let mut form = FormSession::open(FormMode::Edit(existing()));
    form.set_name("Lobby (renamed)");

    let err = form.submit(&registry).await.unwrap_err();
    assert_eq!(
        err.registry_error(),
        Some(&RegistryError::NotFound("wh-1".to_string()))
    );
    assert_eq!(form.name(), "Lobby (renamed)");
    assert_eq!(form.endpoint(), "https://example.com/lobby");
    assert_eq!(form.selected_events().len(), 2);
}

#[tokio::test]
async fn test_submit_edit_sends_carried_unknown_event() {
    let registry = FakeRegistry::with_records(vec![existing()]);
    let form = FormSession::open(FormMode::Edit(existing()));

    let saved = form.submit(&registry).await.unwrap();
    assert!(saved
        .events
        .contains(&EventType::Other("access.visitor.arrived".to_string())));
}
