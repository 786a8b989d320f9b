//! Display snapshot of the registry collection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use access_webhooks_protocols::WebhookEndpoint;

/// The collection as last listed, in registry order.
///
/// Never edited in place; the manager swaps in a new one after each
/// successful list.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    endpoints: Vec<WebhookEndpoint>,
    fetched_at: Option<DateTime<Utc>>,
}

/// One line of the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub id: String,
    pub name: String,
    pub endpoint: String,
    pub events: String,
}

impl Snapshot {
    pub fn new(endpoints: Vec<WebhookEndpoint>) -> Self {
        Self {
            endpoints,
            fetched_at: Some(Utc::now()),
        }
    }

    pub fn endpoints(&self) -> &[WebhookEndpoint] {
        &self.endpoints
    }

    pub fn find(&self, id: &str) -> Option<&WebhookEndpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// `None` until the first successful list.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn rows(&self) -> Vec<DisplayRow> {
        self.endpoints
            .iter()
            .map(|e| DisplayRow {
                id: e.id.clone(),
                name: e.name.clone(),
                endpoint: e.endpoint.clone(),
                events: e.events_label(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_webhooks_protocols::EventType;

    fn endpoint(id: &str, events: &[&str]) -> WebhookEndpoint {
        WebhookEndpoint {
            id: id.to_string(),
            name: format!("hook {}", id),
            endpoint: format!("https://example.com/{}", id),
            events: events.iter().map(|e| EventType::from(*e)).collect(),
        }
    }

    #[test]
    fn test_default_is_unfetched() {
        let snapshot = Snapshot::default();
        assert!(snapshot.is_empty());
        assert!(snapshot.fetched_at().is_none());
    }

    #[test]
    fn test_new_records_fetch_time() {
        let snapshot = Snapshot::new(vec![]);
        assert!(snapshot.fetched_at().is_some());
    }

    #[test]
    fn test_keeps_registry_order() {
        let snapshot = Snapshot::new(vec![endpoint("b", &[]), endpoint("a", &[])]);
        let ids: Vec<&str> = snapshot.endpoints().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_find() {
        let snapshot = Snapshot::new(vec![endpoint("a", &[]), endpoint("b", &[])]);
        assert_eq!(snapshot.find("b").map(|e| e.name.as_str()), Some("hook b"));
        assert!(snapshot.find("c").is_none());
    }

    #[test]
    fn test_rows_join_events() {
        let snapshot = Snapshot::new(vec![endpoint(
            "a",
            &["access.door.unlock", "vendor.custom", "access.doorbell.incoming"],
        )]);
        let rows = snapshot.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].events,
            "access.doorbell.incoming, access.door.unlock, vendor.custom"
        );
        assert_eq!(rows[0].endpoint, "https://example.com/a");
    }
}
