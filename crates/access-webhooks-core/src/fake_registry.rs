//! In-memory registry used by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use access_webhooks_protocols::{RegistryError, WebhookDraft, WebhookEndpoint, WebhookRegistry};

/// Behaves like the remote registry: assigns ids, replaces on update and
/// reports missing ids as not found. Counts every call.
#[derive(Default)]
pub struct FakeRegistry {
    records: Mutex<Vec<WebhookEndpoint>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    offline: Mutex<bool>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<WebhookEndpoint>) -> Self {
        let registry = Self::new();
        *registry.records.lock() = records;
        registry
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    /// Remove a record behind the client's back.
    pub fn remove_externally(&self, id: &str) {
        self.records.lock().retain(|r| r.id != id);
    }

    fn enter(&self) -> Result<(), RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.offline.lock() {
            return Err(RegistryError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl WebhookRegistry for FakeRegistry {
    async fn list(&self) -> Result<Vec<WebhookEndpoint>, RegistryError> {
        self.enter()?;
        Ok(self.records.lock().clone())
    }

    async fn create(&self, draft: &WebhookDraft) -> Result<WebhookEndpoint, RegistryError> {
        self.enter()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = draft.clone().into_endpoint(format!("wh-{}", n));
        self.records.lock().push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: &str,
        draft: &WebhookDraft,
    ) -> Result<WebhookEndpoint, RegistryError> {
        self.enter()?;
        let mut records = self.records.lock();
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        *slot = draft.clone().into_endpoint(id);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RegistryError> {
        self.enter()?;
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
