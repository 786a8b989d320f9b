//! HTTP registry implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Certificate, Client, Method, Url};
use tracing::{debug, info, warn};

use access_webhooks_protocols::{RegistryError, WebhookDraft, WebhookEndpoint, WebhookRegistry};

use crate::api::{EndpointPayload, Envelope, RecordData};
use crate::error::BuildError;
use crate::response::{interpret, Operation};

/// Collection path under the controller host.
pub const ENDPOINTS_PATH: &str = "/api/v1/developer/webhooks/endpoints";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`HttpRegistry`].
#[derive(Debug, Clone)]
pub struct HttpRegistryConfig {
    pub host: String,
    pub token: String,
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
    pub ca_cert_pem: Option<Vec<u8>>,
}

impl HttpRegistryConfig {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
            ca_cert_pem: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Trust an additional PEM-encoded CA certificate.
    pub fn with_ca_cert_pem(mut self, pem: Vec<u8>) -> Self {
        self.ca_cert_pem = Some(pem);
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// Webhook registry backed by the developer REST API.
pub struct HttpRegistry {
    collection_url: Url,
    token: String,
    client: Client,
}

impl std::fmt::Debug for HttpRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRegistry")
            .field("collection_url", &self.collection_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpRegistry {
    pub fn new(config: HttpRegistryConfig) -> Result<Self, BuildError> {
        let host = config.host.trim().trim_end_matches('/');
        let collection_url = Url::parse(&format!("{}{}", host, ENDPOINTS_PATH)).map_err(|e| {
            BuildError::InvalidHost {
                host: config.host.clone(),
                message: e.to_string(),
            }
        })?;

        let mut builder = Client::builder().timeout(config.timeout);

        if let Some(ref pem) = config.ca_cert_pem {
            let cert = Certificate::from_pem(pem)
                .map_err(|e| BuildError::InvalidCertificate(e.to_string()))?;
            builder = builder.add_root_certificate(cert);
        }

        if config.accept_invalid_certs {
            warn!(
                "TLS certificate verification is disabled for {}",
                collection_url.host_str().unwrap_or(host)
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| BuildError::Client(e.to_string()))?;

        Ok(Self {
            collection_url,
            token: config.token,
            client,
        })
    }

    /// URL of the endpoints collection.
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn item_url(&self, id: &str) -> Result<Url, RegistryError> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| RegistryError::Unavailable(format!("cannot address webhook {}", id)))?
            .push(id);
        Ok(url)
    }

    async fn send(
        &self,
        op: Operation<'_>,
        method: Method,
        url: Url,
        payload: Option<&EndpointPayload<'_>>,
    ) -> Result<Envelope, RegistryError> {
        debug!("{} {}", method, url.path());

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        debug!("{:?} -> HTTP {}", op, status);
        interpret(op, status, &body)
    }
}

fn transport_error(e: reqwest::Error) -> RegistryError {
    if e.is_timeout() {
        RegistryError::Unavailable(format!("request timed out: {}", e))
    } else {
        RegistryError::Unavailable(e.to_string())
    }
}

fn decode_record(envelope: Envelope, draft: &WebhookDraft) -> Result<Option<WebhookEndpoint>, RegistryError> {
    match envelope.data {
        Some(serde_json::Value::Object(map)) if map.contains_key("id") => {
            let record: RecordData = serde_json::from_value(serde_json::Value::Object(map))
                .map_err(|e| RegistryError::Rejected(format!("malformed webhook record: {}", e)))?;
            Ok(Some(record.merge(draft)))
        }
        _ => Ok(None),
    }
}

#[async_trait]
impl WebhookRegistry for HttpRegistry {
    async fn list(&self) -> Result<Vec<WebhookEndpoint>, RegistryError> {
        let envelope = self
            .send(Operation::List, Method::GET, self.collection_url.clone(), None)
            .await?;

        let endpoints: Vec<WebhookEndpoint> = match envelope.data {
            Some(data) if !data.is_null() => serde_json::from_value(data)
                .map_err(|e| RegistryError::Rejected(format!("malformed webhook list: {}", e)))?,
            _ => Vec::new(),
        };
        debug!("Listed {} webhook endpoint(s)", endpoints.len());
        Ok(endpoints)
    }

    async fn create(&self, draft: &WebhookDraft) -> Result<WebhookEndpoint, RegistryError> {
        let payload = EndpointPayload::from(draft);
        let envelope = self
            .send(
                Operation::Create,
                Method::POST,
                self.collection_url.clone(),
                Some(&payload),
            )
            .await?;

        let created = decode_record(envelope, draft)?.ok_or_else(|| {
            RegistryError::Rejected("response did not include the created webhook".to_string())
        })?;
        info!("Created webhook endpoint {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn update(
        &self,
        id: &str,
        draft: &WebhookDraft,
    ) -> Result<WebhookEndpoint, RegistryError> {
        let payload = EndpointPayload::from(draft);
        let url = self.item_url(id)?;
        let envelope = self
            .send(Operation::Update(id), Method::PUT, url, Some(&payload))
            .await?;

        let updated = decode_record(envelope, draft)?
            .unwrap_or_else(|| draft.clone().into_endpoint(id));
        info!("Updated webhook endpoint {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), RegistryError> {
        let url = self.item_url(id)?;
        self.send(Operation::Delete(id), Method::DELETE, url, None)
            .await?;
        info!("Deleted webhook endpoint {}", id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
