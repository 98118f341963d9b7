//! Transport seam between the client core and the inference backend.
//!
//! The backend is consumed purely through four operations; everything above
//! this module talks to the [`InferenceBackend`] trait so tests can swap in
//! an in-memory implementation. [`HttpBackend`] is the production
//! implementation over `reqwest`. No operation retries on failure; the
//! sync loop's next tick is the retry policy.

use async_trait::async_trait;
use echoform_protocol::DashboardPage;
use echoform_protocol::EntropyStatus;
use echoform_protocol::EntrySubmission;
use echoform_protocol::LogsPage;
use reqwest::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ClientConfig;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned status {0}")]
    Status(StatusCode),
}

/// The four operations the client-side core requires of the backend.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn fetch_dashboard(&self) -> Result<DashboardPage, TransportError>;
    async fn fetch_entropy(&self) -> Result<EntropyStatus, TransportError>;
    async fn fetch_logs(&self, limit: usize) -> Result<LogsPage, TransportError>;
    async fn submit_entry(&self, entry: &EntrySubmission) -> Result<(), TransportError>;
}

/// HTTP implementation of [`InferenceBackend`] against a configurable base
/// URL.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl InferenceBackend for HttpBackend {
    async fn fetch_dashboard(&self) -> Result<DashboardPage, TransportError> {
        self.get_json("/dashboard").await
    }

    async fn fetch_entropy(&self) -> Result<EntropyStatus, TransportError> {
        self.get_json("/entropy-check").await
    }

    async fn fetch_logs(&self, limit: usize) -> Result<LogsPage, TransportError> {
        self.get_json(&format!("/inference-logs?limit={limit}")).await
    }

    async fn submit_entry(&self, entry: &EntrySubmission) -> Result<(), TransportError> {
        let url = format!("{}/entry", self.base_url);
        let response = self.client.post(url).json(entry).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }
        // The acknowledgement body is not consumed by this core.
        Ok(())
    }
}
