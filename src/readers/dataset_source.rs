use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::models::MeteoriteRecord;

/// Somewhere the complete landing dataset can be fetched from in one go.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human-readable origin, used in logs and the load report.
    fn describe(&self) -> String;

    /// Fetch and decode every record, in source order.
    async fn fetch(&self) -> Result<Vec<MeteoriteRecord>>;
}

/// Decode a dataset payload: a JSON array of record objects.
pub fn parse_dataset(payload: &[u8]) -> Result<Vec<MeteoriteRecord>> {
    Ok(serde_json::from_slice(payload)?)
}

/// Single GET against the published endpoint.
#[derive(Debug)]
pub struct HttpDatasetSource {
    client: Client,
    url: String,
    user_agent: String,
}

impl HttpDatasetSource {
    pub fn new(url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Use a preconfigured client, e.g. one with timeouts or proxy settings.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn network_error(&self, source: reqwest::Error) -> ProcessingError {
        match source.status() {
            Some(status) => ProcessingError::Http {
                url: self.url.clone(),
                status: status.as_u16(),
            },
            None => ProcessingError::Network {
                url: self.url.clone(),
                source,
            },
        }
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<MeteoriteRecord>> {
        info!(url = %self.url, "Fetching meteorite dataset");

        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.network_error(e))?;

        let body = response.bytes().await.map_err(|e| self.network_error(e))?;
        debug!(bytes = body.len(), "Dataset payload received");

        parse_dataset(&body)
    }
}

/// Reads a previously downloaded copy of the dataset from disk.
#[derive(Debug, Clone)]
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<MeteoriteRecord>> {
        info!(path = %self.path.display(), "Reading meteorite dataset from file");
        let payload = tokio::fs::read(&self.path).await?;
        parse_dataset(&payload)
    }
}

/// Serves a fixed record list; for library callers that already hold data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatasetSource {
    records: Vec<MeteoriteRecord>,
}

impl InMemoryDatasetSource {
    pub fn new(records: Vec<MeteoriteRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DatasetSource for InMemoryDatasetSource {
    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.records.len())
    }

    async fn fetch(&self) -> Result<Vec<MeteoriteRecord>> {
        Ok(self.records.clone())
    }
}
