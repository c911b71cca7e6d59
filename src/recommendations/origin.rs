use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ClientConfig, OriginConfig, REQUEST_TIMEOUT_SECONDS};
use crate::errors::FetchError;

/// A backend the recommendation list can be fetched from.
///
/// Implementations return the raw payload; shape normalization is the
/// source's job so every origin feeds the same pipeline.
#[async_trait]
pub trait RecommendationOrigin: Send + Sync {
    /// Short identifier for logging (e.g., "api", "snapshot")
    fn id(&self) -> &str;

    async fn fetch(&self) -> Result<Value, FetchError>;
}

/// Live recommender service reached over HTTP.
pub struct ApiOrigin {
    client: Client,
    url: String,
    user_id: Option<String>,
    timeout: Duration,
}

impl ApiOrigin {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            user_id: None,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECONDS),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl RecommendationOrigin for ApiOrigin {
    fn id(&self) -> &str {
        "api"
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let mut request = self.client.get(&self.url).timeout(self.timeout);
        if let Some(ref user_id) = self.user_id {
            request = request.query(&[("user_id", user_id.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Shape(e.to_string()))
    }
}

/// Pre-generated snapshot file on disk.
///
/// Lets the client run against a canned song store when no recommender
/// service is reachable; the file holds either payload shape.
pub struct SnapshotOrigin {
    path: PathBuf,
}

impl SnapshotOrigin {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecommendationOrigin for SnapshotOrigin {
    fn id(&self) -> &str {
        "snapshot"
    }

    async fn fetch(&self) -> Result<Value, FetchError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| FetchError::Resource(format!("{}: {}", self.path.display(), e)))?;

        serde_json::from_str(&raw).map_err(|e| FetchError::Shape(e.to_string()))
    }
}

/// Build the origin selected by configuration.
pub fn origin_from_config(config: &ClientConfig) -> Arc<dyn RecommendationOrigin> {
    match &config.origin {
        OriginConfig::Api { url } => {
            let mut origin = ApiOrigin::new(url.clone()).with_timeout(config.request_timeout());
            if let Some(user_id) = &config.user_id {
                origin = origin.with_user(user_id.clone());
            }
            Arc::new(origin)
        }
        OriginConfig::Snapshot { path } => Arc::new(SnapshotOrigin::new(path.clone())),
    }
}
