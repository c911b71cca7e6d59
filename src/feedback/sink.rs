use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::REQUEST_TIMEOUT_SECONDS;
use crate::errors::FetchError;
use crate::models::FeedbackRecord;

/// Delivery channel for rating feedback.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Short identifier for logging (e.g., "http")
    fn id(&self) -> &str;

    /// Deliver one record. Any success status acknowledges; the response
    /// body is not interpreted.
    async fn deliver(&self, record: &FeedbackRecord) -> Result<(), FetchError>;
}

/// Posts feedback records to the backend as JSON.
pub struct HttpSink {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECONDS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl FeedbackSink for HttpSink {
    fn id(&self) -> &str {
        "http"
    }

    async fn deliver(&self, record: &FeedbackRecord) -> Result<(), FetchError> {
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(record)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rating, Song};

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let sink = HttpSink::new("http://192.0.2.1/feedback").with_timeout(Duration::from_millis(200));
        let record = FeedbackRecord {
            rating: Rating::new(4).unwrap(),
            song: Song {
                name: "Song A".to_string(),
                artists: vec!["Artist X".to_string()],
                danceability: 0.8,
                energy: 0.6,
                valence: 0.5,
            },
            user_id: None,
        };

        match sink.deliver(&record).await {
            Err(FetchError::Transport(_)) => {}
            other => panic!("expected Transport error, got {:?}", other),
        }
    }
}
