use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_RECOMMENDATIONS_PATH: &str = "/recommendations";
pub const DEFAULT_FEEDBACK_PATH: &str = "/feedback";
pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("soundsage")
}

pub fn get_config_file_path() -> PathBuf {
    get_config_dir().join("client.json")
}

/// Where the recommendation list comes from.
///
/// Backend choice is pure configuration: the same session logic runs against
/// the live recommender service or a pre-generated snapshot file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OriginConfig {
    /// Live recommender service endpoint
    Api { url: String },
    /// Static snapshot file on disk
    Snapshot { path: PathBuf },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub origin: OriginConfig,
    pub feedback_url: String,
    /// Forwarded to the backend on fetch (query parameter) and feedback
    /// (body field) when present. No authentication semantics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECONDS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: OriginConfig::Api {
                url: format!("{}{}", DEFAULT_BASE_URL, DEFAULT_RECOMMENDATIONS_PATH),
            },
            feedback_url: format!("{}{}", DEFAULT_BASE_URL, DEFAULT_FEEDBACK_PATH),
            user_id: None,
            request_timeout_secs: REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Read the config file if one exists, falling back to defaults.
    ///
    /// A malformed file is logged and ignored rather than failing startup.
    pub fn load() -> Self {
        let path = get_config_file_path();
        let Ok(raw) = fs::read_to_string(&path) else {
            return Self::default();
        };

        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(
            config.origin,
            OriginConfig::Api {
                url: "http://127.0.0.1:8080/recommendations".to_string()
            }
        );
        assert_eq!(config.feedback_url, "http://127.0.0.1:8080/feedback");
        assert_eq!(config.user_id, None);
    }

    #[test]
    fn test_parse_snapshot_origin() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "origin": {"kind": "snapshot", "path": "/var/lib/soundsage/songs.json"},
                "feedback_url": "http://127.0.0.1:8080/feedback"
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.origin,
            OriginConfig::Snapshot {
                path: PathBuf::from("/var/lib/soundsage/songs.json")
            }
        );
        // Omitted fields fall back
        assert_eq!(config.request_timeout_secs, REQUEST_TIMEOUT_SECONDS);
        assert_eq!(config.user_id, None);
    }

    #[test]
    fn test_parse_api_origin_with_user() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "origin": {"kind": "api", "url": "https://sage.example/recommendations"},
                "feedback_url": "https://sage.example/feedback",
                "user_id": "1",
                "request_timeout_secs": 3
            }"#,
        )
        .unwrap();

        assert_eq!(config.user_id.as_deref(), Some("1"));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }
}
