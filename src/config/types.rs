use serde::{Deserialize, Serialize};

/// Environment variable consulted when no app id is configured.
pub const APP_ID_ENV_VAR: &str = "WOLFRAM_ALPHA_APP_ID";

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
}

/// Settings for the external nth-prime service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Query endpoint (e.g., "https://api.wolframalpha.com/v2/query").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Application id sent with every query.
    #[serde(default)]
    pub app_id: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://api.wolframalpha.com/v2/query".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    5
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            app_id: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl LookupConfig {
    /// App id from config, falling back to the environment.
    pub fn resolved_app_id(&self) -> Option<String> {
        self.app_id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| std::env::var(APP_ID_ENV_VAR).ok())
            .filter(|id| !id.is_empty())
    }
}
