//! Remote backend configuration

use serde::Deserialize;

/// Connection settings for the remote backend
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    /// Backend base URL, e.g. `https://abc123.backend.example`
    pub base_url: String,
    /// Service key sent as a bearer token
    pub service_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl RemoteConfig {
    /// Loads configuration from `REMOTE_*` environment variables
    ///
    /// A `.env` file is read first if present, so local development does not
    /// need exported variables.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        config::Config::builder()
            .add_source(config::Environment::with_prefix("REMOTE"))
            .build()?
            .try_deserialize()
    }
}
