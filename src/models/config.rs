//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_ai_timeout_secs() -> u64 {
    60
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    pub ai_service_url: String,
    #[serde(default)]
    pub ai_api_key: Option<String>,
    #[serde(default = "default_ai_timeout_secs")]
    pub ai_timeout_secs: u64,
}
