use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://py-api-neon-one.vercel.app/".to_string()
}

fn default_timeout_seconds() -> u64 {
    100
}

/// Remote query endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Applied to connect and to the whole request
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
