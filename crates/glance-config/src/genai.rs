use serde::{Deserialize, Serialize};

fn default_truncate_at_period() -> bool {
    true
}

fn default_route() -> String {
    "api/genai".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenaiConfig {
    /// Path prefix, the message is appended as one more segment
    #[serde(default = "default_route")]
    pub route: String,
    /// Cut the rendered reply before its first '.'
    #[serde(default = "default_truncate_at_period")]
    pub truncate_at_period: bool,
}

impl Default for GenaiConfig {
    fn default() -> Self {
        Self {
            route: default_route(),
            truncate_at_period: default_truncate_at_period(),
        }
    }
}
