use serde::{Deserialize, Serialize};

fn default_prompt() -> String {
    "glance> ".to_string()
}

fn default_show_stage() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Print pipeline stage transitions
    #[serde(default = "default_show_stage")]
    pub show_stage: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            show_stage: default_show_stage(),
        }
    }
}
