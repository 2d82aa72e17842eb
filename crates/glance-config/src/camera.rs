use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_capture_command() -> Vec<String> {
    vec![
        "fswebcam".to_string(),
        "--no-banner".to_string(),
        "{output}".to_string(),
    ]
}

fn default_captures_dir() -> PathBuf {
    std::env::temp_dir().join("glance-captures")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Program and arguments; `{output}` is replaced by the destination path
    #[serde(default = "default_capture_command")]
    pub capture_command: Vec<String>,
    #[serde(default = "default_captures_dir")]
    pub captures_dir: PathBuf,
    /// Camera access state at startup
    #[serde(default)]
    pub permission_granted: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            capture_command: default_capture_command(),
            captures_dir: default_captures_dir(),
            permission_granted: false,
        }
    }
}
