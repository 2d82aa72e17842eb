use serde::{Deserialize, Serialize};

fn default_picker_command() -> Vec<String> {
    vec![
        "zenity".to_string(),
        "--file-selection".to_string(),
        "--title=Pick Image From".to_string(),
        "--file-filter=*.png *.jpg *.jpeg *.bmp *.webp".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// File chooser that prints the chosen path on stdout
    #[serde(default = "default_picker_command")]
    pub picker_command: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            picker_command: default_picker_command(),
        }
    }
}
