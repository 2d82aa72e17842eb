use std::process::Stdio;

use async_trait::async_trait;
use glance_config::ocr::OcrConfig;
use glance_types::ImageHandle;
use tokio::process::Command;

use crate::probe::probe_image;

/// Text recognition interface
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &ImageHandle) -> Result<String, RecognizeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    #[error("Cannot read image {path}: {reason}")]
    UnreadableImage { path: String, reason: String },

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Recognizer exited with {status}: {stderr}")]
    EngineFailed { status: String, stderr: String },
}

/// Recognizer backed by the `tesseract` executable
pub struct TesseractRecognizer {
    program: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            program: config.tesseract_bin.clone(),
            language: config.language.clone(),
        }
    }

    /// Get the recognizer language for this engine
    pub fn language(&self) -> &str {
        &self.language
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &ImageHandle) -> Result<String, RecognizeError> {
        probe_image(&image.path).map_err(|e| RecognizeError::UnreadableImage {
            path: image.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let output = Command::new(&self.program)
            .arg(&image.path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| RecognizeError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RecognizeError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        tracing::debug!("Recognized {} chars from {}", text.len(), image.path.display());
        Ok(text)
    }
}
