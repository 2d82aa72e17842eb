use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use glance_config::camera::CameraConfig;
use glance_config::gallery::GalleryConfig;
use glance_types::{ImageHandle, ImageOrigin};
use tokio::process::Command;
use uuid::Uuid;

use crate::probe::probe_image;

/// Outcome of one picker run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    Picked(ImageHandle),
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("No command configured for {0}")]
    NoCommand(&'static str),

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a readable image: {path}: {source}")]
    NotAnImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Something that can hand over an image
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// `path` is a selection the user already made, if any
    async fn acquire(&self, path: Option<PathBuf>) -> Result<Acquisition, CaptureError>;
}

/// Runs an external capture program that writes to a fresh destination file
pub struct CameraSource {
    command: Vec<String>,
    captures_dir: PathBuf,
}

impl CameraSource {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            command: config.capture_command.clone(),
            captures_dir: config.captures_dir.clone(),
        }
    }

    fn destination(&self) -> PathBuf {
        self.captures_dir.join(format!("{}.jpg", Uuid::new_v4()))
    }
}

#[async_trait]
impl ImageSource for CameraSource {
    async fn acquire(&self, _path: Option<PathBuf>) -> Result<Acquisition, CaptureError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or(CaptureError::NoCommand("camera"))?;

        tokio::fs::create_dir_all(&self.captures_dir).await?;
        let output = self.destination();
        let output_str = output.to_string_lossy();
        let args: Vec<String> = args
            .iter()
            .map(|arg| arg.replace("{output}", &output_str))
            .collect();

        tracing::debug!("Camera capture: {} {:?}", program, args);
        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| CaptureError::Launch {
                program: program.clone(),
                source,
            })?;

        let written = tokio::fs::metadata(&output)
            .await
            .map(|m| m.len() > 0)
            .unwrap_or(false);

        if !status.success() || !written {
            tracing::info!("Camera capture cancelled ({status})");
            // Leave no empty destination behind
            let _ = tokio::fs::remove_file(&output).await;
            return Ok(Acquisition::Cancelled);
        }

        match handle_for(output.clone(), ImageOrigin::Camera) {
            Ok(handle) => Ok(Acquisition::Picked(handle)),
            Err(e) => {
                let _ = tokio::fs::remove_file(&output).await;
                Err(e)
            }
        }
    }
}

/// Gallery selection through an external file chooser
pub struct GallerySource {
    command: Vec<String>,
}

impl GallerySource {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            command: config.picker_command.clone(),
        }
    }

    async fn run_picker(&self) -> Result<Option<PathBuf>, CaptureError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or(CaptureError::NoCommand("gallery"))?;

        tracing::debug!("Gallery picker: {} {:?}", program, args);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CaptureError::Launch {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from))
    }
}

#[async_trait]
impl ImageSource for GallerySource {
    async fn acquire(&self, path: Option<PathBuf>) -> Result<Acquisition, CaptureError> {
        let chosen = match path {
            Some(path) => Some(path),
            None => self.run_picker().await?,
        };

        match chosen {
            Some(path) => handle_for(path, ImageOrigin::Gallery).map(Acquisition::Picked),
            None => {
                tracing::info!("Gallery selection cancelled");
                Ok(Acquisition::Cancelled)
            }
        }
    }
}

fn handle_for(path: PathBuf, origin: ImageOrigin) -> Result<ImageHandle, CaptureError> {
    let (width, height) = probe_image(Path::new(&path)).map_err(|source| {
        CaptureError::NotAnImage {
            path: path.clone(),
            source,
        }
    })?;
    Ok(ImageHandle::new(path, origin, width, height))
}
