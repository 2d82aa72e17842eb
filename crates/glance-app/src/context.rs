use std::sync::Arc;

use glance_config::Config;
use glance_genai::{GenaiClient, HttpGenaiClient};
use glance_ocr::{
    CameraPermission, CameraSource, GallerySource, ImageSource, TesseractRecognizer,
    TextRecognizer,
};
use glance_types::ImageOrigin;

/// Collaborators the pipeline talks to
///
/// Built once at startup and handed to the event loop. Every field is a shared
/// handle, so cloning only bumps reference counts.
#[derive(Clone)]
pub struct PipelineContext {
    pub camera: Arc<dyn ImageSource>,
    pub gallery: Arc<dyn ImageSource>,
    pub recognizer: Arc<dyn TextRecognizer>,
    pub genai: Arc<dyn GenaiClient>,
    pub permission: Arc<CameraPermission>,
    pub truncate_at_period: bool,
}

impl PipelineContext {
    /// Production collaborators from config
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let genai = HttpGenaiClient::new(&config.network, &config.genai)?;
        tracing::info!("Remote endpoint: {}", genai.metadata().endpoint);

        Ok(Self {
            camera: Arc::new(CameraSource::new(&config.camera)),
            gallery: Arc::new(GallerySource::new(&config.gallery)),
            recognizer: Arc::new(TesseractRecognizer::new(&config.ocr)),
            genai: Arc::new(genai),
            permission: Arc::new(CameraPermission::new(config.camera.permission_granted)),
            truncate_at_period: config.genai.truncate_at_period,
        })
    }

    pub fn source(&self, origin: ImageOrigin) -> Arc<dyn ImageSource> {
        match origin {
            ImageOrigin::Camera => self.camera.clone(),
            ImageOrigin::Gallery => self.gallery.clone(),
        }
    }
}
