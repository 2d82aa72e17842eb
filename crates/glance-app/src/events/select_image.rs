use std::path::PathBuf;

use glance_ocr::{Acquisition, CaptureError};
use glance_types::{AppEvent, ImageOrigin, ImageSourceChoice, PipelineStage};

use super::{Pipeline, PipelineEvent};

impl Pipeline {
    pub(crate) async fn select_image_source(&mut self, choice: ImageSourceChoice) {
        match choice {
            ImageSourceChoice::Camera => {
                if self.ctx.permission.is_granted() {
                    self.start_acquisition(ImageOrigin::Camera, None).await;
                } else {
                    tracing::info!("Camera permission missing, asking");
                    self.state.camera_pending = true;
                    self.notify(AppEvent::PermissionPrompt).await;
                }
            }
            ImageSourceChoice::Gallery(path) => {
                self.start_acquisition(ImageOrigin::Gallery, path).await;
            }
        }
    }

    pub(crate) async fn start_acquisition(&mut self, origin: ImageOrigin, path: Option<PathBuf>) {
        tracing::debug!(">>> [SOURCE] Acquiring from {:?}", origin);
        self.set_stage(PipelineStage::AwaitingImage).await;

        let source = self.ctx.source(origin);
        self.spawn_work(
            None,
            async move { source.acquire(path).await },
            move |result| PipelineEvent::ImageAcquired { origin, result },
        );
    }

    pub(crate) async fn image_acquired(
        &mut self,
        origin: ImageOrigin,
        result: Result<Acquisition, CaptureError>,
    ) {
        match result {
            Ok(Acquisition::Picked(handle)) => {
                tracing::info!(
                    ">>> [SOURCE] {:?} image {} ({}x{})",
                    origin,
                    handle.path.display(),
                    handle.width,
                    handle.height
                );
                self.state.image = Some(handle.clone());
                self.notify(AppEvent::ImageSelected(handle)).await;
            }
            Ok(Acquisition::Cancelled) => {
                self.notice("Cancelled").await;
            }
            Err(e) => {
                tracing::error!(">>> [SOURCE] {:?} failed: {}", origin, e);
                self.notice(format!("Error: {e}")).await;
            }
        }

        self.settle_after_acquisition().await;
    }

    pub(crate) async fn settle_after_acquisition(&mut self) {
        let stage = if self.state.image.is_some() {
            PipelineStage::ImageReady
        } else {
            PipelineStage::Idle
        };
        self.set_stage(stage).await;
    }
}
