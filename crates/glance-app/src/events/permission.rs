use glance_types::ImageOrigin;

use super::Pipeline;

impl Pipeline {
    /// Answer to the camera permission prompt; a grant retries the camera pick
    pub(crate) async fn permission_answered(&mut self, granted: bool) {
        if !std::mem::take(&mut self.state.camera_pending) {
            tracing::debug!("Permission answer without a pending camera request");
            return;
        }

        if granted {
            self.ctx.permission.grant();
            self.start_acquisition(ImageOrigin::Camera, None).await;
        } else {
            self.ctx.permission.deny();
            self.notice("Camera permission is required").await;
        }
    }
}
