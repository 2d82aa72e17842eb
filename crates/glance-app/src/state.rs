use glance_types::{AttemptId, ImageHandle, PipelineStage};

/// Pipeline state, owned and mutated by the event loop only
#[derive(Debug, Default)]
pub struct AppState {
    /// Most recently acquired image
    pub image: Option<ImageHandle>,
    /// Last text written to the display field
    pub display: Option<String>,
    /// Generation of the newest recognize-and-query attempt
    pub attempt: AttemptId,
    pub stage: PipelineStage,
    /// A camera request is parked until the permission prompt is answered
    pub camera_pending: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new attempt, superseding any in flight
    pub fn begin_attempt(&mut self) -> AttemptId {
        self.attempt = self.attempt.next();
        self.attempt
    }

    pub fn is_current(&self, attempt: AttemptId) -> bool {
        self.attempt == attempt
    }
}
