/// UI-specific state (separate from AppState)
#[derive(Debug, Default)]
pub struct UiState {
    /// Next line answers the camera permission prompt
    pub awaiting_permission: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}
