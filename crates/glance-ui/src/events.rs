use glance_config::ui::UiConfig;
use glance_types::{AppEvent, DisplayKind};

use crate::state::UiState;

/// Apply an app event to the terminal state, returning the text to print
pub fn handle_event(state: &mut UiState, config: &UiConfig, event: AppEvent) -> Option<String> {
    match event {
        AppEvent::BackendReady => {
            tracing::debug!("[UI] Backend ready");
            Some("Ready. Type `help` for commands.".to_string())
        }
        AppEvent::ImageSelected(handle) => Some(format!(
            "[image] {} ({}x{}, {:?})",
            handle.path.display(),
            handle.width,
            handle.height,
            handle.origin
        )),
        AppEvent::Display(update) => {
            let label = match update.kind {
                DisplayKind::Recognized => "recognized",
                DisplayKind::Reply => "reply",
                DisplayKind::Failure => "error",
            };
            Some(format!("[{label}] {}", update.text))
        }
        AppEvent::Notice(message) => Some(format!("(!) {message}")),
        AppEvent::PermissionPrompt => {
            state.awaiting_permission = true;
            Some("Allow camera access? [y/N]".to_string())
        }
        AppEvent::StageChanged(stage) => config.show_stage.then(|| format!("[stage] {stage}")),
        AppEvent::SelectImageSource(_)
        | AppEvent::RecognizeAndQuery
        | AppEvent::PermissionAnswer { .. }
        | AppEvent::Quit => {
            tracing::debug!("[UI] Ignoring backend-bound event {:?}", event);
            None
        }
    }
}
