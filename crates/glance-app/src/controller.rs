use glance_config::ui::UiConfig;
use glance_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::PipelineContext;
use crate::events::event_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // display and stage updates
            ui_to_app: kanal::bounded_async(64),  // typed commands
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    ctx: PipelineContext,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(ctx: PipelineContext) -> Self {
        Self {
            channels: ChannelSet::new(),
            ctx,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Backend event loop only; the caller drives the front-end side of the channels
    pub fn spawn_backend(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        tasks.spawn(event_loop(
            self.ctx.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            // Quit in the event loop ends the whole session
            self.cancel_token.clone(),
        ));
        tasks
    }

    /// Event loop plus the terminal front-end
    pub fn spawn_tasks(&self, ui_config: UiConfig) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = self.spawn_backend();

        tasks.spawn(glance_ui::ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            ui_config,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Front-end ends of the channels, for drivers other than the terminal
    pub fn frontend(&self) -> (AsyncReceiver<AppEvent>, AsyncSender<AppEvent>) {
        (
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
        )
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
