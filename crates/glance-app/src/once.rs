use std::path::PathBuf;

use anyhow::{Context, bail};
use glance_types::{AppEvent, DisplayKind, DisplayUpdate, ImageSourceChoice};
use kanal::{AsyncReceiver, AsyncSender};

/// Headless single attempt: select `image`, recognize, query.
///
/// Every display transition is passed to `on_display`; the final one is returned.
pub async fn drive_once(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    image: PathBuf,
    mut on_display: impl FnMut(&DisplayUpdate),
) -> anyhow::Result<DisplayUpdate> {
    ui_to_app_tx
        .send(AppEvent::SelectImageSource(ImageSourceChoice::Gallery(Some(
            image,
        ))))
        .await?;

    loop {
        let event = app_to_ui_rx
            .recv()
            .await
            .context("pipeline stopped before finishing")?;

        match event {
            AppEvent::ImageSelected(handle) => {
                tracing::info!("Selected {} ({}x{})", handle.path.display(), handle.width, handle.height);
                ui_to_app_tx.send(AppEvent::RecognizeAndQuery).await?;
            }
            AppEvent::Display(update) => {
                on_display(&update);
                if update.kind != DisplayKind::Recognized {
                    return Ok(update);
                }
            }
            AppEvent::Notice(message) => bail!(message),
            AppEvent::StageChanged(stage) => tracing::debug!("Stage: {}", stage),
            _ => {}
        }
    }
}
