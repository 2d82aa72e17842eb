use std::io::BufRead;

use glance_config::ui::UiConfig;
use glance_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

mod commands;
mod events;
mod state;

pub use commands::{Command, HELP, parse_line};
pub use events::handle_event;
pub use state::UiState;

/// Terminal front-end on stdin/stdout
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: UiConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let input = spawn_stdin_reader()?;
    let output = tokio::io::stdout();
    run_terminal(input, output, app_to_ui_rx, ui_to_app_tx, config, cancel).await
}

/// Blocking stdin reader on a plain thread, one message per line.
///
/// The runtime never owns this thread, so a read still pending at shutdown
/// does not hold the process open. The channel closes at end of input.
pub fn spawn_stdin_reader() -> std::io::Result<AsyncReceiver<String>> {
    let (tx, rx) = kanal::bounded::<String>(16);

    std::thread::Builder::new()
        .name("glance-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("[UI] Failed to read stdin: {e}");
                        break;
                    }
                }
            }
            tracing::debug!("[UI] Stdin reader finished");
        })?;

    Ok(rx.to_async())
}

/// Drives the front-end from a channel of input lines and any writer
pub async fn run_terminal<W>(
    input: AsyncReceiver<String>,
    mut output: W,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: UiConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut state = UiState::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[UI] Cancelled");
                break;
            }
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::debug!("[UI] App channel closed");
                    break;
                };
                if let Some(text) = handle_event(&mut state, &config, event) {
                    write_line(&mut output, &text).await?;
                    write_prompt(&mut output, &config, &state).await?;
                }
            }
            line = input.recv(), if input_open => {
                let Ok(line) = line else {
                    // End of input ends the session
                    input_open = false;
                    let _ = ui_to_app_tx.send(AppEvent::Quit).await;
                    continue;
                };

                match parse_line(&line, state.awaiting_permission) {
                    Command::Send(event) => {
                        if matches!(event, AppEvent::PermissionAnswer { .. }) {
                            state.awaiting_permission = false;
                        }
                        let quit = event == AppEvent::Quit;
                        ui_to_app_tx.send(event).await?;
                        if quit {
                            input_open = false;
                        }
                    }
                    Command::Help => {
                        write_line(&mut output, HELP).await?;
                        write_prompt(&mut output, &config, &state).await?;
                    }
                    Command::Nothing => write_prompt(&mut output, &config, &state).await?,
                    Command::Unknown(text) => {
                        write_line(&mut output, &format!("Unknown command: {text}")).await?;
                        write_prompt(&mut output, &config, &state).await?;
                    }
                }
            }
        }
    }

    output.flush().await?;
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

async fn write_prompt<W: AsyncWrite + Unpin>(
    output: &mut W,
    config: &UiConfig,
    state: &UiState,
) -> std::io::Result<()> {
    if state.awaiting_permission {
        return Ok(());
    }
    output.write_all(config.prompt.as_bytes()).await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glance_types::{AttemptId, DisplayKind, DisplayUpdate, ImageSourceChoice};
    use tokio::time::timeout;

    use super::*;

    fn typed(lines: &[&str]) -> AsyncReceiver<String> {
        let (tx, rx) = kanal::unbounded_async::<String>();
        for line in lines {
            assert!(tx.try_send(line.to_string()).unwrap());
        }
        rx
    }

    #[tokio::test]
    async fn typed_commands_reach_the_app() {
        let (to_ui_tx, to_ui_rx) = kanal::unbounded_async::<AppEvent>();
        let (to_app_tx, to_app_rx) = kanal::unbounded_async::<AppEvent>();
        let input = typed(&["gallery /tmp/a.png", "r", "quit"]);

        let cancel = CancellationToken::new();
        let ui = tokio::spawn(run_terminal(
            input,
            Vec::new(),
            to_ui_rx,
            to_app_tx,
            UiConfig::default(),
            cancel.clone(),
        ));

        let mut received = Vec::new();
        for _ in 0..3 {
            let event = timeout(Duration::from_secs(2), to_app_rx.recv())
                .await
                .expect("timeout")
                .expect("channel closed");
            received.push(event);
        }
        assert_eq!(
            received,
            vec![
                AppEvent::SelectImageSource(ImageSourceChoice::Gallery(Some("/tmp/a.png".into()))),
                AppEvent::RecognizeAndQuery,
                AppEvent::Quit,
            ]
        );

        drop(to_ui_tx);
        timeout(Duration::from_secs(2), ui).await.unwrap().unwrap().unwrap();
    }

    #[tokio::test]
    async fn end_of_input_sends_quit() {
        let (_to_ui_tx, to_ui_rx) = kanal::unbounded_async::<AppEvent>();
        let (to_app_tx, to_app_rx) = kanal::unbounded_async::<AppEvent>();
        let (lines_tx, lines_rx) = kanal::unbounded_async::<String>();
        drop(lines_tx);

        let cancel = CancellationToken::new();
        tokio::spawn(run_terminal(
            lines_rx,
            Vec::new(),
            to_ui_rx,
            to_app_tx,
            UiConfig::default(),
            cancel.clone(),
        ));

        let event = timeout(Duration::from_secs(2), to_app_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event, AppEvent::Quit);
        cancel.cancel();
    }

    #[tokio::test]
    async fn cancel_returns_while_input_is_still_open() {
        let (_to_ui_tx, to_ui_rx) = kanal::unbounded_async::<AppEvent>();
        let (to_app_tx, to_app_rx) = kanal::unbounded_async::<AppEvent>();
        // Sender kept alive: no line and no end of input ever arrive
        let (_lines_tx, lines_rx) = kanal::unbounded_async::<String>();

        let cancel = CancellationToken::new();
        let ui = tokio::spawn(run_terminal(
            lines_rx,
            Vec::new(),
            to_ui_rx,
            to_app_tx,
            UiConfig::default(),
            cancel.clone(),
        ));

        cancel.cancel();
        timeout(Duration::from_secs(2), ui).await.unwrap().unwrap().unwrap();
        assert!(to_app_rx.is_empty());
    }

    #[tokio::test]
    async fn app_events_are_printed() {
        let (to_ui_tx, to_ui_rx) = kanal::unbounded_async::<AppEvent>();
        let (to_app_tx, _to_app_rx) = kanal::unbounded_async::<AppEvent>();
        let (client, mut server) = tokio::io::duplex(4096);
        let (_reader_half, writer_half) = tokio::io::split(client);

        // Input that never ends keeps the loop waiting on app events
        let (_lines_tx, lines_rx) = kanal::unbounded_async::<String>();
        let cancel = CancellationToken::new();
        let ui = tokio::spawn(run_terminal(
            lines_rx,
            writer_half,
            to_ui_rx,
            to_app_tx,
            UiConfig::default(),
            cancel.clone(),
        ));

        to_ui_tx
            .send(AppEvent::Display(DisplayUpdate {
                attempt: AttemptId(1),
                text: "Okay".to_string(),
                kind: DisplayKind::Reply,
            }))
            .await
            .unwrap();
        to_ui_tx
            .send(AppEvent::Notice("Pick Image First".to_string()))
            .await
            .unwrap();

        let expected = "[reply] Okay\nglance> (!) Pick Image First\nglance> ";
        let mut buf = vec![0u8; expected.len()];
        timeout(
            Duration::from_secs(2),
            tokio::io::AsyncReadExt::read_exact(&mut server, &mut buf),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), expected);

        cancel.cancel();
        timeout(Duration::from_secs(2), ui).await.unwrap().unwrap().unwrap();
    }
}
