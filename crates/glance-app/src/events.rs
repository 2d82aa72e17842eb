use std::future::Future;

use glance_genai::QueryError;
use glance_ocr::{Acquisition, CaptureError, RecognizeError};
use glance_types::{AppEvent, AttemptId, DisplayKind, DisplayUpdate, ImageOrigin, PipelineStage};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::context::PipelineContext;
use crate::state::AppState;

pub mod permission;
pub mod recognize;
pub mod select_image;

/// Completions posted back by collaborator tasks
#[derive(Debug)]
pub enum PipelineEvent {
    ImageAcquired {
        origin: ImageOrigin,
        result: Result<Acquisition, CaptureError>,
    },
    RecognitionFinished {
        attempt: AttemptId,
        result: Result<String, RecognizeError>,
    },
    QueryFinished {
        attempt: AttemptId,
        result: Result<serde_json::Value, QueryError>,
    },
    /// A collaborator task panicked or was torn down
    TaskFailed {
        attempt: Option<AttemptId>,
        reason: String,
    },
}

/// Event loop side of the pipeline: state plus the handles needed to act on it
pub struct Pipeline {
    pub(crate) ctx: PipelineContext,
    pub(crate) state: AppState,
    pub(crate) app_to_ui_tx: AsyncSender<AppEvent>,
    pub(crate) pipeline_tx: AsyncSender<PipelineEvent>,
    pub(crate) cancel: CancellationToken,
}

/// App's main loop
pub async fn event_loop(
    ctx: PipelineContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (pipeline_tx, pipeline_rx) = kanal::unbounded_async::<PipelineEvent>();
    let mut pipeline = Pipeline {
        ctx,
        state: AppState::new(),
        app_to_ui_tx,
        pipeline_tx,
        cancel: cancel.clone(),
    };

    pipeline.notify(AppEvent::BackendReady).await;
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("[EVENT_LOOP] Front-end channel closed");
                    break;
                };
                tracing::debug!("[EVENT_LOOP] UI event: {:?}", event);
                if !pipeline.handle_app_event(event).await {
                    break;
                }
            }
            event = pipeline_rx.recv() => {
                // The loop holds a sender itself, so this never closes while running
                let event = event?;
                tracing::debug!("[EVENT_LOOP] Pipeline event: {:?}", event);
                pipeline.handle_pipeline_event(event).await;
            }
        }
    }

    cancel.cancel();
    Ok(())
}

impl Pipeline {
    /// Returns false once the session should end
    async fn handle_app_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::SelectImageSource(choice) => self.select_image_source(choice).await,
            AppEvent::RecognizeAndQuery => self.recognize_and_query().await,
            AppEvent::PermissionAnswer { granted } => self.permission_answered(granted).await,
            AppEvent::Quit => {
                tracing::info!("Quit requested");
                return false;
            }
            AppEvent::BackendReady
            | AppEvent::ImageSelected(_)
            | AppEvent::Display(_)
            | AppEvent::Notice(_)
            | AppEvent::PermissionPrompt
            | AppEvent::StageChanged(_) => {
                // UI-only events, ignore in backend
            }
        }
        true
    }

    async fn handle_pipeline_event(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::ImageAcquired { origin, result } => {
                self.image_acquired(origin, result).await
            }
            PipelineEvent::RecognitionFinished { attempt, result } => {
                self.recognition_finished(attempt, result).await
            }
            PipelineEvent::QueryFinished { attempt, result } => {
                self.query_finished(attempt, result).await
            }
            PipelineEvent::TaskFailed { attempt, reason } => {
                self.task_failed(attempt, reason).await
            }
        }
    }

    pub(crate) async fn notify(&self, event: AppEvent) {
        if let Err(e) = self.app_to_ui_tx.send(event).await {
            tracing::warn!("Front-end is gone, dropping event: {}", e);
        }
    }

    /// Transient, non-blocking message
    pub(crate) async fn notice(&self, message: impl Into<String>) {
        self.notify(AppEvent::Notice(message.into())).await;
    }

    pub(crate) async fn set_display(&mut self, attempt: AttemptId, kind: DisplayKind, text: String) {
        self.state.display = Some(text.clone());
        self.notify(AppEvent::Display(DisplayUpdate {
            attempt,
            text,
            kind,
        }))
        .await;
    }

    pub(crate) async fn set_stage(&mut self, stage: PipelineStage) {
        if self.state.stage != stage {
            self.state.stage = stage;
            self.notify(AppEvent::StageChanged(stage)).await;
        }
    }

    /// Runs collaborator work on its own task and posts the completion back
    pub(crate) fn spawn_work<F, T, M>(&self, attempt: Option<AttemptId>, work: F, finish: M)
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        M: FnOnce(T) -> PipelineEvent + Send + 'static,
    {
        let tx = self.pipeline_tx.clone();
        let cancel = self.cancel.child_token();

        tokio::spawn(async move {
            let mut handle = tokio::spawn(work);
            let event = tokio::select! {
                _ = cancel.cancelled() => {
                    handle.abort();
                    return;
                }
                joined = &mut handle => match joined {
                    Ok(output) => finish(output),
                    Err(e) => PipelineEvent::TaskFailed {
                        attempt,
                        reason: e.to_string(),
                    },
                },
            };

            if let Err(e) = tx.send(event).await {
                tracing::debug!("Event loop gone, completion dropped: {}", e);
            }
        });
    }
}
