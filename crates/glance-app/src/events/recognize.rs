use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use glance_genai::{QueryError, display_reply};
use glance_ocr::RecognizeError;
use glance_types::{AttemptId, DisplayKind, PipelineStage};

use super::{Pipeline, PipelineEvent};

impl Pipeline {
    pub(crate) async fn recognize_and_query(&mut self) {
        let Some(image) = self.state.image.clone() else {
            self.notice("Pick Image First").await;
            return;
        };

        let attempt = self.state.begin_attempt();
        tracing::debug!(">>> [OCR] Attempt {} on {}", attempt, image.path.display());
        self.set_stage(PipelineStage::Recognizing).await;

        let recognizer = self.ctx.recognizer.clone();
        self.spawn_work(
            Some(attempt),
            async move { recognizer.recognize(&image).await },
            move |result| PipelineEvent::RecognitionFinished { attempt, result },
        );
    }

    pub(crate) async fn recognition_finished(
        &mut self,
        attempt: AttemptId,
        result: Result<String, RecognizeError>,
    ) {
        if !self.state.is_current(attempt) {
            tracing::debug!(">>> [OCR] Dropping result of superseded attempt {}", attempt);
            return;
        }

        match result {
            Ok(text) => {
                tracing::debug!(">>> [OCR] Got text: {} chars", text.len());
                // Raw text stays visible until the reply arrives
                self.set_display(attempt, DisplayKind::Recognized, text.clone())
                    .await;
                self.set_stage(PipelineStage::Querying).await;

                let genai = self.ctx.genai.clone();
                self.spawn_work(
                    Some(attempt),
                    async move { genai.query(&text).await },
                    move |result| PipelineEvent::QueryFinished { attempt, result },
                );
            }
            Err(e) => {
                tracing::error!(">>> [OCR] Failed: {}", e);
                self.notice(format!("Failed to recognize text: {e}")).await;
                self.set_stage(PipelineStage::Idle).await;
            }
        }
    }

    pub(crate) async fn query_finished(
        &mut self,
        attempt: AttemptId,
        result: Result<serde_json::Value, QueryError>,
    ) {
        if !self.state.is_current(attempt) {
            tracing::debug!(">>> [GENAI] Dropping reply of superseded attempt {}", attempt);
            return;
        }

        match result {
            Ok(reply) => {
                tracing::info!(">>> [GENAI] Response: {}", reply);
                let text = display_reply(&reply, self.ctx.truncate_at_period);
                self.set_display(attempt, DisplayKind::Reply, text).await;
            }
            Err(e) => {
                tracing::warn!(">>> [GENAI] Error: {}", e);
                self.show_failure(attempt, &e).await;
            }
        }

        self.set_stage(PipelineStage::Idle).await;
    }

    pub(crate) async fn task_failed(&mut self, attempt: Option<AttemptId>, reason: String) {
        match attempt {
            Some(attempt) if self.state.is_current(attempt) => {
                tracing::error!("Pipeline task for attempt {} failed: {}", attempt, reason);
                self.show_failure(attempt, &format!("Unexpected error: {reason}"))
                    .await;
                self.set_stage(PipelineStage::Idle).await;
            }
            Some(attempt) => {
                tracing::debug!("Ignoring failure of superseded attempt {}", attempt);
            }
            None => {
                tracing::error!("Image source task failed: {}", reason);
                self.notice(format!("Error: {reason}")).await;
                self.settle_after_acquisition().await;
            }
        }
    }

    async fn show_failure(&mut self, attempt: AttemptId, reason: &(dyn Display + Sync)) {
        if let Some(text) = render_failure(reason) {
            self.set_display(attempt, DisplayKind::Failure, text).await;
        }
    }
}

/// Renders a failure reason; a fault while rendering is logged, never propagated
pub(crate) fn render_failure(reason: &dyn Display) -> Option<String> {
    match panic::catch_unwind(AssertUnwindSafe(|| reason.to_string())) {
        Ok(text) => Some(text),
        Err(_) => {
            tracing::error!("Exception in error handling, display left unchanged");
            None
        }
    }
}
