//! Controller lifecycle over its own channel set

use std::sync::Arc;
use std::time::Duration;

use glance_ocr::{Acquisition, CameraPermission};
use glance_types::{AppEvent, DisplayKind, ImageOrigin};
use kanal::AsyncReceiver;
use serde_json::json;
use tokio::time::timeout;

use super::pipeline_tests::{ScriptedGenai, ScriptedRecognizer, ScriptedSource, picked};
use crate::context::PipelineContext;
use crate::controller::AppController;
use crate::once::drive_once;

const WAIT: Duration = Duration::from_secs(2);

fn controller_with(gallery: Vec<Acquisition>, recognized: &str) -> AppController {
    let genai = Arc::new(ScriptedGenai::default());
    genai.reply(recognized, Ok(json!({ "reply": "Noted. Bye" })));

    AppController::new(PipelineContext {
        camera: ScriptedSource::new(Vec::new()),
        gallery: ScriptedSource::new(gallery),
        recognizer: ScriptedRecognizer::new(vec![Ok(recognized.to_string())]),
        genai,
        permission: Arc::new(CameraPermission::new(false)),
        truncate_at_period: true,
    })
}

async fn next_visible(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
    loop {
        let event = timeout(WAIT, rx.recv())
            .await
            .expect("timed out waiting for app event")
            .expect("app channel closed");
        if !matches!(event, AppEvent::StageChanged(_)) {
            return event;
        }
    }
}

#[tokio::test]
async fn backend_talks_over_frontend_channels() {
    let controller = controller_with(Vec::new(), "unused");
    let mut tasks = controller.spawn_backend();
    let (from_app, to_app) = controller.frontend();

    assert_eq!(next_visible(&from_app).await, AppEvent::BackendReady);

    to_app.send(AppEvent::RecognizeAndQuery).await.unwrap();
    assert_eq!(
        next_visible(&from_app).await,
        AppEvent::Notice("Pick Image First".to_string())
    );

    to_app.send(AppEvent::Quit).await.unwrap();
    let finished = timeout(WAIT, tasks.join_next()).await.unwrap();
    assert!(finished.unwrap().unwrap().is_ok());
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn shutdown_stops_the_backend() {
    let controller = controller_with(Vec::new(), "unused");
    let mut tasks = controller.spawn_backend();
    let (from_app, _to_app) = controller.frontend();
    assert_eq!(next_visible(&from_app).await, AppEvent::BackendReady);

    controller.shutdown();
    let finished = timeout(WAIT, tasks.join_next()).await.unwrap();
    assert!(finished.unwrap().unwrap().is_ok());
}

#[tokio::test]
async fn headless_attempt_through_controller() {
    let controller = controller_with(
        vec![picked("/photos/card.png", ImageOrigin::Gallery)],
        "call me",
    );
    let mut tasks = controller.spawn_backend();
    let (from_app, to_app) = controller.frontend();

    let last = timeout(
        WAIT,
        drive_once(from_app, to_app, "/photos/card.png".into(), |_| {}),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(last.kind, DisplayKind::Reply);
    assert_eq!(last.text, "Noted");

    controller.shutdown();
    while tasks.join_next().await.is_some() {}
}
