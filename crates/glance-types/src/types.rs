use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events exchanged between the front-end and the pipeline controller
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // front-end -> app
    SelectImageSource(ImageSourceChoice),
    RecognizeAndQuery,
    PermissionAnswer {
        granted: bool,
    },
    Quit,

    // app -> front-end
    BackendReady,
    ImageSelected(ImageHandle),
    Display(DisplayUpdate),
    Notice(String),
    PermissionPrompt,
    StageChanged(PipelineStage),
}

/// Where the user wants the next image to come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSourceChoice {
    Camera,
    /// Gallery selection, optionally with a path already chosen by the user
    Gallery(Option<PathBuf>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageOrigin {
    Camera,
    Gallery,
}

/// Opaque reference to one acquired image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle {
    pub id: Uuid,
    pub path: PathBuf,
    pub origin: ImageOrigin,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    pub fn new(path: PathBuf, origin: ImageOrigin, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            path,
            origin,
            width,
            height,
        }
    }
}

/// Generation stamp of one recognize-and-query attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(pub u64);

impl AttemptId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// New content for the display field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUpdate {
    pub attempt: AttemptId,
    pub text: String,
    pub kind: DisplayKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    /// Raw recognizer output, shown while the remote query is in flight
    Recognized,
    Reply,
    Failure,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineStage {
    #[default]
    Idle,
    AwaitingImage,
    ImageReady,
    Recognizing,
    Querying,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::Idle => "Idle",
            PipelineStage::AwaitingImage => "Waiting for image",
            PipelineStage::ImageReady => "Image ready",
            PipelineStage::Recognizing => "Recognizing",
            PipelineStage::Querying => "Querying",
        };
        f.write_str(label)
    }
}
