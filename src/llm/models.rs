use crate::ingest::EncodedImage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire-ready image data carried inside an [`AnalysisRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub data: String,
    pub media_type: String,
}

impl From<&EncodedImage> for ImagePayload {
    fn from(image: &EncodedImage) -> Self {
        Self {
            data: image.payload.clone(),
            media_type: image.media_type.clone(),
        }
    }
}

/// One outbound analysis request: the prompt text and, if present, the
/// encoded image. Snapshotted at submission time, so later input edits only
/// affect the next submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePayload>,
}

impl AnalysisRequest {
    pub fn new(prompt: impl Into<String>, image: Option<ImagePayload>) -> Self {
        Self {
            prompt: prompt.into(),
            image,
        }
    }

    /// True when there is nothing to send: no prompt text and no image.
    pub fn is_empty(&self) -> bool {
        self.prompt.is_empty() && self.image.is_none()
    }
}

/// Text returned by the remote service, stamped with its completion time.
/// Immutable; each successful request replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub produced_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            produced_at: Utc::now(),
        }
    }
}

/// Lifecycle of the analysis pipeline. Exactly one variant is active at a
/// time; transitions are driven solely by the pipeline itself.
#[derive(Debug, Clone, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl RequestState {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }

    /// The current result, if the last submission succeeded.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            RequestState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// The displayed error message, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
