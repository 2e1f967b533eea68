//! The analysis request pipeline.
//!
//! [`AnalysisSession`] owns the inputs a presentation layer edits (prompt
//! text, image selection) and the [`RequestState`] it renders. Submission is
//! an explicit state machine: `Idle`/`Succeeded`/`Failed` move to `InFlight`
//! when a submission starts, and `InFlight` settles into `Succeeded` or
//! `Failed` when the remote call resolves. At most one submission is in
//! flight at a time; the guard is the transition itself, not a queue.

use crate::error::{Result, VisionLabError};
use crate::ingest::{EncodedImage, ImagePicker};
use crate::llm::gateway::{AnalysisConfig, AnalysisGateway};
use crate::llm::models::{AnalysisRequest, AnalysisResult, RequestState};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Driver for one prompt-and-image analysis surface.
pub struct AnalysisSession {
    gateway: Arc<dyn AnalysisGateway>,
    config: AnalysisConfig,
    prompt: String,
    picker: ImagePicker,
    state: RequestState,
}

impl AnalysisSession {
    /// Create a session with default generation settings.
    pub fn new(gateway: Arc<dyn AnalysisGateway>) -> Self {
        Self::with_config(gateway, AnalysisConfig::default())
    }

    /// Create a session with custom generation settings.
    pub fn with_config(gateway: Arc<dyn AnalysisGateway>, config: AnalysisConfig) -> Self {
        Self {
            gateway,
            config,
            prompt: String::new(),
            picker: ImagePicker::new(),
            state: RequestState::Idle,
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Select an image file. A rejected file alters no session state.
    pub async fn select_image(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        self.picker.select(path).await
    }

    /// Discard the current image selection and release its preview.
    pub fn clear_image(&mut self) {
        self.picker.clear();
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.picker.current()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Whether the submit trigger should be enabled: some input present and
    /// no submission in flight.
    pub fn can_submit(&self) -> bool {
        !self.state.is_in_flight() && !(self.prompt.is_empty() && self.picker.is_empty())
    }

    /// Submit the current inputs for analysis.
    ///
    /// Rejects with [`VisionLabError::EmptyRequest`] before any transition
    /// when there is no prompt and no image. While a submission is in flight
    /// a further submit is a no-op. Returns the state the submission settled
    /// in (or the unchanged state for a no-op).
    pub async fn submit(&mut self) -> Result<&RequestState> {
        let Some(request) = self.start()? else {
            return Ok(&self.state);
        };

        let outcome = self.gateway.analyze(&request, &self.config).await;
        self.settle(outcome);

        Ok(&self.state)
    }

    /// First half of a submission: the synchronous transition into
    /// `InFlight`.
    ///
    /// Snapshots the inputs into exactly one [`AnalysisRequest`], so edits
    /// made while the call is in flight only affect the next submission.
    /// Returns `Ok(None)` without constructing a request when one is already
    /// in flight.
    fn start(&mut self) -> Result<Option<AnalysisRequest>> {
        if self.state.is_in_flight() {
            debug!("Submission already in flight, ignoring");
            return Ok(None);
        }

        let request =
            AnalysisRequest::new(self.prompt.clone(), self.picker.current().map(Into::into));

        if request.is_empty() {
            return Err(VisionLabError::EmptyRequest);
        }

        // Entering InFlight discards any prior result or error.
        self.state = RequestState::InFlight;
        info!("Submission started (image attached: {})", request.image.is_some());

        Ok(Some(request))
    }

    /// Second half of a submission: settle `InFlight` into a terminal state.
    fn settle(&mut self, outcome: Result<String>) {
        self.state = match outcome {
            Ok(text) => {
                info!("Submission succeeded ({} chars)", text.len());
                RequestState::Succeeded(AnalysisResult::now(text))
            }
            Err(err) => {
                info!("Submission failed: {}", err);
                RequestState::Failed(failure_message(&err))
            }
        };
    }
}

/// User-facing message for a failed submission: the remote service's own
/// message when it sent one, otherwise the generic fallback.
fn failure_message(err: &VisionLabError) -> String {
    match err {
        VisionLabError::ApiError(message) if !message.is_empty() => message.clone(),
        _ => FALLBACK_ERROR_MESSAGE.to_string(),
    }
}
