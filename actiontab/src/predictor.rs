use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::backend::{BackendState, GenerationParams, ModelBackend};
use crate::errors::PredictionError;
use crate::mock::MockActionGenerator;
use crate::ollama::{OllamaBackend, OllamaConfig};
use crate::parser::ResponseParser;
use crate::prompt::PromptBuilder;
use crate::screenshot::ScreenshotFile;
use crate::types::{ActionRequest, PredictedAction};

/// Predicts the user's next action from a screenshot, cursor and history.
///
/// The backend state is decided once at construction. Without a ready model
/// every request is answered by [`MockActionGenerator`]; with one, the
/// screenshot goes through prompt, model and parser, and any failure along
/// that path degrades to [`PredictedAction::None`].
#[derive(Debug, Clone)]
pub struct ActionPredictor {
    state: BackendState,
}

impl ActionPredictor {
    pub fn new(state: BackendState) -> Self {
        match &state {
            BackendState::Unconfigured => info!("No model configured, using mock predictions"),
            BackendState::LoadFailed { model, reason } => {
                warn!("Failed to load model '{}': {}", model, reason);
                warn!("Falling back to mock predictions");
            }
            BackendState::Ready(backend) => info!("Predicting with model '{}'", backend.name()),
        }
        Self { state }
    }

    /// A predictor that only ever uses the mock generator.
    pub fn mock() -> Self {
        Self::new(BackendState::Unconfigured)
    }

    pub fn with_backend(backend: Arc<dyn ModelBackend>) -> Self {
        Self::new(BackendState::Ready(backend))
    }

    /// Resolve the backend state for `model` against an Ollama daemon.
    ///
    /// `None` means mock mode was requested. A load failure is not an error
    /// here: the predictor comes up in mock mode and logs why.
    pub async fn connect(model: Option<&str>, ollama: &OllamaConfig) -> Self {
        let state = match model {
            None => BackendState::Unconfigured,
            Some(model) => {
                match OllamaBackend::load(ollama, model, GenerationParams::default()).await {
                    Ok(backend) => BackendState::Ready(Arc::new(backend)),
                    Err(e) => BackendState::LoadFailed {
                        model: model.to_string(),
                        reason: e.to_string(),
                    },
                }
            }
        };
        Self::new(state)
    }

    pub fn state(&self) -> &BackendState {
        &self.state
    }

    /// True unless a model is loaded.
    pub fn is_mock(&self) -> bool {
        !self.state.is_ready()
    }

    /// Predict the next action. Never fails; see the type docs for the policy.
    #[instrument(skip(self, image, history), fields(image_bytes = image.len()))]
    pub async fn predict(
        &self,
        image: &[u8],
        history: &[String],
        cursor_x: i32,
        cursor_y: i32,
    ) -> PredictedAction {
        let backend = match &self.state {
            BackendState::Ready(backend) => backend,
            BackendState::Unconfigured | BackendState::LoadFailed { .. } => {
                return MockActionGenerator::generate(cursor_x, cursor_y);
            }
        };

        match Self::run_pipeline(backend.as_ref(), image, history, cursor_x, cursor_y).await {
            Ok(action) => action,
            Err(e) => {
                warn!("Prediction error: {}", e);
                PredictedAction::None
            }
        }
    }

    pub async fn predict_request(&self, request: &ActionRequest) -> PredictedAction {
        self.predict(
            &request.image,
            &request.history,
            request.cursor_x,
            request.cursor_y,
        )
        .await
    }

    async fn run_pipeline(
        backend: &dyn ModelBackend,
        image: &[u8],
        history: &[String],
        cursor_x: i32,
        cursor_y: i32,
    ) -> Result<PredictedAction, PredictionError> {
        // Decoding and PNG encoding are CPU bound; keep them off the runtime workers.
        // The file is removed from disk when it goes out of scope, on every return path.
        let bytes = image.to_vec();
        let screenshot = tokio::task::spawn_blocking(move || ScreenshotFile::write(&bytes))
            .await
            .map_err(|e| PredictionError::ImageEncodeFailure(format!("Task join error: {e}")))??;
        let prompt = PromptBuilder::build(cursor_x, cursor_y, history);

        let output = backend.generate(screenshot.path(), &prompt).await?;
        debug!("Model output: {}", output);

        ResponseParser::parse(&output, cursor_x, cursor_y).inspect_err(|e| {
            warn!("Failed to parse response: {}", e);
            warn!("Raw response: {}", output);
        })
    }
}
