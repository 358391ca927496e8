use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::errors::GenerationError;

/// Low temperature keeps the JSON output close to deterministic.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
/// Enough for a single action object plus a little preamble.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Sampling settings passed to a vision model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// A vision-language model: screenshot path + prompt in, raw text out.
///
/// Implementations adapt whatever their runtime returns into a single
/// `String`. A call may block for the whole inference.
#[async_trait::async_trait]
pub trait ModelBackend: Send + Sync {
    /// Identifier of the loaded model, for logs and diagnostics
    fn name(&self) -> &str;

    async fn generate(&self, image_path: &Path, prompt: &str) -> Result<String, GenerationError>;
}

/// What the predictor has to work with, fixed for the life of the process.
#[derive(Clone)]
pub enum BackendState {
    /// No model was requested.
    Unconfigured,
    /// A model was requested but could not be brought up.
    LoadFailed { model: String, reason: String },
    Ready(Arc<dyn ModelBackend>),
}

impl BackendState {
    pub fn is_ready(&self) -> bool {
        matches!(self, BackendState::Ready(_))
    }
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendState::Unconfigured => f.write_str("Unconfigured"),
            BackendState::LoadFailed { model, reason } => f
                .debug_struct("LoadFailed")
                .field("model", model)
                .field("reason", reason)
                .finish(),
            BackendState::Ready(backend) => f.debug_tuple("Ready").field(&backend.name()).finish(),
        }
    }
}
