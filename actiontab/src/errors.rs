use thiserror::Error;

/// Failures inside a single prediction. All of them are recovered by
/// [`crate::ActionPredictor`] and surface as [`crate::PredictedAction::None`].
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("No JSON object found in model response")]
    NoJsonFound,

    #[error("Malformed JSON in model response: {0}")]
    MalformedJson(String),

    #[error("Generation failed: {0}")]
    GenerationFailure(#[from] GenerationError),

    #[error("Failed to materialize screenshot: {0}")]
    ImageEncodeFailure(String),
}

/// Errors returned by a [`crate::ModelBackend`] while generating text.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to read screenshot at {path}: {message}")]
    ImageRead { path: String, message: String },

    #[error("Backend request failed: {0}")]
    Request(String),

    #[error("Backend returned an empty response")]
    EmptyResponse,
}

/// Errors raised while bringing a model backend up.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Model '{model}' is not available: {reason}")]
    ModelUnavailable { model: String, reason: String },

    #[error("Invalid backend configuration: {0}")]
    InvalidConfig(String),
}
