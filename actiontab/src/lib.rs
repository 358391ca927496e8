//! Next-action prediction for desktop interactions
//!
//! Given a screenshot, the cursor position and a short history of what the
//! user just did, [`ActionPredictor`] guesses the single next action: a click
//! somewhere on screen or text typed at the cursor. Predictions come from a
//! vision-language model when one is available and from a random mock
//! generator otherwise.

pub mod backend;
pub mod errors;
pub mod mock;
pub mod ollama;
pub mod parser;
pub mod predictor;
pub mod prompt;
pub mod screenshot;
#[cfg(test)]
mod tests;
pub mod types;

pub use backend::{BackendState, GenerationParams, ModelBackend};
pub use errors::{GenerationError, LoadError, PredictionError};
pub use mock::MockActionGenerator;
pub use ollama::{OllamaBackend, OllamaConfig};
pub use parser::ResponseParser;
pub use predictor::ActionPredictor;
pub use prompt::PromptBuilder;
pub use screenshot::ScreenshotFile;
pub use types::{ActionRequest, ActionType, PredictedAction};
