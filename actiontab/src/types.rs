//! Prediction values shared between the pipeline stages and the server

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire tag of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Click,
    Text,
    None,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ActionType::Click => "click",
            ActionType::Text => "text",
            ActionType::None => "none",
        };
        f.write_str(tag)
    }
}

/// The single predicted next action for a request.
///
/// `Text` happens at the cursor the request was made with, so it carries no
/// coordinates of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictedAction {
    Click { x: i32, y: i32, confidence: f64 },
    Text { text: String, confidence: f64 },
    None,
}

impl PredictedAction {
    pub fn action_type(&self) -> ActionType {
        match self {
            PredictedAction::Click { .. } => ActionType::Click,
            PredictedAction::Text { .. } => ActionType::Text,
            PredictedAction::None => ActionType::None,
        }
    }

    /// Confidence in [0, 1]; always exactly 0.0 for `None`.
    pub fn confidence(&self) -> f64 {
        match self {
            PredictedAction::Click { confidence, .. } | PredictedAction::Text { confidence, .. } => {
                *confidence
            }
            PredictedAction::None => 0.0,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PredictedAction::None)
    }
}

/// Inputs of one prediction, as decoded from the wire.
#[derive(Debug, Clone, Default)]
pub struct ActionRequest {
    /// Raw screenshot bytes; may be empty if the client sent garbage.
    pub image: Vec<u8>,
    /// Recent actions, most recent last.
    pub history: Vec<String>,
    pub cursor_x: i32,
    pub cursor_y: i32,
}
