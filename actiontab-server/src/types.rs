use actiontab::{ActionType, PredictedAction};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionRequest {
    /// Base64 encoded screenshot
    pub screenshot: String,
    /// Recent actions for context, most recent last
    pub history: Vec<String>,
    pub cursor_x: i32,
    pub cursor_y: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionResponse {
    pub action_type: ActionType,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub text: Option<String>,
    pub confidence: f64,
}

impl PredictionResponse {
    /// Encode a prediction. Text and "none" answers report the request's
    /// cursor as their position.
    pub fn from_prediction(action: PredictedAction, cursor_x: i32, cursor_y: i32) -> Self {
        let action_type = action.action_type();
        let confidence = action.confidence();
        match action {
            PredictedAction::Click { x, y, .. } => Self {
                action_type,
                x: Some(x),
                y: Some(y),
                text: None,
                confidence,
            },
            PredictedAction::Text { text, .. } => Self {
                action_type,
                x: Some(cursor_x),
                y: Some(cursor_y),
                text: Some(text),
                confidence,
            },
            PredictedAction::None => Self {
                action_type,
                x: Some(cursor_x),
                y: Some(cursor_y),
                text: None,
                confidence,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub mock_mode: bool,
}
