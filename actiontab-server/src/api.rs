use actiontab::ActionRequest;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose},
    Engine,
};
use tracing::{debug, info, warn};

use crate::types::{HealthResponse, PredictionRequest, PredictionResponse};
use crate::AppState;

/// Standard alphabet, padding optional.
const SCREENSHOT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    general_purpose::PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// ============================================================================
// Error Handling
// ============================================================================

/// A request the server could not even decode. Model and parse failures never
/// end up here; they are answered with a "none" prediction.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({
                "error": self.message
            })),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

// ============================================================================
// Health Check
// ============================================================================

pub async fn health(State(predictor): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        mock_mode: predictor.is_mock(),
    })
}

// ============================================================================
// Predict
// ============================================================================

pub async fn predict(
    State(predictor): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(request) = payload.inspect_err(|e| warn!("Rejected /predict body: {}", e))?;
    info!(
        "📥 POST /predict - cursor=({}, {}) history={}",
        request.cursor_x,
        request.cursor_y,
        request.history.len()
    );

    let action_request = ActionRequest {
        image: decode_screenshot(&request.screenshot),
        history: request.history,
        cursor_x: request.cursor_x,
        cursor_y: request.cursor_y,
    };
    let action = predictor.predict_request(&action_request).await;

    let response = PredictionResponse::from_prediction(
        action,
        action_request.cursor_x,
        action_request.cursor_y,
    );
    info!(
        "✅ Predicted {} (confidence {:.2})",
        response.action_type, response.confidence
    );
    Ok(Json(response))
}

/// Decode the screenshot, accepting an optional `data:` URL prefix.
///
/// Undecodable input yields an empty buffer; the predictor turns that into a
/// "none" answer on the model path and ignores it in mock mode.
pub fn decode_screenshot(encoded: &str) -> Vec<u8> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    SCREENSHOT_BASE64.decode(cleaned).unwrap_or_else(|e| {
        debug!("Screenshot is not valid base64: {}", e);
        Vec::new()
    })
}
