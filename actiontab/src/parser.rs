//! Extraction of a structured action from free-form model output
//!
//! The model is asked for a single JSON object but usually wraps it in prose.
//! We take the first brace-delimited span that contains no other braces and
//! parse it strictly. Objects with nested braces are not supported: for
//! `{"a": {"b": 1}}` the inner `{"b": 1}` is what gets parsed.

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::PredictionError;
use crate::types::PredictedAction;

const DEFAULT_CONFIDENCE: f64 = 0.5;

pub struct ResponseParser;

impl ResponseParser {
    /// Parse raw model text into an action.
    ///
    /// `cursor_x`/`cursor_y` are the request's cursor, used when a click omits
    /// its coordinates. This never falls back to `None` on bad input; errors
    /// are returned to the caller.
    pub fn parse(
        raw: &str,
        cursor_x: i32,
        cursor_y: i32,
    ) -> Result<PredictedAction, PredictionError> {
        let span = find_flat_object(raw).ok_or(PredictionError::NoJsonFound)?;
        let object: Map<String, Value> = serde_json::from_str(span)
            .map_err(|e| PredictionError::MalformedJson(e.to_string()))?;

        let action_type = object
            .get("action_type")
            .and_then(Value::as_str)
            .unwrap_or("none");
        let confidence = match object.get("confidence") {
            Some(value) => coerce_confidence(value)?,
            None => DEFAULT_CONFIDENCE,
        };

        let action = match action_type {
            "click" => PredictedAction::Click {
                x: object.get("x").and_then(coerce_coordinate).unwrap_or(cursor_x),
                y: object.get("y").and_then(coerce_coordinate).unwrap_or(cursor_y),
                confidence,
            },
            "text" => PredictedAction::Text {
                text: match object.get("text") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                },
                confidence,
            },
            other => {
                // Only click and text are committed predictions; the model's
                // confidence is dropped for everything else.
                debug!("Model returned uncommitted action_type '{}'", other);
                PredictedAction::None
            }
        };

        Ok(action)
    }
}

/// Locate the first `{...}` span with no braces inside it.
fn find_flat_object(raw: &str) -> Option<&str> {
    let mut open = None;
    for (idx, ch) in raw.char_indices() {
        match ch {
            '{' => open = Some(idx),
            '}' => {
                if let Some(start) = open {
                    return Some(&raw[start..=idx]);
                }
            }
            _ => {}
        }
    }
    None
}

fn coerce_confidence(value: &Value) -> Result<f64, PredictionError> {
    let confidence = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
    .filter(|c| c.is_finite())
    .ok_or_else(|| PredictionError::MalformedJson(format!("confidence is not a number: {value}")))?;

    Ok(confidence.clamp(0.0, 1.0))
}

fn coerce_coordinate(value: &Value) -> Option<i32> {
    let raw = match value {
        Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if !raw.is_finite() {
        return None;
    }
    Some(raw.trunc().clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}
