use actiontab::{ActionPredictor, ActionType, GenerationError, ModelBackend};
use actiontab_server::types::{HealthResponse, PredictionResponse};
use actiontab_server::{build_router, ServerConfig};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::prelude::*;
use clap::Parser;
use http_body_util::BodyExt;
use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct FixedBackend(&'static str);

#[async_trait::async_trait]
impl ModelBackend for FixedBackend {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn generate(&self, _image_path: &Path, _prompt: &str) -> Result<String, GenerationError> {
        Ok(self.0.to_string())
    }
}

#[derive(Default)]
struct RecordingBackend {
    prompts: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl ModelBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    async fn generate(&self, _image_path: &Path, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(r#"{"action_type":"text","text":"git push","confidence":0.7}"#.to_string())
    }
}

fn config(args: &[&str]) -> ServerConfig {
    let argv = std::iter::once("actiontab-server").chain(args.iter().copied());
    ServerConfig::try_parse_from(argv).unwrap()
}

fn mock_router() -> Router {
    build_router(Arc::new(ActionPredictor::mock()), &config(&[]))
}

fn model_router(reply: &'static str) -> Router {
    let predictor = ActionPredictor::with_backend(Arc::new(FixedBackend(reply)));
    build_router(Arc::new(predictor), &config(&[]))
}

fn screenshot_b64() -> String {
    let img = RgbaImage::from_pixel(32, 20, Rgba([0, 128, 255, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    BASE64_STANDARD.encode(buf.into_inner())
}

fn predict_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_mock_mode() {
    let response = mock_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(health.status, "ok");
    assert!(health.mock_mode);
}

#[tokio::test]
async fn health_reports_model_mode() {
    let response = model_router("{}")
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json, json!({ "status": "ok", "mock_mode": false }));
}

#[tokio::test]
async fn predict_in_mock_mode_returns_an_action() {
    let body = json!({
        "screenshot": screenshot_b64(),
        "history": ["opened browser"],
        "cursor_x": 400,
        "cursor_y": 300
    });
    let response = mock_router().oneshot(predict_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let prediction: PredictionResponse = serde_json::from_value(body_json(response).await).unwrap();
    match prediction.action_type {
        ActionType::Click => {
            assert!(prediction.x.unwrap() >= 0 && prediction.y.unwrap() >= 0);
            assert!(prediction.text.is_none());
        }
        ActionType::Text => assert!(prediction.text.is_some()),
        ActionType::None => panic!("mock mode must not return none"),
    }
}

#[tokio::test]
async fn predict_with_model_returns_parsed_click() {
    let router = model_router(r#"Here you go: {"action_type":"click","x":12,"y":34,"confidence":0.9}"#);
    let body = json!({
        "screenshot": screenshot_b64(),
        "history": [],
        "cursor_x": 1,
        "cursor_y": 2
    });
    let response = router.oneshot(predict_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "action_type": "click",
            "x": 12,
            "y": 34,
            "text": null,
            "confidence": 0.9
        })
    );
}

#[tokio::test]
async fn bad_base64_degrades_to_none_not_an_error() {
    let router = model_router(r#"{"action_type":"click","x":1,"y":1}"#);
    let body = json!({
        "screenshot": "%%% definitely not base64 %%%",
        "history": [],
        "cursor_x": 50,
        "cursor_y": 60
    });
    let response = router.oneshot(predict_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["action_type"], "none");
    assert_eq!(json["confidence"], 0.0);
    assert_eq!(json["x"], 50);
    assert_eq!(json["y"], 60);
}

#[tokio::test]
async fn garbage_model_output_degrades_to_none() {
    let router = model_router("I cannot help with that.");
    let body = json!({
        "screenshot": screenshot_b64(),
        "history": ["typed hello"],
        "cursor_x": 0,
        "cursor_y": 0
    });
    let response = router.oneshot(predict_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["action_type"], "none");
}

#[tokio::test]
async fn malformed_request_body_is_rejected() {
    let body = json!({ "screenshot": "", "cursor_x": "left" });
    let response = mock_router().oneshot(predict_request(&body)).await.unwrap();

    assert!(response.status().is_client_error());
    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let router = build_router(Arc::new(ActionPredictor::mock()), &config(&["--max-body-mb", "1"]));
    let body = json!({
        "screenshot": "A".repeat(2 * 1024 * 1024),
        "history": [],
        "cursor_x": 0,
        "cursor_y": 0
    });
    let response = router.oneshot(predict_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn cors_preflight_is_allowed_by_default() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/predict")
        .header(header::ORIGIN, "app://actiontab")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = mock_router().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn predict_forwards_cursor_and_history_to_the_model() {
    let backend = Arc::new(RecordingBackend::default());
    let predictor = ActionPredictor::with_backend(backend.clone());
    let router = build_router(Arc::new(predictor), &config(&[]));
    let body = json!({
        "screenshot": format!("data:image/png;base64,{}", screenshot_b64()),
        "history": ["opened terminal", "typed git add ."],
        "cursor_x": 640,
        "cursor_y": 360
    });
    let response = router.oneshot(predict_request(&body)).await.unwrap();

    assert_eq!(
        body_json(response).await,
        json!({
            "action_type": "text",
            "x": 640,
            "y": 360,
            "text": "git push",
            "confidence": 0.7
        })
    );
    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("(640, 360)"));
    assert!(prompts[0].contains("Recent actions: opened terminal, typed git add ."));
}
