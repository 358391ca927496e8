//! Vision model backend served by a local Ollama daemon

use base64::prelude::*;
use ollama_rs::{
    generation::{completion::request::GenerationRequest, images::Image},
    models::ModelOptions,
    Ollama,
};
use reqwest::Url;
use std::path::Path;
use tracing::{debug, info};

use crate::backend::{GenerationParams, ModelBackend};
use crate::errors::{GenerationError, LoadError};

/// Ollama tag of Qwen2.5-VL-7B-Instruct
pub const DEFAULT_MODEL: &str = "qwen2.5vl:7b";
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost";
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;

/// Where the Ollama daemon listens.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
}

impl OllamaConfig {
    /// Full daemon URL with the port applied.
    pub fn url(&self) -> Result<Url, LoadError> {
        let mut url = Url::parse(&self.host).map_err(|e| {
            LoadError::InvalidConfig(format!("invalid ollama host '{}': {e}", self.host))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(LoadError::InvalidConfig(format!(
                "ollama host must use http or https, got '{}'",
                self.host
            )));
        }
        url.set_port(Some(self.port)).map_err(|_| {
            LoadError::InvalidConfig(format!("cannot set port {} on '{}'", self.port, self.host))
        })?;
        Ok(url)
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            port: DEFAULT_OLLAMA_PORT,
        }
    }
}

pub struct OllamaBackend {
    client: Ollama,
    model: String,
    params: GenerationParams,
}

impl OllamaBackend {
    /// Connect to the daemon and make sure `model` is pulled.
    pub async fn load(
        config: &OllamaConfig,
        model: &str,
        params: GenerationParams,
    ) -> Result<Self, LoadError> {
        let url = config.url()?;
        info!("Loading vision model '{}' from {}", model, url);
        let client = Ollama::from_url(url);

        client
            .show_model_info(model.to_string())
            .await
            .map_err(|e| LoadError::ModelUnavailable {
                model: model.to_string(),
                reason: e.to_string(),
            })?;

        info!("Model '{}' loaded successfully", model);
        Ok(Self {
            client,
            model: model.to_string(),
            params,
        })
    }
}

#[async_trait::async_trait]
impl ModelBackend for OllamaBackend {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, image_path: &Path, prompt: &str) -> Result<String, GenerationError> {
        let bytes = tokio::fs::read(image_path)
            .await
            .map_err(|e| GenerationError::ImageRead {
                path: image_path.display().to_string(),
                message: e.to_string(),
            })?;

        let options = ModelOptions::default()
            .temperature(self.params.temperature)
            .num_predict(self.params.max_tokens as i32);
        let request = GenerationRequest::new(self.model.clone(), prompt.to_string())
            .images(vec![Image::from_base64(BASE64_STANDARD.encode(bytes))])
            .options(options);

        debug!("Sending {} prompt chars to '{}'", prompt.len(), self.model);
        let response = self
            .client
            .generate(request)
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        if response.response.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(response.response)
    }
}
