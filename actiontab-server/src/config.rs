use actiontab::ollama::{DEFAULT_MODEL, DEFAULT_OLLAMA_HOST, DEFAULT_OLLAMA_PORT};
use actiontab::OllamaConfig;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "actiontab-server")]
#[command(version, about = "HTTP server predicting the next desktop action from screenshots")]
pub struct ServerConfig {
    /// Host to bind to
    #[arg(long, env = "ACTIONTAB_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "ACTIONTAB_PORT", default_value_t = 8765)]
    pub port: u16,

    /// Force mock predictions ("1", "true" or "yes")
    #[arg(long, env = "MOCK_MODE")]
    pub mock_mode: Option<String>,

    /// Ollama model tag of the vision-language model
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL)]
    pub model_path: String,

    /// Base URL of the Ollama daemon
    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_OLLAMA_HOST)]
    pub ollama_host: String,

    #[arg(long, env = "OLLAMA_PORT", default_value_t = DEFAULT_OLLAMA_PORT)]
    pub ollama_port: u16,

    /// Disable the permissive CORS policy used for the desktop client
    #[arg(long)]
    pub no_cors: bool,

    /// Maximum request body size in megabytes
    #[arg(long, env = "ACTIONTAB_MAX_BODY_MB", default_value_t = 32)]
    pub max_body_mb: usize,
}

impl ServerConfig {
    pub fn is_mock_mode(&self) -> bool {
        self.mock_mode.as_deref().is_some_and(parse_flag)
    }

    /// The model to load, or `None` when mock mode is forced.
    pub fn resolved_model(&self) -> Option<&str> {
        if self.is_mock_mode() {
            None
        } else {
            Some(self.model_path.as_str())
        }
    }

    pub fn ollama(&self) -> OllamaConfig {
        OllamaConfig {
            host: self.ollama_host.clone(),
            port: self.ollama_port,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_mb.saturating_mul(1024 * 1024)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
