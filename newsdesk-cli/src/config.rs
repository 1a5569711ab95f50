use newsdesk_core::Credentials;
use newsdesk_model::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, GeminiConfig};
use newsdesk_tool::SerperConfig;
use std::path::PathBuf;

/// Everything needed to build the news crew. Built once at startup and
/// passed by reference.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub model: String,
    pub temperature: f32,
    pub output_file: PathBuf,
    /// Per-step agent logging at info level.
    pub verbose: bool,
}

impl AppConfig {
    pub fn new(credentials: Credentials, output_file: impl Into<PathBuf>) -> Self {
        Self {
            credentials,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            output_file: output_file.into(),
            verbose: true,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 1.0);
        self
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig::new(self.credentials.google_api_key.clone())
            .with_model(self.model.clone())
            .with_temperature(self.temperature)
            .with_verbose(self.verbose)
    }

    pub fn serper(&self) -> SerperConfig {
        SerperConfig::new(self.credentials.serper_api_key.clone())
    }
}
