//! Gemini client implementation.

use super::config::GeminiConfig;
use super::convert::{self, GenerateContentResponse};
use async_trait::async_trait;
use newsdesk_core::{Llm, LlmRequest, LlmResponse, NewsdeskError, Result};
use reqwest::Client;

/// Gemini client for the `generateContent` REST endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use newsdesk_model::{GeminiConfig, GeminiModel};
///
/// let model = GeminiModel::new(
///     GeminiConfig::new(std::env::var("GOOGLE_API_KEY").unwrap_or_default())
/// )?;
/// ```
pub struct GeminiModel {
    client: Client,
    config: GeminiConfig,
}

impl GeminiModel {
    /// Create a new Gemini client.
    ///
    /// An empty API key is accepted here; the first request reports it.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| NewsdeskError::Model(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Build the API URL for content generation.
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.effective_base_url().trim_end_matches('/'),
            self.config.model
        )
    }

    fn log_exchange(&self, message: &str) {
        if self.config.verbose {
            tracing::info!(model = %self.config.model, "{}", message);
        } else {
            tracing::debug!(model = %self.config.model, "{}", message);
        }
    }
}

#[async_trait]
impl Llm for GeminiModel {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn generate_content(&self, request: LlmRequest) -> Result<LlmResponse> {
        if self.config.api_key.is_empty() {
            return Err(NewsdeskError::Config(
                "GOOGLE_API_KEY is not set; the Gemini API requires an API key".to_string(),
            ));
        }

        let body = convert::build_request(&request, self.config.temperature);
        self.log_exchange(&format!(
            "Sending Gemini request ({} turns, {} tools)",
            body.contents.len(),
            request.tools.len()
        ));

        let response = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| NewsdeskError::Model(format!("Gemini API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(NewsdeskError::Model(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| NewsdeskError::Model(format!("Invalid Gemini response: {}", e)))?;

        if parsed.candidates.is_empty() {
            let reason = parsed
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(NewsdeskError::Model(format!("Gemini returned no content: {}", reason)));
        }

        if let Some(candidate) = parsed.candidates.first() {
            if candidate.content.as_ref().is_none_or(|c| c.parts.is_empty()) {
                return Err(NewsdeskError::Model(format!(
                    "Gemini returned an empty candidate (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                )));
            }
        }

        let llm_response = convert::convert_response(&parsed);
        let tokens = llm_response.usage_metadata.map(|u| u.total_token_count).unwrap_or_default();
        self.log_exchange(&format!("Gemini response received ({} tokens)", tokens));

        Ok(llm_response)
    }
}
