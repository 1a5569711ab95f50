//! Web search through the Serper API (`https://google.serper.dev`).

use async_trait::async_trait;
use newsdesk_core::{NewsdeskError, Result, Tool, ToolContext};
use reqwest::Client;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

pub const SERPER_API_BASE: &str = "https://google.serper.dev";

const DEFAULT_RESULTS: usize = 10;

#[derive(Clone)]
pub struct SerperConfig {
    pub api_key: String,
    /// Upper bound on results returned to the agent.
    pub n_results: usize,
    pub base_url: Option<String>,
}

impl std::fmt::Debug for SerperConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperConfig")
            .field("n_results", &self.n_results)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SerperConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), n_results: DEFAULT_RESULTS, base_url: None }
    }

    pub fn with_n_results(mut self, n_results: usize) -> Self {
        self.n_results = n_results;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(SERPER_API_BASE)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchArgs {
    /// Mandatory search query you want to use to search the internet.
    search_query: String,
}

/// One organic search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SearchResult>,
}

/// Search the internet through Serper. Shared by every agent that lists it;
/// it holds no per-call state.
pub struct SerperSearchTool {
    client: Client,
    config: SerperConfig,
}

impl SerperSearchTool {
    pub fn new(config: SerperConfig) -> Self {
        Self { client: Client::new(), config }
    }

    pub fn config(&self) -> &SerperConfig {
        &self.config
    }

    /// Run one query and return at most `n_results` organic hits.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        if self.config.api_key.is_empty() {
            return Err(NewsdeskError::Tool(
                "SERPER_API_KEY is not set; the Serper API requires an API key".to_string(),
            ));
        }

        let url = format!("{}/search", self.config.effective_base_url().trim_end_matches('/'));
        tracing::debug!(query, "Searching the internet");

        let response = self
            .client
            .post(url)
            .header("X-API-KEY", &self.config.api_key)
            .json(&json!({ "q": query, "num": self.config.n_results }))
            .send()
            .await
            .map_err(|e| NewsdeskError::Tool(format!("Serper request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NewsdeskError::Tool(format!("Serper API error ({}): {}", status, body)));
        }

        let parsed: SerperResponse = response
            .json()
            .await
            .map_err(|e| NewsdeskError::Tool(format!("Invalid Serper response: {}", e)))?;

        let mut results = parsed.organic;
        results.truncate(self.config.n_results);
        tracing::debug!(query, count = results.len(), "Search finished");
        Ok(results)
    }
}

#[async_trait]
impl Tool for SerperSearchTool {
    fn name(&self) -> &str {
        "search_the_internet"
    }

    fn description(&self) -> &str {
        "A tool that can be used to search the internet with a search_query."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(crate::parameters_schema::<SearchArgs>())
    }

    async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
        let args: SearchArgs = serde_json::from_value(args)
            .map_err(|e| NewsdeskError::Tool(format!("Invalid search arguments: {}", e)))?;
        let results = self.search(&args.search_query).await?;
        Ok(json!({ "results": results }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SerperConfig::new("key");
        assert_eq!(config.n_results, 10);
        assert_eq!(config.effective_base_url(), "https://google.serper.dev");
    }

    #[test]
    fn test_config_debug_hides_key() {
        let debug = format!("{:?}", SerperConfig::new("serper-secret"));
        assert!(!debug.contains("serper-secret"));
    }

    #[test]
    fn test_declaration_requires_query() {
        let tool = SerperSearchTool::new(SerperConfig::new("key"));
        let decl = newsdesk_core::function_declaration(&tool);

        assert_eq!(decl["name"], "search_the_internet");
        assert_eq!(decl["parameters"]["required"][0], "search_query");
    }
}
