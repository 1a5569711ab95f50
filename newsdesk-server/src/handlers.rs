use crate::ServerConfig;
use crate::page::{Outcome, render_page};
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use newsdesk_core::{Inputs, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state. `run_lock` serializes crew runs so submissions are
/// processed one at a time.
#[derive(Clone)]
pub struct AppState {
    config: ServerConfig,
    run_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config, run_lock: Arc::new(Mutex::new(())) }
    }

    async fn generate(&self, topic: &str) -> Result<String> {
        let _guard = self.run_lock.lock().await;
        tracing::info!(topic, "Generating article");

        let inputs = Inputs::from([(self.config.input_name.clone(), topic.to_string())]);
        let output = self.config.crew.kickoff(&inputs).await?;

        tracing::info!(
            topic,
            tokens = output.token_usage.total_tokens,
            requests = output.token_usage.successful_requests,
            "Article generated"
        );
        Ok(output.raw)
    }
}

#[derive(Debug, Deserialize)]
pub struct TopicForm {
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub article: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.config.default_topic, Outcome::Idle))
}

pub async fn generate_page(State(state): State<AppState>, Form(form): Form<TopicForm>) -> Response {
    match state.generate(&form.topic).await {
        Ok(article) => Html(render_page(&form.topic, Outcome::Article(&article))).into_response(),
        Err(e) => {
            tracing::error!(topic = %form.topic, error = %e, "Article generation failed");
            let message = e.to_string();
            let page = render_page(&form.topic, Outcome::Error(&message));
            (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response()
        }
    }
}

pub async fn generate_api(State(state): State<AppState>, Json(form): Json<TopicForm>) -> Response {
    match state.generate(&form.topic).await {
        Ok(article) => Json(ArticleResponse { article }).into_response(),
        Err(e) => {
            tracing::error!(topic = %form.topic, error = %e, "Article generation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() })))
                .into_response()
        }
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
