use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use newsdesk_agent::{Agent, Crew, Task};
use newsdesk_core::{Llm, LlmRequest, LlmResponse, NewsdeskError, Result};
use newsdesk_model::{GeminiConfig, GeminiModel, MockLlm};
use newsdesk_server::{SecurityConfig, ServerConfig, create_app, page::render_markdown};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;

fn is_researcher(req: &LlmRequest) -> bool {
    req.system_instruction.as_deref().is_some_and(|s| s.starts_with("You are Senior Researcher."))
}

fn scripted(req: &LlmRequest) -> Result<LlmResponse> {
    if is_researcher(req) {
        Ok(LlmResponse::text("Research notes on the topic."))
    } else {
        Ok(LlmResponse::text(
            "# The Future\n\nAI is *changing* healthcare.\n\n- diagnostics\n- triage",
        ))
    }
}

fn crew(llm: Arc<dyn Llm>, output: &Path) -> Arc<Crew> {
    let researcher = Arc::new(
        Agent::builder("Senior Researcher")
            .goal("Uncover groundbreaking technologies in {topic}")
            .backstory("Driven by curiosity.")
            .llm(llm.clone())
            .allow_delegation(true)
            .build()
            .unwrap(),
    );
    let writer = Arc::new(
        Agent::builder("Writer")
            .goal("Narrate compelling tech stories about {topic}")
            .backstory("With a flair for simplifying complex topics.")
            .llm(llm)
            .build()
            .unwrap(),
    );

    Arc::new(
        Crew::builder()
            .agent(researcher.clone())
            .agent(writer.clone())
            .task(
                Task::builder("Identify the next big trend in {topic}.")
                    .expected_output("A report on {topic}.")
                    .agent(researcher)
                    .build()
                    .unwrap(),
            )
            .task(
                Task::builder("Compose an insightful article on {topic}.")
                    .expected_output(
                        "A 4-paragraph article on {topic} advancements formatted as markdown.",
                    )
                    .agent(writer)
                    .output_file(output)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap(),
    )
}

fn app(llm: Arc<dyn Llm>, output: &Path) -> Router {
    create_app(ServerConfig::new(crew(llm, output)))
}

fn form_post(topic: &str) -> Request<Body> {
    let body = format!("topic={}", topic.replace(' ', "+"));
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn api_post(topic: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "topic": topic }).to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_renders_form_without_running_crew() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new-blog-post.md");
    let llm = Arc::new(MockLlm::from_fn("mock", scripted));
    let app = app(llm.clone(), &path);

    let response = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Enter a technology topic:"));
    assert!(body.contains("value=\"AI in healthcare\""));
    assert!(body.contains("Generate Article"));
    assert_eq!(llm.call_count(), 0);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_index_prefills_configured_topic() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(MockLlm::from_fn("mock", scripted));
    let config = ServerConfig::new(crew(llm, &dir.path().join("out.md")))
        .with_default_topic("quantum computing");

    let response = create_app(config)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(body_text(response).await.contains("value=\"quantum computing\""));
}

#[tokio::test]
async fn test_oversized_submission_is_rejected_without_running_crew() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.md");
    let llm = Arc::new(MockLlm::from_fn("mock", scripted));
    let config = ServerConfig::new(crew(llm.clone(), &path))
        .with_security(SecurityConfig { max_body_size: 16 });

    let response = create_app(config).oneshot(form_post(&"a".repeat(64))).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(llm.call_count(), 0);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_form_submission_renders_the_written_article() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new-blog-post.md");
    let llm = Arc::new(MockLlm::from_fn("mock", scripted));
    let app = app(llm.clone(), &path);

    let response = app.oneshot(form_post("AI in healthcare")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(body.contains(&render_markdown(&written)));
    assert!(body.contains("<h1>The Future</h1>"));
    assert!(body.contains("value=\"AI in healthcare\""));
    assert_eq!(llm.call_count(), 2);
}

#[tokio::test]
async fn test_api_returns_the_written_article() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new-blog-post.md");
    let app = app(Arc::new(MockLlm::from_fn("mock", scripted)), &path);

    let response = app.oneshot(api_post("AI in healthcare")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["article"], std::fs::read_to_string(&path).unwrap());
}

#[tokio::test]
async fn test_empty_google_key_shows_error_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new-blog-post.md");
    let gemini =
        GeminiModel::new(GeminiConfig::new("").with_base_url("http://127.0.0.1:9")).unwrap();
    let app = app(Arc::new(gemini), &path);

    let response = app.oneshot(form_post("AI in healthcare")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.contains("An error occurred: Configuration error: GOOGLE_API_KEY is not set"));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_research_failure_shows_error_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new-blog-post.md");
    let llm = Arc::new(MockLlm::from_fn("mock", |req| {
        if is_researcher(req) {
            Err(NewsdeskError::Model("Gemini API error (429 Too Many Requests): quota".to_string()))
        } else {
            scripted(req)
        }
    }));
    let app = app(llm.clone(), &path);

    let response = app.oneshot(api_post("AI in healthcare")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(json["error"].as_str().unwrap().contains("quota"));
    assert_eq!(llm.call_count(), 1);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_health_and_security_headers() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(MockLlm::new("mock")), &dir.path().join("out.md"));

    let response =
        app.oneshot(Request::get("/api/health").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(body_text(response).await, "OK");
}

/// Counts how many generate calls overlap.
struct SlowLlm {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[async_trait]
impl Llm for SlowLlm {
    fn name(&self) -> &str {
        "slow"
    }

    async fn generate_content(&self, _req: LlmRequest) -> Result<LlmResponse> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(LlmResponse::text("text"))
    }
}

#[tokio::test]
async fn test_submissions_run_one_at_a_time() {
    let dir = tempfile::tempdir().unwrap();
    let llm =
        Arc::new(SlowLlm { in_flight: AtomicUsize::new(0), max_in_flight: AtomicUsize::new(0) });
    let app = app(llm.clone(), &dir.path().join("out.md"));

    let (first, second) =
        tokio::join!(app.clone().oneshot(api_post("a")), app.clone().oneshot(api_post("b")));

    assert_eq!(first.unwrap().status(), StatusCode::OK);
    assert_eq!(second.unwrap().status(), StatusCode::OK);
    assert_eq!(llm.max_in_flight.load(Ordering::SeqCst), 1);
}
