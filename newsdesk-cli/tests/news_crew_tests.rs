use newsdesk_cli::news_crew::{
    RESEARCH_DESCRIPTION, RESEARCHER_ROLE, WRITE_EXPECTED_OUTPUT, WRITER_ROLE, build_news_crew,
};
use newsdesk_core::{Content, Inputs, LlmRequest, LlmResponse, Part, Result};
use newsdesk_model::MockLlm;
use newsdesk_tool::FunctionTool;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn is_researcher(req: &LlmRequest) -> bool {
    req.system_instruction.as_deref().is_some_and(|s| s.starts_with("You are Senior Researcher."))
}

/// The researcher searches once and then reports; the writer answers directly.
fn scripted(req: &LlmRequest) -> Result<LlmResponse> {
    if is_researcher(req) && req.contents.len() == 1 {
        return Ok(LlmResponse::new(Content::new("model").with_part(Part::function_call(
            "search_the_internet",
            json!({"search_query": "quantum computing trends"}),
        ))));
    }
    if is_researcher(req) {
        Ok(LlmResponse::text("Error correction is the next big trend."))
    } else {
        Ok(LlmResponse::text("# Quantum Leaps\n\nError correction is here."))
    }
}

fn fake_search(calls: Arc<AtomicUsize>) -> Arc<FunctionTool> {
    Arc::new(FunctionTool::new("search_the_internet", "Search the internet", move |_ctx, _args| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({
                "results": [{"title": "Qubits", "link": "https://example.com", "snippet": "..."}]
            }))
        }
    }))
}

#[test]
fn test_crew_layout() {
    let dir = tempfile::tempdir().unwrap();
    let crew = build_news_crew(
        Arc::new(MockLlm::new("mock")),
        fake_search(Arc::new(AtomicUsize::new(0))),
        &dir.path().join("new-blog-post.md"),
        false,
    )
    .unwrap();

    let roles: Vec<_> = crew.agents().iter().map(|a| a.role().to_string()).collect();
    assert_eq!(roles, vec![RESEARCHER_ROLE, WRITER_ROLE]);
    assert!(crew.agents()[0].allow_delegation());
    assert!(!crew.agents()[1].allow_delegation());
    assert!(crew.agents().iter().all(|a| a.tools().len() == 1));

    let tasks = crew.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].description(), RESEARCH_DESCRIPTION);
    assert_eq!(tasks[0].agent().role(), RESEARCHER_ROLE);
    assert!(tasks[0].output_file().is_none());
    assert_eq!(tasks[1].expected_output(), WRITE_EXPECTED_OUTPUT);
    assert_eq!(tasks[1].agent().role(), WRITER_ROLE);
    assert!(!tasks[1].async_execution());
    assert_eq!(tasks[1].output_file(), Some(dir.path().join("new-blog-post.md").as_path()));
}

#[tokio::test]
async fn test_kickoff_searches_and_writes_the_article() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("new-blog-post.md");
    let calls = Arc::new(AtomicUsize::new(0));
    let llm = Arc::new(MockLlm::from_fn("mock", scripted));
    let crew = build_news_crew(llm.clone(), fake_search(calls.clone()), &path, false).unwrap();

    let inputs = Inputs::from([("topic".to_string(), "quantum computing".to_string())]);
    let output = crew.kickoff(&inputs).await.unwrap();

    assert_eq!(output.raw, "# Quantum Leaps\n\nError correction is here.");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), output.raw);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(output.tasks_output.len(), 2);
    assert_eq!(output.tasks_output[0].agent, RESEARCHER_ROLE);

    let requests = llm.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[0].tools.contains_key("search_the_internet"));
    assert!(requests[0].tools.contains_key("delegate_work_to_coworker"));
    let research_prompt = requests[0].contents[0].text();
    assert!(research_prompt.contains("Identify the next big trend in quantum computing."));
    assert_eq!(requests[2].tools.keys().collect::<Vec<_>>(), vec!["search_the_internet"]);
    assert!(requests[2].contents[0].text().contains("Error correction is the next big trend."));
}
