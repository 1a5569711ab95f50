use async_trait::async_trait;
use newsdesk_core::{Llm, LlmRequest, LlmResponse, NewsdeskError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

type Handler = Box<dyn Fn(&LlmRequest) -> Result<LlmResponse> + Send + Sync>;

/// Scripted model for tests. Every request is recorded.
///
/// Responses come from a queue filled with [`MockLlm::with_response`] /
/// [`MockLlm::with_error`], or from a handler given to [`MockLlm::from_fn`].
pub struct MockLlm {
    name: String,
    queue: Mutex<VecDeque<Result<LlmResponse>>>,
    handler: Option<Handler>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queue: Mutex::new(VecDeque::new()),
            handler: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request through `handler`.
    pub fn from_fn<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&LlmRequest) -> Result<LlmResponse> + Send + Sync + 'static,
    {
        Self { handler: Some(Box::new(handler)), ..Self::new(name) }
    }

    pub fn with_response(self, response: LlmResponse) -> Self {
        self.queue.lock().expect("mock queue poisoned").push_back(Ok(response));
        self
    }

    pub fn with_error(self, error: NewsdeskError) -> Self {
        self.queue.lock().expect("mock queue poisoned").push_back(Err(error));
        self
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().expect("mock requests poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("mock requests poisoned").len()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_content(&self, req: LlmRequest) -> Result<LlmResponse> {
        self.requests.lock().expect("mock requests poisoned").push(req.clone());

        if let Some(handler) = &self.handler {
            return handler(&req);
        }

        self.queue
            .lock()
            .expect("mock queue poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(NewsdeskError::Model("MockLlm has no scripted response left".to_string()))
            })
    }
}
