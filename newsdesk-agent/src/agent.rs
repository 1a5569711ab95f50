use crate::output::{AgentOutput, UsageMetrics};
use crate::prompt::{self, TaskPrompt};
use newsdesk_core::{
    Content, Inputs, Llm, LlmRequest, NewsdeskError, Part, Result, Tool, ToolContext,
    function_declaration, interpolate_inputs,
};
use newsdesk_telemetry::{Instrument, model_call_span, tool_execute_span};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Upper bound on model turns for one task.
pub const DEFAULT_MAX_ITER: usize = 15;

/// Log a step at info when the agent is verbose, at debug otherwise.
macro_rules! step {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

/// A persona bound to a model and a set of tools.
///
/// `goal` and `backstory` may contain `{name}` placeholders filled from the
/// kickoff inputs.
pub struct Agent {
    role: String,
    goal: String,
    backstory: String,
    llm: Arc<dyn Llm>,
    tools: Vec<Arc<dyn Tool>>,
    allow_delegation: bool,
    verbose: bool,
    max_iter: usize,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("model", &self.llm.name())
            .field("tools_count", &self.tools.len())
            .field("allow_delegation", &self.allow_delegation)
            .finish()
    }
}

pub struct AgentBuilder {
    role: String,
    goal: Option<String>,
    backstory: Option<String>,
    llm: Option<Arc<dyn Llm>>,
    tools: Vec<Arc<dyn Tool>>,
    allow_delegation: bool,
    verbose: bool,
    max_iter: usize,
}

impl AgentBuilder {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: None,
            backstory: None,
            llm: None,
            tools: Vec::new(),
            allow_delegation: false,
            verbose: false,
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    pub fn backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = Some(backstory.into());
        self
    }

    pub fn llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn allow_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn build(self) -> Result<Agent> {
        if self.role.trim().is_empty() {
            return Err(NewsdeskError::Agent("Agent role must not be empty".to_string()));
        }
        let missing = |field: &str| {
            NewsdeskError::Agent(format!("Agent '{}' requires a {}", self.role, field))
        };
        let goal = self.goal.clone().ok_or_else(|| missing("goal"))?;
        let backstory = self.backstory.clone().ok_or_else(|| missing("backstory"))?;
        let llm = self.llm.clone().ok_or_else(|| missing("model"))?;
        if self.max_iter == 0 {
            return Err(NewsdeskError::Agent("max_iter must be at least 1".to_string()));
        }

        Ok(Agent {
            role: self.role,
            goal,
            backstory,
            llm,
            tools: self.tools,
            allow_delegation: self.allow_delegation,
            verbose: self.verbose,
            max_iter: self.max_iter,
        })
    }
}

struct AgentToolContext {
    agent_role: String,
    function_call_id: String,
}

impl ToolContext for AgentToolContext {
    fn agent_role(&self) -> &str {
        &self.agent_role
    }

    fn function_call_id(&self) -> &str {
        &self.function_call_id
    }
}

impl Agent {
    pub fn builder(role: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(role)
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn backstory(&self) -> &str {
        &self.backstory
    }

    pub fn llm(&self) -> &Arc<dyn Llm> {
        &self.llm
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn allow_delegation(&self) -> bool {
        self.allow_delegation
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Render the persona with `inputs` filled in.
    pub fn system_instruction(&self, inputs: &Inputs) -> Result<String> {
        let goal = interpolate_inputs(&self.goal, inputs)?;
        let backstory = interpolate_inputs(&self.backstory, inputs)?;
        Ok(prompt::system_instruction(&self.role, &goal, &backstory))
    }

    /// Run one task to a final answer.
    ///
    /// The model is called with the agent's persona, the task prompt and the
    /// declarations of `tools`. Function calls are executed and their
    /// results sent back until the model answers in plain text. A tool error
    /// fails the task; a call to a tool not in `tools` is answered with an
    /// error payload.
    #[tracing::instrument(skip_all, fields(agent.role = %self.role))]
    pub async fn execute_task(
        &self,
        task: &TaskPrompt,
        tools: &[Arc<dyn Tool>],
        inputs: &Inputs,
    ) -> Result<AgentOutput> {
        let system_instruction = self.system_instruction(inputs)?;
        let declarations: BTreeMap<String, Value> = tools
            .iter()
            .map(|tool| (tool.name().to_string(), function_declaration(tool.as_ref())))
            .collect();

        let mut contents = vec![Content::new("user").with_text(task.render())];
        let mut usage = UsageMetrics::default();

        step!(self.verbose, tools = tools.len(), "Working on task: {}", task.description);

        for iteration in 1..=self.max_iter {
            let mut request = LlmRequest::new(self.llm.name(), contents.clone())
                .with_system_instruction(system_instruction.clone());
            request.tools = declarations.clone();

            let response = self
                .llm
                .generate_content(request)
                .instrument(model_call_span(self.llm.name()))
                .await?;
            usage.record(response.usage_metadata.as_ref());
            let finish_reason = response.finish_reason;

            let content = response.content.ok_or_else(|| {
                NewsdeskError::Agent(format!(
                    "Model returned no content for agent '{}' (finish reason: {:?})",
                    self.role, finish_reason
                ))
            })?;

            if !content.has_function_calls() {
                let answer = content.text();
                if answer.trim().is_empty() {
                    return Err(NewsdeskError::Agent(format!(
                        "Model returned an empty answer for agent '{}' (finish reason: {:?})",
                        self.role, finish_reason
                    )));
                }
                step!(self.verbose, iteration, "Final answer: {}", answer);
                return Ok(AgentOutput { raw: answer, usage });
            }

            let responses = self.run_function_calls(&content, tools).await?;
            contents.push(Content { role: "model".to_string(), parts: content.parts });
            contents.push(responses);
        }

        Err(NewsdeskError::Agent(format!(
            "Agent '{}' exceeded the maximum of {} iterations without a final answer",
            self.role, self.max_iter
        )))
    }

    async fn run_function_calls(
        &self,
        content: &Content,
        tools: &[Arc<dyn Tool>],
    ) -> Result<Content> {
        let mut responses = Content::new("function");

        for part in &content.parts {
            let Part::FunctionCall { name, args, id } = part else {
                continue;
            };
            let call_id = id.clone().unwrap_or_else(|| format!("call-{}", uuid::Uuid::new_v4()));
            step!(self.verbose, tool = %name, "Using tool with input: {}", args);

            let result = match tools.iter().find(|t| t.name() == name) {
                Some(tool) => {
                    let ctx = Arc::new(AgentToolContext {
                        agent_role: self.role.clone(),
                        function_call_id: call_id.clone(),
                    }) as Arc<dyn ToolContext>;
                    tool.execute(ctx, args.clone()).instrument(tool_execute_span(name)).await?
                }
                None => {
                    tracing::warn!(
                        tool = %name,
                        agent.role = %self.role,
                        "Model called an unknown tool"
                    );
                    let available: Vec<&str> = tools.iter().map(|t| t.name()).collect();
                    json!({
                        "error": format!(
                            "Unknown tool '{}'. Available tools: {}",
                            name,
                            available.join(", ")
                        )
                    })
                }
            };

            responses.parts.push(Part::FunctionResponse {
                function_response: newsdesk_core::FunctionResponseData {
                    name: name.clone(),
                    response: result,
                },
                id: Some(call_id),
            });
        }

        Ok(responses)
    }
}
