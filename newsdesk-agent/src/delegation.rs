//! Tools that let an agent hand work or questions to a coworker in the same crew.

use crate::agent::Agent;
use crate::output::UsageMetrics;
use crate::prompt::TaskPrompt;
use async_trait::async_trait;
use newsdesk_core::{Inputs, NewsdeskError, Result, Tool, ToolContext};
use newsdesk_tool::parameters_schema;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const DELEGATE_WORK_TOOL: &str = "delegate_work_to_coworker";
pub const ASK_QUESTION_TOOL: &str = "ask_question_to_coworker";

const COWORKER_EXPECTED_OUTPUT: &str =
    "Your best answer to your coworker asking you this, accounting for the context shared.";

#[derive(Debug, Deserialize, JsonSchema)]
struct DelegateWorkArgs {
    /// The task to delegate.
    task: String,
    /// The context for the task.
    context: String,
    /// The role of the coworker to delegate to.
    coworker: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AskQuestionArgs {
    /// The question to ask.
    question: String,
    /// The context for the question.
    context: String,
    /// The role of the coworker to ask.
    coworker: String,
}

/// Coworkers reachable from one delegating agent during one kickoff.
#[derive(Clone)]
struct Coworkers {
    agents: Vec<Arc<Agent>>,
    inputs: Arc<Inputs>,
    usage: Arc<Mutex<UsageMetrics>>,
}

impl Coworkers {
    fn roles(&self) -> String {
        self.agents.iter().map(|a| a.role()).collect::<Vec<_>>().join(", ")
    }

    fn find(&self, coworker: &str) -> Result<&Arc<Agent>> {
        let wanted = coworker.trim();
        self.agents.iter().find(|a| a.role().eq_ignore_ascii_case(wanted)).ok_or_else(|| {
            NewsdeskError::Tool(format!(
                "Coworker '{}' not found. Choose one of: {}",
                coworker,
                self.roles()
            ))
        })
    }

    /// Run the coworker with its own tools only, so it cannot delegate further.
    async fn run(&self, coworker: &str, request: String, context: String) -> Result<Value> {
        let agent = self.find(coworker)?;
        tracing::info!(coworker = %agent.role(), "Delegating to coworker");

        let prompt = TaskPrompt::new(request, COWORKER_EXPECTED_OUTPUT).with_context(context);
        let output = agent.execute_task(&prompt, agent.tools(), &self.inputs).await?;
        self.usage.lock().await.merge(&output.usage);

        Ok(json!({ "result": output.raw }))
    }
}

pub struct DelegateWorkTool {
    coworkers: Coworkers,
    description: String,
}

pub struct AskQuestionTool {
    coworkers: Coworkers,
    description: String,
}

/// Build both delegation tools for an agent.
///
/// `coworkers` must not include the delegating agent. Usage of every
/// coworker run is added to `usage`.
pub fn delegation_tools(
    coworkers: Vec<Arc<Agent>>,
    inputs: Arc<Inputs>,
    usage: Arc<Mutex<UsageMetrics>>,
) -> Vec<Arc<dyn Tool>> {
    let coworkers = Coworkers { agents: coworkers, inputs, usage };
    let roles = coworkers.roles();

    vec![
        Arc::new(DelegateWorkTool {
            description: format!(
                "Delegate a specific task to one of the following coworkers: {}\n\
                 The input to this tool should be the coworker, the task you want them to do, \
                 and ALL necessary context to execute the task. They know nothing about the task, \
                 so share everything you know and explain instead of referencing things.",
                roles
            ),
            coworkers: coworkers.clone(),
        }),
        Arc::new(AskQuestionTool {
            description: format!(
                "Ask a specific question to one of the following coworkers: {}\n\
                 The input to this tool should be the coworker, the question you have for them, \
                 and ALL necessary context to ask the question properly. They know nothing about \
                 the question, so share everything you know and explain instead of referencing \
                 things.",
                roles
            ),
            coworkers,
        }),
    ]
}

fn parse_args<T: for<'de> Deserialize<'de>>(tool: &str, args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| NewsdeskError::Tool(format!("Invalid arguments for {}: {}", tool, e)))
}

#[async_trait]
impl Tool for DelegateWorkTool {
    fn name(&self) -> &str {
        DELEGATE_WORK_TOOL
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(parameters_schema::<DelegateWorkArgs>())
    }

    async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
        let args: DelegateWorkArgs = parse_args(DELEGATE_WORK_TOOL, args)?;
        self.coworkers.run(&args.coworker, args.task, args.context).await
    }
}

#[async_trait]
impl Tool for AskQuestionTool {
    fn name(&self) -> &str {
        ASK_QUESTION_TOOL
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(parameters_schema::<AskQuestionArgs>())
    }

    async fn execute(&self, _ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
        let args: AskQuestionArgs = parse_args(ASK_QUESTION_TOOL, args)?;
        self.coworkers.run(&args.coworker, args.question, args.context).await
    }
}
