use newsdesk_core::UsageMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token usage summed over every model call of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetrics {
    pub total_tokens: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub successful_requests: u64,
}

impl UsageMetrics {
    /// Count one successful model request and its reported usage, if any.
    pub fn record(&mut self, usage: Option<&UsageMetadata>) {
        self.successful_requests += 1;
        if let Some(usage) = usage {
            self.prompt_tokens += usage.prompt_token_count.max(0) as u64;
            self.completion_tokens += usage.candidates_token_count.max(0) as u64;
            self.total_tokens += usage.total_token_count.max(0) as u64;
        }
    }

    pub fn merge(&mut self, other: &UsageMetrics) {
        self.total_tokens += other.total_tokens;
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.successful_requests += other.successful_requests;
    }
}

/// What an agent produced for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutput {
    pub raw: String,
    pub usage: UsageMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Task description after input interpolation.
    pub description: String,
    /// First ten words of the description.
    pub summary: String,
    pub raw: String,
    /// Role of the agent that ran the task.
    pub agent: String,
}

impl TaskOutput {
    pub fn new(
        description: impl Into<String>,
        raw: impl Into<String>,
        agent: impl Into<String>,
    ) -> Self {
        let description = description.into();
        let summary = description.split_whitespace().take(10).collect::<Vec<_>>().join(" ");
        Self { description, summary, raw: raw.into(), agent: agent.into() }
    }
}

impl fmt::Display for TaskOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Result of a crew kickoff. `raw` is the last task's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewOutput {
    pub raw: String,
    pub tasks_output: Vec<TaskOutput>,
    pub token_usage: UsageMetrics,
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
