use crate::agent::Agent;
use crate::prompt::TaskPrompt;
use newsdesk_core::{Inputs, NewsdeskError, Result, Tool, interpolate_inputs};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A unit of work assigned to an agent.
pub struct Task {
    description: String,
    expected_output: String,
    agent: Arc<Agent>,
    tools: Vec<Arc<dyn Tool>>,
    output_file: Option<PathBuf>,
    async_execution: bool,
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("description", &self.description)
            .field("agent", &self.agent.role())
            .field("tools_count", &self.tools.len())
            .field("output_file", &self.output_file)
            .field("async_execution", &self.async_execution)
            .finish()
    }
}

pub struct TaskBuilder {
    description: String,
    expected_output: Option<String>,
    agent: Option<Arc<Agent>>,
    tools: Vec<Arc<dyn Tool>>,
    output_file: Option<PathBuf>,
    async_execution: bool,
}

impl TaskBuilder {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: None,
            agent: None,
            tools: Vec::new(),
            output_file: None,
            async_execution: false,
        }
    }

    pub fn expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = Some(expected_output.into());
        self
    }

    pub fn agent(mut self, agent: Arc<Agent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Tools for this task. When any are set they replace the agent's own.
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    pub fn async_execution(mut self, async_execution: bool) -> Self {
        self.async_execution = async_execution;
        self
    }

    pub fn build(self) -> Result<Task> {
        let expected_output = self.expected_output.ok_or_else(|| {
            NewsdeskError::Task(format!("Task '{}' requires an expected output", self.description))
        })?;
        let agent = self.agent.ok_or_else(|| {
            NewsdeskError::Task(format!("Task '{}' requires an agent", self.description))
        })?;

        Ok(Task {
            description: self.description,
            expected_output,
            agent,
            tools: self.tools,
            output_file: self.output_file,
            async_execution: self.async_execution,
        })
    }
}

impl Task {
    pub fn builder(description: impl Into<String>) -> TaskBuilder {
        TaskBuilder::new(description)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    pub fn agent(&self) -> &Arc<Agent> {
        &self.agent
    }

    /// Tools the agent may call for this task: the task's own if any,
    /// otherwise the agent's.
    pub fn effective_tools(&self) -> Vec<Arc<dyn Tool>> {
        if self.tools.is_empty() { self.agent.tools().to_vec() } else { self.tools.clone() }
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn async_execution(&self) -> bool {
        self.async_execution
    }

    /// Interpolate the description and expected output.
    pub fn prompt(&self, inputs: &Inputs) -> Result<TaskPrompt> {
        Ok(TaskPrompt::new(
            interpolate_inputs(&self.description, inputs)?,
            interpolate_inputs(&self.expected_output, inputs)?,
        ))
    }
}

/// Write a task's output, creating parent directories as needed.
pub(crate) async fn write_output_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}
