use crate::agent::Agent;
use crate::delegation::delegation_tools;
use crate::output::{AgentOutput, CrewOutput, TaskOutput, UsageMetrics};
use crate::prompt::join_context;
use crate::task::{Task, write_output_file};
use newsdesk_core::{Inputs, NewsdeskError, Result, Tool};
use newsdesk_telemetry::{Instrument, task_execute_span};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Agents and the tasks they run, one after the other.
///
/// ```rust,ignore
/// let crew = Crew::builder()
///     .agent(researcher.clone())
///     .agent(writer.clone())
///     .task(research_task)
///     .task(write_task)
///     .build()?;
///
/// let output = crew.kickoff(&inputs).await?;
/// println!("{}", output.raw);
/// ```
pub struct Crew {
    agents: Vec<Arc<Agent>>,
    tasks: Vec<Task>,
    verbose: bool,
}

impl std::fmt::Debug for Crew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crew")
            .field("agents", &self.agents.iter().map(|a| a.role()).collect::<Vec<_>>())
            .field("tasks_count", &self.tasks.len())
            .finish()
    }
}

#[derive(Default)]
pub struct CrewBuilder {
    agents: Vec<Arc<Agent>>,
    tasks: Vec<Task>,
    verbose: bool,
}

impl CrewBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent(mut self, agent: Arc<Agent>) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(self) -> Result<Crew> {
        if self.tasks.is_empty() {
            return Err(NewsdeskError::Task("A crew needs at least one task".to_string()));
        }

        for (i, agent) in self.agents.iter().enumerate() {
            if self.agents[..i].iter().any(|a| a.role().eq_ignore_ascii_case(agent.role())) {
                return Err(NewsdeskError::Agent(format!(
                    "Duplicate agent role '{}' in crew",
                    agent.role()
                )));
            }
        }

        for task in &self.tasks {
            let role = task.agent().role();
            if !self.agents.iter().any(|a| a.role() == role) {
                return Err(NewsdeskError::Task(format!(
                    "Task '{}' is assigned to agent '{}', which is not part of the crew",
                    task.description(),
                    role
                )));
            }
        }

        if self.tasks.last().is_some_and(Task::async_execution) {
            return Err(NewsdeskError::Task(
                "The crew's last task cannot run asynchronously".to_string(),
            ));
        }

        Ok(Crew { agents: self.agents, tasks: self.tasks, verbose: self.verbose })
    }
}

struct PendingTask {
    index: usize,
    description: String,
    handle: JoinHandle<Result<AgentOutput>>,
}

/// Async tasks still running. Dropping the set aborts them, so a failed
/// kickoff leaves nothing behind.
#[derive(Default)]
struct PendingTasks(Vec<PendingTask>);

impl Drop for PendingTasks {
    fn drop(&mut self) {
        for pending in &self.0 {
            pending.handle.abort();
        }
    }
}

/// Outputs and usage accumulated during one kickoff.
#[derive(Default)]
struct RunState {
    outputs: Vec<TaskOutput>,
    usage: UsageMetrics,
}

impl Crew {
    pub fn builder() -> CrewBuilder {
        CrewBuilder::new()
    }

    pub fn agents(&self) -> &[Arc<Agent>] {
        &self.agents
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Run every task in order with `inputs` filled into the templates.
    ///
    /// All templates are interpolated before the first model call, so a
    /// missing input fails without side effects. Each task sees the outputs
    /// of the tasks finished before it as context. Any failure ends the run;
    /// output files are only written for tasks that succeeded.
    #[tracing::instrument(skip_all, fields(crew.tasks = self.tasks.len()))]
    pub async fn kickoff(&self, inputs: &Inputs) -> Result<CrewOutput> {
        let prompts = self.tasks.iter().map(|t| t.prompt(inputs)).collect::<Result<Vec<_>>>()?;
        for agent in &self.agents {
            agent.system_instruction(inputs)?;
        }

        self.log(&format!("Crew kickoff with {} tasks", self.tasks.len()));

        let inputs = Arc::new(inputs.clone());
        let delegated_usage = Arc::new(Mutex::new(UsageMetrics::default()));
        let mut state = RunState::default();
        let mut pending = PendingTasks::default();

        for (index, (task, prompt)) in self.tasks.iter().zip(prompts).enumerate() {
            if !task.async_execution() {
                self.join_pending(&mut pending, &mut state).await?;
            }

            let context = join_context(state.outputs.iter().map(|o| o.raw.as_str()));
            let prompt = prompt.with_context(context);
            let tools = self.tools_for(task, &inputs, &delegated_usage);
            let agent = task.agent().clone();
            let span = task_execute_span(agent.role(), index);
            self.log(&format!("Task {} started by {}", index + 1, agent.role()));

            if task.async_execution() {
                let description = prompt.description.clone();
                let inputs = inputs.clone();
                let handle = tokio::spawn(
                    async move { agent.execute_task(&prompt, &tools, &inputs).await }
                        .instrument(span),
                );
                pending.0.push(PendingTask { index, description, handle });
                continue;
            }

            let output = agent.execute_task(&prompt, &tools, &inputs).instrument(span).await?;
            self.finish_task(index, prompt.description, output, &mut state).await?;
        }

        self.join_pending(&mut pending, &mut state).await?;
        state.usage.merge(&*delegated_usage.lock().await);

        let raw = state.outputs.last().map(|o| o.raw.clone()).unwrap_or_default();
        self.log(&format!(
            "Crew finished ({} model requests, {} tokens)",
            state.usage.successful_requests, state.usage.total_tokens
        ));

        Ok(CrewOutput { raw, tasks_output: state.outputs, token_usage: state.usage })
    }

    fn tools_for(
        &self,
        task: &Task,
        inputs: &Arc<Inputs>,
        usage: &Arc<Mutex<UsageMetrics>>,
    ) -> Vec<Arc<dyn Tool>> {
        let mut tools = task.effective_tools();
        let agent = task.agent();

        if agent.allow_delegation() {
            let coworkers: Vec<Arc<Agent>> =
                self.agents.iter().filter(|a| a.role() != agent.role()).cloned().collect();
            if !coworkers.is_empty() {
                tools.extend(delegation_tools(coworkers, inputs.clone(), usage.clone()));
            }
        }

        tools
    }

    async fn join_pending(&self, pending: &mut PendingTasks, state: &mut RunState) -> Result<()> {
        while !pending.0.is_empty() {
            let PendingTask { index, description, handle } = pending.0.remove(0);
            let output = handle.await.map_err(|e| {
                NewsdeskError::Task(format!("Async task {} did not complete: {}", index + 1, e))
            })??;
            self.finish_task(index, description, output, state).await?;
        }
        Ok(())
    }

    async fn finish_task(
        &self,
        index: usize,
        description: String,
        output: AgentOutput,
        state: &mut RunState,
    ) -> Result<()> {
        let task = &self.tasks[index];

        if let Some(path) = task.output_file() {
            write_output_file(path, &output.raw).await?;
            self.log(&format!("Task {} output written to {}", index + 1, path.display()));
        }

        state.usage.merge(&output.usage);
        state.outputs.push(TaskOutput::new(description, output.raw, task.agent().role()));
        self.log(&format!("Task {} completed", index + 1));
        Ok(())
    }

    fn log(&self, message: &str) {
        if self.verbose {
            tracing::info!("{}", message);
        } else {
            tracing::debug!("{}", message);
        }
    }
}
