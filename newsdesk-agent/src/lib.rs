//! # newsdesk-agent
//!
//! Agents, tasks and the crew that runs them.
//!
//! - [`Agent`] - A persona (role, goal, backstory) bound to a model and tools
//! - [`Task`] - An instruction, its expected output and the agent that runs it
//! - [`Crew`] - Runs tasks sequentially, feeding earlier outputs forward as context
//!
//! Agents that allow delegation get two extra tools inside a crew,
//! `delegate_work_to_coworker` and `ask_question_to_coworker`.

mod agent;
mod crew;
pub mod delegation;
mod output;
mod prompt;
mod task;

pub use agent::{Agent, AgentBuilder, DEFAULT_MAX_ITER};
pub use crew::{Crew, CrewBuilder};
pub use output::{AgentOutput, CrewOutput, TaskOutput, UsageMetrics};
pub use prompt::{CONTEXT_SEPARATOR, TaskPrompt};
pub use task::{Task, TaskBuilder};
