//! Span helpers for task, model and tool operations.

use tracing::Span;

/// Span covering one task executed by an agent.
///
/// # Example
/// ```
/// use newsdesk_telemetry::task_execute_span;
/// let span = task_execute_span("Writer", 1);
/// let _enter = span.enter();
/// ```
pub fn task_execute_span(agent_role: &str, task_index: usize) -> Span {
    tracing::info_span!("task.execute", agent.role = agent_role, task.index = task_index)
}

pub fn model_call_span(model_name: &str) -> Span {
    tracing::debug_span!("model.call", model.name = model_name)
}

pub fn tool_execute_span(tool_name: &str) -> Span {
    tracing::debug_span!("tool.execute", tool.name = tool_name)
}
