//! Prompt assembly for agents and tasks.

/// Separator placed between prior task outputs in a task's context.
pub const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

/// The instruction and inputs handed to an agent for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPrompt {
    pub description: String,
    pub expected_output: String,
    pub context: Option<String>,
}

impl TaskPrompt {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            context: None,
        }
    }

    /// Attach context. Empty context is dropped.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = if context.trim().is_empty() { None } else { Some(context) };
        self
    }

    /// Render the user turn that opens the agent's conversation.
    pub fn render(&self) -> String {
        let mut prompt = format!(
            "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\n\
             you MUST return the actual complete content as the final answer, not a summary.",
            self.description, self.expected_output
        );

        if let Some(context) = &self.context {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(context);
        }

        prompt.push_str(
            "\n\nBegin! This is VERY important to you, use the tools available and give your best \
             Final Answer, your job depends on it!",
        );
        prompt
    }
}

pub fn system_instruction(role: &str, goal: &str, backstory: &str) -> String {
    format!("You are {}. {}\nYour personal goal is: {}", role, backstory, goal)
}

/// Join prior outputs into one context block.
pub fn join_context<'a>(outputs: impl IntoIterator<Item = &'a str>) -> String {
    outputs.into_iter().collect::<Vec<_>>().join(CONTEXT_SEPARATOR)
}
