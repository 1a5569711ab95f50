use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// JSON schema of the arguments object, sent to the model as the
    /// function declaration's `parameters`.
    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value>;
}

/// What a tool can see about the call that triggered it.
pub trait ToolContext: Send + Sync {
    /// Role of the agent that issued the call.
    fn agent_role(&self) -> &str;
    fn function_call_id(&self) -> &str;
}

/// Builds the function declaration the model sees for a tool.
pub fn function_declaration(tool: &dyn Tool) -> Value {
    let mut decl = serde_json::json!({
        "name": tool.name(),
        "description": tool.description(),
    });
    if let Some(params) = tool.parameters_schema() {
        decl["parameters"] = params;
    }
    decl
}
