//! # newsdesk-core
//!
//! Core traits and types shared by every Newsdesk crate.
//!
//! ## Overview
//!
//! - [`Llm`] - The interface a hosted language model is driven through
//! - [`Tool`] - A capability an agent may invoke while working on a task
//! - [`Content`] / [`Part`] - Conversation turns exchanged with the model
//! - [`Credentials`] - API keys read from the environment
//! - [`NewsdeskError`] / [`Result`] - Unified error handling
//!
//! ## Core Traits
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait Llm: Send + Sync {
//!     fn name(&self) -> &str;
//!     async fn generate_content(&self, req: LlmRequest) -> Result<LlmResponse>;
//! }
//!
//! #[async_trait]
//! pub trait Tool: Send + Sync {
//!     fn name(&self) -> &str;
//!     fn description(&self) -> &str;
//!     async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value>;
//! }
//! ```

pub mod credentials;
pub mod error;
pub mod model;
pub mod template;
pub mod tool;
pub mod types;

pub use credentials::{Credentials, GOOGLE_API_KEY_ENV, SERPER_API_KEY_ENV};
pub use error::{NewsdeskError, Result};
pub use model::{FinishReason, GenerateContentConfig, Llm, LlmRequest, LlmResponse, UsageMetadata};
pub use template::{Inputs, interpolate_inputs};
pub use tool::{Tool, ToolContext, function_declaration};
pub use types::{Content, FunctionResponseData, Part};
