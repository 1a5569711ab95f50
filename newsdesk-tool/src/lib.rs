//! # newsdesk-tool
//!
//! Tools the Newsdesk agents can call.
//!
//! - [`SerperSearchTool`] - Web search through the Serper API
//! - [`FunctionTool`] - Wrap an async Rust function as a tool
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use newsdesk_tool::{FunctionTool, SerperConfig, SerperSearchTool};
//! use newsdesk_core::{Result, ToolContext};
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! async fn word_count(_ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
//!     let text = args["text"].as_str().unwrap_or_default();
//!     Ok(json!({ "words": text.split_whitespace().count() }))
//! }
//!
//! let counter = FunctionTool::new("word_count", "Count the words in a text", word_count);
//! let search = SerperSearchTool::new(SerperConfig::new("serper-key"));
//! ```

mod function_tool;
pub mod schema;
pub mod serper;

pub use function_tool::FunctionTool;
pub use schema::parameters_schema;
pub use serper::{SERPER_API_BASE, SearchResult, SerperConfig, SerperSearchTool};
