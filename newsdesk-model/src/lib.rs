//! # newsdesk-model
//!
//! Language-model integrations for Newsdesk agents.
//!
//! - [`GeminiModel`] - Google's Gemini models over the public REST API
//! - [`MockLlm`] - Scripted model for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use newsdesk_model::{GeminiConfig, GeminiModel};
//!
//! let api_key = std::env::var("GOOGLE_API_KEY").unwrap_or_default();
//! let model = GeminiModel::new(GeminiConfig::new(api_key)).unwrap();
//! ```
//!
//! The adapter performs a single request per call. Provider errors
//! (invalid key, rate limit, network failure) are returned to the caller
//! without retrying.

pub mod gemini;
pub mod mock;

pub use gemini::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, GeminiConfig, GeminiModel};
pub use mock::MockLlm;
