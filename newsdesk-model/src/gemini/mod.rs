//! Gemini provider.

mod client;
mod config;
mod convert;

pub use client::GeminiModel;
pub use config::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, GEMINI_API_BASE, GeminiConfig};
