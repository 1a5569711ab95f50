//! # newsdesk-cli
//!
//! Command-line launcher for the tech news generator.
//!
//! ## Overview
//!
//! - [`build_news_crew`] - The researcher/writer crew, given any model and search tool
//! - [`AppConfig`] - Model settings, credentials and output path
//! - [`run_serve`] - Web front end
//! - [`run_once`] - One article, printed to stdout
//!
//! ## Usage
//!
//! ```bash
//! newsdesk serve --port 8501
//! newsdesk run --topic "quantum computing"
//! ```
//!
//! Both commands read `GOOGLE_API_KEY` and `SERPER_API_KEY` from the
//! environment or a `.env` file.

pub mod cli;
pub mod config;
pub mod news_crew;
pub mod run;
pub mod serve;

pub use config::AppConfig;
pub use news_crew::{build_default_crew, build_news_crew};
pub use run::run_once;
pub use serve::{ServeOptions, run_serve, server_config};
