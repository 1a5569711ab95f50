use clap::{Parser, Subcommand};
use newsdesk_model::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use newsdesk_server::{DEFAULT_MAX_BODY_SIZE, DEFAULT_TOPIC};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_FILE: &str = "new-blog-post.md";

#[derive(Debug, Parser)]
#[command(name = "newsdesk")]
#[command(
    about = "Research a technology topic and write a news article about it",
    long_about = None
)]
pub struct Cli {
    /// Gemini model identifier
    #[arg(long, global = true, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature, clamped to [0, 1]
    #[arg(long, global = true, default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the web page
    Serve {
        /// Server port
        #[arg(short, long, default_value_t = 8501)]
        port: u16,

        /// Where the generated article is written
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Topic pre-filled in the form
        #[arg(short, long, default_value = DEFAULT_TOPIC)]
        topic: String,

        /// Largest accepted request body, in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_BODY_SIZE)]
        max_body_size: usize,
    },

    /// Generate one article and print it
    Run {
        /// Technology topic
        #[arg(short, long, default_value = DEFAULT_TOPIC)]
        topic: String,

        /// Where the generated article is written
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,
    },
}
