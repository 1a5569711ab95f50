//! # Newsdesk Telemetry
//!
//! Structured logging for Newsdesk with `tracing`.
//!
//! ## Usage
//!
//! ```rust
//! use newsdesk_telemetry::{init_telemetry, info, instrument};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry("newsdesk")?;
//!
//!     #[instrument]
//!     async fn research() {
//!         info!("Research started");
//!     }
//!     Ok(())
//! }
//! ```

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{Instrument, Level, Span, debug, error, info, instrument, trace, warn};

pub use init::{init_telemetry, init_with_default_level};
pub use spans::*;
