//! Subscriber initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize console logging at `info` unless `RUST_LOG` says otherwise.
///
/// # Example
/// ```
/// use newsdesk_telemetry::init_telemetry;
/// init_telemetry("newsdesk").expect("Failed to initialize telemetry");
/// ```
pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    init_with_default_level(service_name, "info")
}

/// Initialize console logging with `default_level` as the fallback filter
/// when `RUST_LOG` is unset or invalid. Only the first call installs a
/// subscriber; later calls are no-ops.
pub fn init_with_default_level(
    service_name: &str,
    default_level: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut result = Ok(());

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        result = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true),
            )
            .try_init()
            .map_err(|e| e.into());

        tracing::info!(service.name = service_name, "Telemetry initialized");
    });

    result
}
