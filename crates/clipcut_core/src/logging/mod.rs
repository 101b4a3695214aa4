//! Logging infrastructure.
//!
//! Library-level events go through the `tracing` ecosystem; each render
//! job additionally gets its own [`JobLogger`] writing a dedicated log
//! file, optionally forwarding lines to an embedding application, and
//! keeping a tail buffer of external-tool output for error diagnosis.

mod job_logger;
mod types;

pub use job_logger::JobLogger;
pub use types::{LogCallback, LogConfig, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber for application-wide logging.
///
/// Respects `RUST_LOG`, falling back to the provided default directive.
/// Should be called once at application startup.
pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
