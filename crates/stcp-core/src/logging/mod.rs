//! Structured logging for detectors.
//!
//! The library only emits `tracing` events: `debug` on threshold crossings
//! and resets, `trace` on bulk updates, `warn` when a loaded configuration
//! fails validation. Installing a subscriber is left to the embedding
//! program; [`init_logging`] is a convenience for binaries, tests and
//! benches.
//!
//! ```ignore
//! use stcp_core::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::from_env(None, None));
//! ```
//!
//! All output goes to stderr, in either human or JSONL format.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global subscriber.
///
/// Returns `false` when a subscriber was already installed, in which case
/// the existing one is kept.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_env("STCP_LOG_FILTER")
        .unwrap_or_else(|_| EnvFilter::new(format!("stcp_core={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);
            if config.timestamps {
                registry.with(fmt_layer).try_init()
            } else {
                registry.with(fmt_layer.without_time()).try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false);
            registry.with(json_layer).try_init()
        }
    };
    installed.is_ok()
}

/// Initialize logging from the environment alone.
pub fn init_default_logging() -> bool {
    init_logging(&LogConfig::from_env(None, None))
}
