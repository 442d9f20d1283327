//! # Exit Game Telemetry
//!
//! Structured logging for the exit game subsystems. Library crates only
//! emit `tracing` events; binaries and test suites call [`init_tracing`]
//! once to install a subscriber.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pe_telemetry::{init_tracing, TelemetryConfig};
//!
//! let config = TelemetryConfig::for_subsystem("01", "canonicity-challenge");
//! init_tracing(&config).expect("Failed to init tracing");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PE_SERVICE_NAME` | `plasma-exit-game` | Service name in logs |
//! | `PE_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `PE_JSON_LOGS` | `false` | JSON output (defaults on inside containers) |
//! | `PE_CONSOLE_OUTPUT` | `true` | Emit to stdout at all |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_test_tracing, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The filter directive could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A global subscriber was already installed
    #[error("Subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}
