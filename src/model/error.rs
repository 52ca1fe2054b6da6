//! Error types for the lectern application.
//!
//! The chrome controller itself has no failure modes: stale timers are
//! silent no-ops and conflicting signals resolve by priority. Errors only
//! arise at the edges of the application (configuration, logging and the
//! terminal), and all of them compose into [`AppError`] via `From`.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// All of these are fatal: the binary reports them and exits.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read, parsed or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
