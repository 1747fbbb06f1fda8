//! Logging setup for the tabrotate binary.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! operator-facing progress report.

use crate::Result;
use tracing_subscriber::EnvFilter;

/// Maps the CLI verbosity flags onto a tracing level.
///
/// `quiet` wins over any number of `-v` flags.
pub fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Initializes structured logging based on verbosity level.
///
/// A `RUST_LOG` directive, when set, replaces the level derived from the
/// flags. Otherwise HTTP stack crates are capped at WARN so `-vv` stays
/// readable.
///
/// # Example
/// ```rust,no_run
/// use tabrotate_core::logging::init_logging;
///
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = level_for(verbose, quiet);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(format!(
            "{},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn",
            level.as_str().to_lowercase()
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| {
            crate::error::TabRotateError::configuration(format!(
                "Failed to initialize logging: {}",
                e
            ))
        })?;

    Ok(())
}
