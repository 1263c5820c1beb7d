//! Loader-specific error types.

use nautobot_client::NautobotError;
use thiserror::Error;

/// Errors that abort the inventory loader.
///
/// Per-resource fetch failures are reported and skipped; only these stop the run.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Nautobot client could not be constructed
    #[error("Nautobot error: {0}")]
    Nautobot(#[from] NautobotError),

    /// Writing the report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
