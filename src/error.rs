//! Error handling

use thiserror::Error;

use crate::config::ConfigError;

pub type TriageResult<T> = Result<T, TriageError>;

/// Hard failures surfaced to the hosting pipeline.
///
/// Everything recoverable (missing fields, failed lookups, failed dispatch)
/// degrades to "no request" instead of becoming one of these.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Failed to authenticate to the Person API")]
    AuthFailure,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Alert stream I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
