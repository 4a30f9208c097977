//! Dispatch Types

use thiserror::Error;

/// Good / bad / unknown outcome of a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    Success,
    Failure,
    Indeterminate,
}

impl DispatchResult {
    /// 2xx succeeds, 4xx/5xx fails, anything else is unknown
    pub fn from_status(status: u16) -> Self {
        if status >= 400 {
            DispatchResult::Failure
        } else if (200..300).contains(&status) {
            DispatchResult::Success
        } else {
            DispatchResult::Indeterminate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchResult::Success => "success",
            DispatchResult::Failure => "failure",
            DispatchResult::Indeterminate => "indeterminate",
        }
    }
}

/// Errors raised before a target produced a status
#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("signing error: {0}")]
    Signing(String),
}
