//! Logic Module - Triage pipeline
//!
//! - `directory/` - Person API authentication and user lookup
//! - `triage/` - Alert classification into triage requests
//! - `dispatch/` - Lambda invocation and outcome classification
//! - `session` - Token lifetime and per-message orchestration

pub mod directory;
pub mod dispatch;
pub mod http;
pub mod session;
pub mod triage;

#[cfg(test)]
pub(crate) mod testing;
