//! Triage Relay
//!
//! Receives security alerts from the monitoring pipeline, classifies them
//! against a fixed set of alert shapes, resolves the owning user through the
//! Person API and forwards a triage request to the notification Lambda.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      TRIAGE SESSION                      │
//! │  alert ─▶ classifier ─▶ (token refresh) ─▶ dispatcher    │
//! │               │                                │         │
//! │               ▼                                ▼         │
//! │        ┌─────────────┐                 ┌─────────────┐   │
//! │        │ Person API  │                 │ AWS Lambda  │   │
//! │        └─────────────┘                 └─────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::{Config, ConfigError};
pub use error::{TriageError, TriageResult};
pub use logic::session::TriageSession;
