//! Triage Module - Alert classification
//!
//! # Components
//! - `types.rs`: alert labels and the outbound triage request
//! - `rules.rs`: predicate table (priority order) and notification texts
//! - `shapes.rs`: per-shape records read from the first alert event
//! - `classifier.rs`: alert -> optional triage request

pub mod classifier;
pub mod rules;
pub mod shapes;
pub mod types;


pub use classifier::classify;
pub use types::{AlertLabel, AlertTriageRequest};
