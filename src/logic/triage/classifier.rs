//! Alert Classifier
//!
//! Input: a raw alert document and a Person API token.
//! Output: at most one `AlertTriageRequest`.

use serde_json::Value;

use super::rules::{self, match_label};
use super::shapes::{first_event, DuoRecord, SessionRecord, SshAccessRecord};
use super::types::{AlertLabel, AlertTriageRequest};
use crate::logic::directory::{AccessToken, DirectoryClient};

// ============================================================================
// MAIN CLASSIFICATION FUNCTION
// ============================================================================

/// Classify `alert` and build the triage request for its shape.
///
/// `None` covers every miss: unknown shape, missing `_id`, missing or empty
/// required fields, failed directory lookup.
pub fn classify<D: DirectoryClient + ?Sized>(
    alert: &Value,
    token: &AccessToken,
    directory: &D,
) -> Option<AlertTriageRequest> {
    let null_source = Value::Null;
    let source = alert.get("_source").unwrap_or(&null_source);

    let label = match_label(source)?;

    let identifier = match alert.get("_id").and_then(Value::as_str) {
        Some(id) => id,
        None => {
            log::debug!("{} alert without an _id", label);
            return None;
        }
    };

    let request = match label {
        AlertLabel::SensitiveHostSession => {
            make_sensitive_host_session(identifier, source, token, directory)
        }
        AlertLabel::DuoBypassCodesGenerated => make_duo_codes_generated(identifier, source),
        AlertLabel::DuoBypassCodesUsed => make_duo_codes_used(identifier, source),
        AlertLabel::SshAccessSignReleng => {
            make_ssh_access_releng(identifier, source, token, directory)
        }
    };

    if request.is_none() {
        log::debug!("Alert {} looked like {} but is incomplete", identifier, label);
    }

    request
}

// ============================================================================
// PER-SHAPE BUILDERS
// ============================================================================

fn make_sensitive_host_session<D: DirectoryClient + ?Sized>(
    identifier: &str,
    source: &Value,
    token: &AccessToken,
    directory: &D,
) -> Option<AlertTriageRequest> {
    let record = SessionRecord::from_event(first_event(source));

    let user = non_empty(record.username.as_deref())?;
    let profile = directory.user_by_username(token, user)?;
    let host = record.hostname.as_deref().unwrap_or("unknown");

    Some(AlertTriageRequest::new(
        identifier,
        AlertLabel::SensitiveHostSession,
        rules::sensitive_host_summary(host),
        profile.primary_email,
    ))
}

fn make_duo_codes_generated(identifier: &str, source: &Value) -> Option<AlertTriageRequest> {
    let record = DuoRecord::from_event(first_event(source));
    let email = non_empty(record.object.as_deref())?;

    Some(AlertTriageRequest::new(
        identifier,
        AlertLabel::DuoBypassCodesGenerated,
        rules::DUO_CODES_GENERATED_SUMMARY,
        email,
    ))
}

fn make_duo_codes_used(identifier: &str, source: &Value) -> Option<AlertTriageRequest> {
    let record = DuoRecord::from_event(first_event(source));
    let email = non_empty(record.object.as_deref())?;

    Some(AlertTriageRequest::new(
        identifier,
        AlertLabel::DuoBypassCodesUsed,
        rules::DUO_CODES_USED_SUMMARY,
        email,
    ))
}

fn make_ssh_access_releng<D: DirectoryClient + ?Sized>(
    identifier: &str,
    source: &Value,
    token: &AccessToken,
    directory: &D,
) -> Option<AlertTriageRequest> {
    let record = SshAccessRecord::from_event(first_event(source));

    let summary = source.get("summary").and_then(Value::as_str).unwrap_or("");
    let user = non_empty(last_token(summary))?;
    let host = non_empty(record.hostname.as_deref())?;

    let profile = directory.user_by_username(token, user)?;

    Some(AlertTriageRequest::new(
        identifier,
        AlertLabel::SshAccessSignReleng,
        rules::ssh_access_summary(host),
        profile.primary_email,
    ))
}

// ============================================================================
// UTILITIES
// ============================================================================

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Text after the last whitespace character; empty on trailing whitespace
fn last_token(text: &str) -> Option<&str> {
    text.rsplit(char::is_whitespace).next()
}
