//! Triage Types

use serde::{Deserialize, Serialize};

// ============================================================================
// ALERT LABEL
// ============================================================================

/// Alerts the relay knows how to route to a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLabel {
    SensitiveHostSession,
    DuoBypassCodesUsed,
    DuoBypassCodesGenerated,
    SshAccessSignReleng,
}

impl AlertLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLabel::SensitiveHostSession => "sensitive_host_session",
            AlertLabel::DuoBypassCodesUsed => "duo_bypass_codes_used",
            AlertLabel::DuoBypassCodesGenerated => "duo_bypass_codes_generated",
            AlertLabel::SshAccessSignReleng => "ssh_access_sign_releng",
        }
    }
}

impl std::fmt::Display for AlertLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TRIAGE REQUEST
// ============================================================================

/// Message bound for the Lambda that notifies the user over Slack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertTriageRequest {
    /// Alert `_id` in the event store
    pub identifier: String,
    pub alert: AlertLabel,
    pub summary: String,
    /// Email of the user to contact
    pub user: String,
}

impl AlertTriageRequest {
    pub fn new(
        identifier: impl Into<String>,
        alert: AlertLabel,
        summary: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            alert,
            summary: summary.into(),
            user: user.into(),
        }
    }

    /// JSON bytes sent as the Lambda payload
    pub fn to_payload(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
