//! Classification Rules
//!
//! The fixed predicate table and the notification texts. Order in `RULES`
//! is the match priority.

use serde_json::Value;

use super::types::AlertLabel;

// ============================================================================
// PREDICATES
// ============================================================================

/// Tag + category pair (plus an optional summary marker) identifying a shape
#[derive(Debug, Clone, Copy)]
pub struct AlertRule {
    pub label: AlertLabel,
    pub tag: &'static str,
    pub category: &'static str,
    pub summary_contains: Option<&'static str>,
}

pub const RULES: [AlertRule; 4] = [
    AlertRule {
        label: AlertLabel::SensitiveHostSession,
        tag: "session",
        category: "session",
        summary_contains: None,
    },
    AlertRule {
        label: AlertLabel::DuoBypassCodesGenerated,
        tag: "duosecurity",
        category: "duo",
        summary_contains: Some("codes generated"),
    },
    AlertRule {
        label: AlertLabel::DuoBypassCodesUsed,
        tag: "duo_bypass_codes_used",
        category: "bypassused",
        summary_contains: None,
    },
    AlertRule {
        label: AlertLabel::SshAccessSignReleng,
        tag: "ssh",
        category: "access",
        summary_contains: None,
    },
];

impl AlertRule {
    /// Test the rule against an alert's `_source`
    pub fn matches(&self, source: &Value) -> bool {
        let category = source.get("category").and_then(Value::as_str);
        if category != Some(self.category) || !has_tag(source, self.tag) {
            return false;
        }

        match self.summary_contains {
            Some(marker) => source
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or("")
                .contains(marker),
            None => true,
        }
    }
}

fn has_tag(source: &Value, tag: &str) -> bool {
    source
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| tags.iter().any(|t| t.as_str() == Some(tag)))
        .unwrap_or(false)
}

/// First rule matching `source`, if any
pub fn match_label(source: &Value) -> Option<AlertLabel> {
    RULES.iter().find(|rule| rule.matches(source)).map(|rule| rule.label)
}

// ============================================================================
// NOTIFICATION TEXT
// ============================================================================

pub const DUO_CODES_GENERATED_SUMMARY: &str =
    "DUO bypass codes have been generated for your account. \
     These credentials should be secured carefully.";

pub const DUO_CODES_USED_SUMMARY: &str =
    "DUO bypass codes belonging to your account have been used to \
     authenticate.  This should only happen in the case of the loss of other \
     less secret credentials.";

pub fn sensitive_host_summary(host: &str) -> String {
    format!(
        "An SSH session to a potentially sensitive host {} was made by your user account.",
        host
    )
}

pub fn ssh_access_summary(host: &str) -> String {
    format!(
        "An SSH session was established to host {} by your user account.",
        host
    )
}
