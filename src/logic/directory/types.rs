//! Directory Types

use std::fmt;

use chrono::{DateTime, Utc};

// ============================================================================
// CREDENTIALS
// ============================================================================

/// OAuth parameters exchanged for a Person API access token
#[derive(Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
    pub scope: String,
    pub grants: String,
}

impl AuthParams {
    /// Body of the token request
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "audience": self.audience,
            "scope": self.scope,
            "grant_type": self.grants,
        })
    }
}

impl fmt::Debug for AuthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthParams")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("audience", &self.audience)
            .field("scope", &self.scope)
            .field("grants", &self.grants)
            .finish()
    }
}

/// Bearer token issued by the OAuth endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

// ============================================================================
// USER PROFILE
// ============================================================================

/// Profile fields needed to route a notification.
///
/// Only `created` and `ldap_primary_email` are guaranteed to come from the
/// directory; the rest fall back to `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub created: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub alternative_name: String,
    pub primary_email: String,
    pub ldap_primary_email: String,
}
