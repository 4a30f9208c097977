//! Person API Client
//!
//! Blocking HTTP client for the OAuth token exchange and the
//! primary-username lookup. Every failure collapses to `None`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::types::{AccessToken, AuthParams, UserProfile};
use super::DirectoryClient;
use crate::constants::{MISSING_FIELD, PRIMARY_USERNAME_ROUTE};
use crate::logic::http::{build_agent, read_json_body};

// ============================================================================
// CLIENT
// ============================================================================

/// Person API client bound to an OAuth endpoint and an API base URL
pub struct PersonApiClient {
    agent: ureq::Agent,
    oauth_url: String,
    base_url: String,
}

impl PersonApiClient {
    pub fn new(oauth_url: &str, base_url: &str) -> Self {
        Self {
            agent: build_agent(),
            oauth_url: oauth_url.to_string(),
            base_url: base_url.to_string(),
        }
    }
}

impl DirectoryClient for PersonApiClient {
    fn authenticate(&self, params: &AuthParams) -> Option<AccessToken> {
        authenticate(&self.agent, &self.oauth_url, params)
    }

    fn user_by_username(&self, token: &AccessToken, username: &str) -> Option<UserProfile> {
        primary_username(&self.agent, &self.base_url, token, username)
    }
}

// ============================================================================
// REQUESTS
// ============================================================================

/// POST the client credentials and pull `access_token` out of the response
pub fn authenticate(agent: &ureq::Agent, url: &str, params: &AuthParams) -> Option<AccessToken> {
    let result = agent
        .post(url)
        .set("Content-Type", "application/json")
        .send_json(params.to_payload());

    let body = read_json_body(result)?;

    match body.get("access_token").and_then(Value::as_str) {
        Some(token) => Some(AccessToken::new(token)),
        None => {
            log::warn!("Token response from {} has no access_token", url);
            None
        }
    }
}

/// GET `<base>/v2/user/primary_username/<uname>` and parse the profile
pub fn primary_username(
    agent: &ureq::Agent,
    base: &str,
    token: &AccessToken,
    uname: &str,
) -> Option<UserProfile> {
    let url = format!(
        "{}{}/{}",
        base.trim_end_matches('/'),
        PRIMARY_USERNAME_ROUTE,
        urlencoding::encode(uname)
    );

    let result = agent
        .get(&url)
        .set("Authorization", &token.bearer())
        .call();

    let data = read_json_body(result)?;
    let profile = parse_profile(&data);

    if profile.is_none() {
        log::warn!("Person API returned no usable profile for {}", uname);
    }

    profile
}

// ============================================================================
// PARSE RESPONSE
// ============================================================================

/// Build a profile from a Person API v2 document.
///
/// Hard fields: `created.value` and
/// `identities.mozilla_ldap_primary_email.value`.
pub fn parse_profile(data: &Value) -> Option<UserProfile> {
    let created = data
        .pointer("/created/value")
        .and_then(Value::as_str)
        .and_then(parse_created)?;

    let ldap_primary_email = data
        .pointer("/identities/mozilla_ldap_primary_email/value")
        .and_then(Value::as_str)?
        .to_string();

    Some(UserProfile {
        created,
        first_name: soft_value(data, "first_name"),
        last_name: soft_value(data, "last_name"),
        alternative_name: soft_value(data, "alternative_name"),
        primary_email: soft_value(data, "primary_email"),
        ldap_primary_email,
    })
}

fn soft_value(data: &Value, field: &str) -> String {
    data.get(field)
        .and_then(|f| f.get("value"))
        .and_then(Value::as_str)
        .unwrap_or(MISSING_FIELD)
        .to_string()
}

/// `2019-04-02T17:01:21.123Z`; the fractional seconds are mandatory
fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    let (_, fraction) = raw.strip_suffix('Z')?.rsplit_once('.')?;
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.fZ").ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

// ============================================================================
// TESTS
// ============================================================================
