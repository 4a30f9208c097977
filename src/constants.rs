//! Central Configuration Constants
//!
//! Single source of truth for the Person API endpoints and token policy.

/// Config file read when `TRIAGE_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "triage_bot.json";

/// OAuth token endpoint for the Person API
pub const DEFAULT_OAUTH_URL: &str = "https://auth.mozilla.auth0.com/oauth/token";

/// Person API base URL
pub const DEFAULT_PERSON_API_BASE: &str = "https://person.api.sso.mozilla.com";

/// Lookup route, appended to the Person API base
pub const PRIMARY_USERNAME_ROUTE: &str = "/v2/user/primary_username";

/// Hours an access token is trusted before a refresh is attempted
pub const TOKEN_VALIDITY_WINDOW_HOURS: i64 = 18;

/// Longest validity window a config may ask for (one year)
pub const MAX_TOKEN_VALIDITY_HOURS: i64 = 24 * 365;

/// Placeholder for soft profile fields the directory did not return
pub const MISSING_FIELD: &str = "N/A";

/// Timeout applied to every outbound HTTP call (seconds)
pub const HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Alerts this action registers for (all of them)
pub const REGISTRATION: &str = "*";

/// Priority reported to the hosting pipeline
pub const PRIORITY: u32 = 1;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Path of the JSON config file
pub fn get_config_path() -> String {
    std::env::var("TRIAGE_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
}

/// OAuth URL override, if any
pub fn get_oauth_url_override() -> Option<String> {
    std::env::var("PERSON_API_OAUTH_URL").ok().filter(|v| !v.is_empty())
}

/// Person API base override, if any
pub fn get_person_api_base_override() -> Option<String> {
    std::env::var("PERSON_API_BASE").ok().filter(|v| !v.is_empty())
}
