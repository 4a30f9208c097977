//! Directory Module - Person API integration
//!
//! # Components
//! - `types.rs`: credentials, access token and user profile types
//! - `client.rs`: blocking HTTP client (token exchange + user lookup)

pub mod client;
pub mod types;

pub use client::{authenticate, primary_username, PersonApiClient};
pub use types::{AccessToken, AuthParams, UserProfile};

/// Interface the classifier and session use to reach the directory.
pub trait DirectoryClient {
    /// Exchange client credentials for an access token
    fn authenticate(&self, params: &AuthParams) -> Option<AccessToken>;

    /// Resolve a profile by primary username
    fn user_by_username(&self, token: &AccessToken, username: &str) -> Option<UserProfile>;
}

impl<D: DirectoryClient + ?Sized> DirectoryClient for &D {
    fn authenticate(&self, params: &AuthParams) -> Option<AccessToken> {
        (**self).authenticate(params)
    }

    fn user_by_username(&self, token: &AccessToken, username: &str) -> Option<UserProfile> {
        (**self).user_by_username(token, username)
    }
}
