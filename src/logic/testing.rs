//! In-memory directory and invocation doubles shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::collections::VecDeque;
use std::net::TcpListener;

use chrono::{TimeZone, Utc};

use crate::logic::directory::{AccessToken, AuthParams, DirectoryClient, UserProfile};
use crate::logic::dispatch::{InvocationTarget, InvokeError};

pub fn profile(primary_email: &str) -> UserProfile {
    UserProfile {
        created: Utc.with_ymd_and_hms(2019, 4, 2, 17, 1, 21).unwrap(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        alternative_name: "N/A".to_string(),
        primary_email: primary_email.to_string(),
        ldap_primary_email: primary_email.replace("example.com", "corp.example.com"),
    }
}

/// Directory with a fixed user table and a scripted token sequence
#[derive(Default)]
pub struct FakeDirectory {
    users: HashMap<String, UserProfile>,
    tokens: RefCell<VecDeque<Option<String>>>,
    pub auth_calls: Cell<usize>,
    pub lookups: RefCell<Vec<(String, String)>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: &str, primary_email: &str) -> Self {
        self.users.insert(username.to_string(), profile(primary_email));
        self
    }

    /// Queue the result of the next `authenticate` call
    pub fn with_token(self, token: Option<&str>) -> Self {
        self.tokens.borrow_mut().push_back(token.map(str::to_string));
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.borrow().len()
    }
}

impl DirectoryClient for FakeDirectory {
    fn authenticate(&self, _params: &AuthParams) -> Option<AccessToken> {
        self.auth_calls.set(self.auth_calls.get() + 1);
        self.tokens
            .borrow_mut()
            .pop_front()
            .flatten()
            .map(AccessToken::new)
    }

    fn user_by_username(&self, token: &AccessToken, username: &str) -> Option<UserProfile> {
        self.lookups
            .borrow_mut()
            .push((token.as_str().to_string(), username.to_string()));
        self.users.get(username).cloned()
    }
}

/// Invocation target answering every call with the same outcome
pub struct FakeTarget {
    outcome: Result<u16, String>,
    pub calls: RefCell<Vec<(String, Vec<u8>)>>,
}

impl FakeTarget {
    pub fn status(status: u16) -> Self {
        Self {
            outcome: Ok(status),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            outcome: Err("connection refused".to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl InvocationTarget for FakeTarget {
    fn invoke(&self, function: &str, payload: &[u8]) -> Result<u16, InvokeError> {
        self.calls
            .borrow_mut()
            .push((function.to_string(), payload.to_vec()));
        self.outcome.clone().map_err(InvokeError::Transport)
    }
}

/// URL of a local port nothing listens on
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
