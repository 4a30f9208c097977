//! Triage Session
//!
//! Owns the Person API token and runs each inbound alert through
//! classification and dispatch. One session per process; nothing here is
//! shared across threads.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::Config;
use crate::constants::{PRIORITY, REGISTRATION};
use crate::error::{TriageError, TriageResult};
use crate::logic::directory::{AccessToken, DirectoryClient, PersonApiClient};
use crate::logic::dispatch::{dispatch, DispatchResult, InvocationTarget, LambdaInvoker};
use crate::logic::triage::classify;

// ============================================================================
// SESSION
// ============================================================================

pub struct TriageSession<D, T> {
    config: Config,
    directory: D,
    target: T,
    token: AccessToken,
    last_authenticated: DateTime<Utc>,
}

impl TriageSession<PersonApiClient, LambdaInvoker> {
    /// Session wired to the real Person API and Lambda
    pub fn from_config(config: Config) -> TriageResult<Self> {
        let directory = PersonApiClient::new(&config.oauth_url, &config.person_api_base);
        let target = LambdaInvoker::from_config(&config);
        Self::new(config, directory, target)
    }
}

impl<D: DirectoryClient, T: InvocationTarget> TriageSession<D, T> {
    /// Authenticate once up front; no token means no session
    pub fn new(config: Config, directory: D, target: T) -> TriageResult<Self> {
        let token = obtain_token(&config, &directory)?;
        log::info!("Authenticated to the Person API");

        Ok(Self {
            config,
            directory,
            target,
            token,
            last_authenticated: Utc::now(),
        })
    }

    /// Alerts this action wants to see
    pub fn registration(&self) -> &'static str {
        REGISTRATION
    }

    pub fn priority(&self) -> u32 {
        PRIORITY
    }

    pub fn last_authenticated(&self) -> DateTime<Utc> {
        self.last_authenticated
    }

    /// Process one alert and hand it back unchanged
    pub fn on_message(&mut self, alert: Value) -> TriageResult<Value> {
        self.on_message_at(alert, Utc::now())
    }

    pub(crate) fn on_message_at(&mut self, alert: Value, now: DateTime<Utc>) -> TriageResult<Value> {
        let request = match classify(&alert, &self.token, &self.directory) {
            Some(request) => request,
            None => return Ok(alert),
        };

        if self.token_expired(now) {
            self.reauthenticate(now)?;
        }

        let result = dispatch(&request, &self.config.aws_lambda_function, &self.target);
        match result {
            DispatchResult::Success => log::info!(
                "Dispatched {} for alert {}",
                request.alert,
                request.identifier
            ),
            other => log::warn!(
                "Dispatch of {} for alert {} ended as {}",
                request.alert,
                request.identifier,
                other.as_str()
            ),
        }

        Ok(alert)
    }

    /// Relay a JSON-lines alert stream from `input` to `output`.
    ///
    /// Every input line produces exactly one output line. Lines that are not
    /// JSON are passed through untouched so downstream stages stay aligned.
    pub fn relay<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> TriageResult<usize> {
        let mut handled = 0;

        for line in input.lines() {
            let line = line?;

            match serde_json::from_str::<Value>(&line) {
                Ok(alert) => {
                    let alert = self.on_message(alert)?;
                    serde_json::to_writer(&mut output, &alert).map_err(std::io::Error::from)?;
                    handled += 1;
                }
                Err(e) => {
                    if !line.trim().is_empty() {
                        log::warn!("Passing through malformed alert: {}", e);
                    }
                    output.write_all(line.as_bytes())?;
                }
            }

            output.write_all(b"\n")?;
            output.flush()?;
        }

        Ok(handled)
    }

    /// True once the validity window has fully elapsed
    pub fn token_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.last_authenticated > self.config.token_validity()
    }

    /// Replace the token; failure is fatal for the caller
    pub fn reauthenticate(&mut self, now: DateTime<Utc>) -> TriageResult<()> {
        self.token = obtain_token(&self.config, &self.directory)?;
        self.last_authenticated = now;
        log::info!("Refreshed Person API token");
        Ok(())
    }
}

fn obtain_token<D: DirectoryClient>(config: &Config, directory: &D) -> TriageResult<AccessToken> {
    directory.authenticate(&config.auth_params()).ok_or_else(|| {
        log::error!("Person API authentication failed");
        TriageError::AuthFailure
    })
}

// ============================================================================
// TESTS
// ============================================================================
