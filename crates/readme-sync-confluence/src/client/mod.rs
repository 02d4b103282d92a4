//! Confluence Cloud REST API client.
//!
//! Provides a sync HTTP client for the v2 pages endpoint with HTTP Basic
//! authentication (account email + API token).

mod command;
mod pages;

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;
use ureq::Agent;

use crate::error::ConfluenceError;

pub use command::ApiCommand;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create a client for the site at `base_url`.
    ///
    /// # Arguments
    /// * `base_url` - Site root, e.g. `https://example.atlassian.net`
    /// * `username` - Account email or username
    /// * `token` - API token
    pub fn new(base_url: &str, username: &str, token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: basic_auth(username, token),
        }
    }

    /// Get the site base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a command and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::HttpResponse`] with the server's body
    /// verbatim for any status >= 400.
    pub fn send(&self, command: &ApiCommand<'_>) -> Result<String, ConfluenceError> {
        let url = format!("{}{}", self.base_url, command.path());
        debug!(method = command.method(), %url, "sending request");

        let response = match command.payload() {
            None => self
                .agent
                .get(&url)
                .header("Authorization", &self.auth_header)
                .header("Accept", "application/json")
                .call()?,
            Some(payload) => {
                let payload_bytes = serde_json::to_vec(&payload)?;
                self.agent
                    .put(&url)
                    .header("Authorization", &self.auth_header)
                    .header("Accept", "application/json")
                    .header("Content-Type", "application/json")
                    .send(&payload_bytes[..])?
            }
        };

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_to_string()?)
    }
}

/// `Authorization` header value for HTTP Basic auth.
fn basic_auth(username: &str, token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{token}")))
}
