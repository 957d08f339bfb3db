//! Transport and clock collaborator seams.
//!
//! The core never issues HTTP calls itself: each fetch operation is handed a
//! [`Transport`] that returns already-retrieved response bodies, and a
//! [`Clock`] supplying "now" where a provider omits an explicit timestamp.
//! Retry, backoff and session management live behind the `Transport`
//! implementation, outside this workspace.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// A raw upstream response: status code plus body text.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl Response {
    /// Build a successful (200) response, mainly for tests and fixtures.
    pub fn ok(body: impl Into<String>) -> Self {
        Response {
            status: 200,
            body: body.into(),
        }
    }

    /// Return the body if the status is a success, otherwise a fatal
    /// transport error naming the endpoint.
    pub fn text(self, url: &str) -> Result<String> {
        if (200..300).contains(&self.status) {
            Ok(self.body)
        } else {
            Err(Error::transport(url, self.status))
        }
    }
}

/// Blocking request collaborator.
pub trait Transport {
    /// Issue a GET request with query parameters.
    fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Response>;

    /// Issue a POST request with a raw body (used for SOAP envelopes).
    fn post(&self, url: &str, body: &str) -> Result<Response>;
}

/// Wall-clock collaborator, injected so fetches are testable and idempotent
/// modulo "now".
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
