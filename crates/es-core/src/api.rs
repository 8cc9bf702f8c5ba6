//! Synchronous monitoring API client.
//!
//! One GET per call, bounded by a caller-supplied timeout, with optional
//! Basic auth. Existence of a resource is signaled solely by HTTP 200;
//! every other status — including redirects, which are never followed —
//! means "does not exist". Transport failures are classified so filter
//! stages can log them and move on without suppressing.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;
use tracing::debug;

use es_config::ApiSettings;

/// Errors from a monitoring API query.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No API settings were resolved. Fatal: the plugin cannot fulfill
    /// its contract without them.
    #[error("api settings not found")]
    SettingsMissing,

    /// The request did not complete within the caller's timeout.
    #[error("timed out querying the monitoring api: {0}")]
    Timeout(String),

    /// Connection refused, DNS failure, or another transport fault.
    #[error("connection failed querying the monitoring api: {0}")]
    Connection(String),
}

impl ApiError {
    /// Transient failures are logged by the caller and treated as
    /// "cannot confirm"; only missing settings are fatal.
    pub fn is_transient(&self) -> bool {
        !matches!(self, ApiError::SettingsMissing)
    }
}

/// Client for the monitoring API. Holds resolved settings (possibly
/// none) and a connection agent with redirects disabled.
pub struct ApiClient {
    settings: Option<ApiSettings>,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(settings: Option<ApiSettings>) -> Self {
        let agent = ureq::AgentBuilder::new().redirects(0).build();
        Self { settings, agent }
    }

    /// Whether `GET {path}` returns exactly HTTP 200.
    pub fn exists(&self, path: &str, timeout: Duration) -> Result<bool, ApiError> {
        let settings = self.settings.as_ref().ok_or(ApiError::SettingsMissing)?;
        let url = request_url(settings, path);
        debug!(%url, "querying monitoring api");

        let mut request = self.agent.get(&url).timeout(timeout);
        if let (Some(user), Some(password)) = (&settings.user, &settings.password) {
            let credentials = BASE64.encode(format!("{user}:{password}"));
            request = request.set("Authorization", &format!("Basic {credentials}"));
        }

        match request.call() {
            Ok(response) => Ok(response.status() == 200),
            Err(ureq::Error::Status(_, _)) => Ok(false),
            Err(err @ ureq::Error::Transport(_)) => {
                if is_timeout(&err) {
                    Err(ApiError::Timeout(err.to_string()))
                } else {
                    Err(ApiError::Connection(err.to_string()))
                }
            }
        }
    }

    /// Whether a silence stash exists at `/stash{path}`.
    pub fn stash_exists(&self, path: &str, timeout: Duration) -> Result<bool, ApiError> {
        self.exists(&format!("/stash{path}"), timeout)
    }

    /// Whether an event is currently open for `client`/`check`.
    pub fn event_exists(
        &self,
        client: &str,
        check: &str,
        timeout: Duration,
    ) -> Result<bool, ApiError> {
        self.exists(&format!("/event/{client}/{check}"), timeout)
    }
}

/// Build the request URL. The scheme defaults to `http` unless the
/// configured host already carries one.
fn request_url(settings: &ApiSettings, path: &str) -> String {
    if settings.host.starts_with("http") {
        format!("{}:{}{}", settings.host, settings.port, path)
    } else {
        format!("http://{}:{}{}", settings.host, settings.port, path)
    }
}

/// Walk the source chain looking for an I/O timeout.
fn is_timeout(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut cause = Some(err);
    while let Some(e) = cause {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            return matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            );
        }
        cause = e.source();
    }
    err.to_string().contains("timed out")
}
