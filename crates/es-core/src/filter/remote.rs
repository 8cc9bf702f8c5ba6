//! API-backed suppression stages: silences and check dependencies.
//!
//! Both stages treat transient query failures (connection refused,
//! timeout) as "cannot confirm the suppression condition": the failure
//! is logged and evaluation moves on to the next scope or dependency.
//! Missing API settings, by contrast, are fatal — the plugin cannot
//! fulfill its contract without them.

use std::time::Duration;

use tracing::warn;

use es_common::{Error, Result};

use super::FilterOutcome;
use crate::api::{ApiClient, ApiError};
use crate::event::Event;

/// Timeout for each silence-stash query.
pub const SILENCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for each dependency-event query.
pub const DEPENDENCY_TIMEOUT: Duration = Duration::from_secs(2);

/// Check the three silence scopes in order: the whole client, this
/// client/check pair, and this check across all clients.
pub(crate) fn check_silenced(event: &Event, api: &ApiClient) -> Result<FilterOutcome> {
    let client = event.client_name();
    let check = event.check_name();
    let stashes = [
        ("client", format!("/silence/{client}")),
        ("check", format!("/silence/{client}/{check}")),
        ("check", format!("/silence/all/{check}")),
    ];

    for (scope, path) in &stashes {
        match api.stash_exists(path, SILENCE_TIMEOUT) {
            Ok(true) => {
                return Ok(FilterOutcome::suppressed(format!(
                    "{scope} alerts silenced"
                )));
            }
            Ok(false) => {}
            Err(err) if err.is_transient() => {
                warn!(path = %path, error = %err, "could not query the monitoring api for a stash");
            }
            Err(err) => return Err(fatal(err)),
        }
    }
    Ok(FilterOutcome::Continue)
}

/// Check whether any dependency of this check currently has an open
/// event. A dependency is `"check"` or `"client/check"`; the client
/// defaults to the event's own.
pub(crate) fn check_dependencies(event: &Event, api: &ApiClient) -> Result<FilterOutcome> {
    let Some(dependencies) = &event.check.dependencies else {
        return Ok(FilterOutcome::Continue);
    };

    for dependency in dependencies {
        let (client, check) = split_dependency(dependency, event.client_name());
        match api.event_exists(client, check, DEPENDENCY_TIMEOUT) {
            Ok(true) => {
                return Ok(FilterOutcome::suppressed("check dependency event exists"));
            }
            Ok(false) => {}
            Err(err) if err.is_transient() => {
                warn!(%client, %check, error = %err, "could not query the monitoring api for an event");
            }
            Err(err) => return Err(fatal(err)),
        }
    }
    Ok(FilterOutcome::Continue)
}

/// The last `/`-segment names the check; the one before it (if any)
/// names the client.
fn split_dependency<'a>(dependency: &'a str, default_client: &'a str) -> (&'a str, &'a str) {
    let mut segments = dependency.rsplit('/');
    let check = segments.next().unwrap_or(dependency);
    let client = segments.next().unwrap_or(default_client);
    (client, check)
}

fn fatal(err: ApiError) -> Error {
    Error::Config(err.to_string())
}
