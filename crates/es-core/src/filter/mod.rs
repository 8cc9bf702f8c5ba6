//! Event filter pipeline.
//!
//! Four suppression stages run in a fixed order; the first negative
//! verdict stops the pipeline. Suppression is a normal outcome, not an
//! error: the runner reports the reason and the process exits 0.
//!
//! Stage order:
//! 1. disabled — the check opted out of alerting entirely
//! 2. repeated — occurrence thresholds and refresh gating
//! 3. silenced — operator silence stashes in the monitoring API
//! 4. dependencies — other checks whose open events mask this one
//!
//! Stages 1 and 2 are purely local; stages 3 and 4 query the monitoring
//! API and treat transient query failures as "cannot confirm, do not
//! suppress".

pub mod remote;
pub mod repeated;

use es_common::Result;
use es_config::SuppressionDefaults;

use crate::api::ApiClient;
use crate::event::Event;

/// Verdict of a filter stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Proceed to the next stage (or to the plugin action).
    Continue,

    /// Drop the event. Terminal for the whole pipeline.
    Suppressed { reason: String },
}

impl FilterOutcome {
    pub(crate) fn suppressed(reason: impl Into<String>) -> Self {
        FilterOutcome::Suppressed {
            reason: reason.into(),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, FilterOutcome::Suppressed { .. })
    }
}

/// One pipeline run over one event. The event, defaults, and API client
/// are borrowed for the duration of the run and never mutated.
pub struct FilterPipeline<'a> {
    event: &'a Event,
    defaults: &'a SuppressionDefaults,
    api: &'a ApiClient,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(event: &'a Event, defaults: &'a SuppressionDefaults, api: &'a ApiClient) -> Self {
        Self {
            event,
            defaults,
            api,
        }
    }

    /// Run all stages in order, stopping at the first suppression.
    /// Returns `Err` only for fatal conditions (missing API settings
    /// when a query is attempted); transient query failures are handled
    /// inside the stages.
    pub fn run(&self) -> Result<FilterOutcome> {
        if let out @ FilterOutcome::Suppressed { .. } = self.check_disabled() {
            return Ok(out);
        }
        if let out @ FilterOutcome::Suppressed { .. } =
            repeated::check_repeated(self.event, self.defaults)
        {
            return Ok(out);
        }
        if let out @ FilterOutcome::Suppressed { .. } =
            remote::check_silenced(self.event, self.api)?
        {
            return Ok(out);
        }
        if let out @ FilterOutcome::Suppressed { .. } =
            remote::check_dependencies(self.event, self.api)?
        {
            return Ok(out);
        }
        Ok(FilterOutcome::Continue)
    }

    fn check_disabled(&self) -> FilterOutcome {
        if self.event.check.alert == Some(false) {
            FilterOutcome::suppressed("alert disabled")
        } else {
            FilterOutcome::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: serde_json::Value) -> Event {
        serde_json::from_value(value).unwrap()
    }

    fn run(event: &Event) -> Result<FilterOutcome> {
        // No API settings: stages 3 and 4 would fail fatally if reached.
        let api = ApiClient::new(None);
        FilterPipeline::new(event, &SuppressionDefaults::default(), &api).run()
    }

    #[test]
    fn test_disabled_alert_suppresses_before_any_query() {
        let event = event(json!({
            "client": {"name": "web01"},
            "check": {"name": "disk", "alert": false},
            "occurrences": 5
        }));
        let out = run(&event).unwrap();
        assert_eq!(out, FilterOutcome::suppressed("alert disabled"));
    }

    #[test]
    fn test_empty_event_suppresses_deterministically() {
        // {} has zero occurrences against the default threshold of one,
        // so the pipeline stops before any API stage.
        let event = event(json!({}));
        let out = run(&event).unwrap();
        assert_eq!(out, FilterOutcome::suppressed("not enough occurrences"));
    }

    #[test]
    fn test_missing_api_settings_is_fatal_only_when_queried() {
        let event = event(json!({
            "client": {"name": "web01"},
            "check": {"name": "disk"},
            "occurrences": 1
        }));
        // This event passes the local stages, so the silence stage
        // attempts a query and the missing settings surface.
        let err = run(&event).unwrap_err();
        assert!(err.to_string().contains("api settings not found"));
    }

    #[test]
    fn test_alert_true_does_not_suppress() {
        let event = event(json!({"check": {"alert": true}}));
        let pipeline_out = run(&event).unwrap();
        assert_eq!(
            pipeline_out,
            FilterOutcome::suppressed("not enough occurrences")
        );
    }
}
