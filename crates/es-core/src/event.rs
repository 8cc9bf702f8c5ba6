//! Typed view over the incoming JSON event.
//!
//! Events arrive as loosely-structured JSON from the pipeline source.
//! Every field the framework reads is optional: an empty document `{}`
//! deserializes into an all-default event, and accessors fall back to the
//! `"unknown"` sentinel rather than raising. Fields the framework does not
//! model are preserved through a flattened map so mutators round-trip
//! them untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel for absent client/check names.
pub const UNKNOWN: &str = "unknown";

/// One monitoring event: a single check result plus its recurrence
/// history. Immutable for the duration of a pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub client: Client,

    #[serde(default)]
    pub check: Check,

    /// Consecutive times this condition has fired, as reported by the
    /// source system.
    #[serde(default)]
    pub occurrences: u64,

    /// Why this event was emitted now, e.g. `"create"` or `"resolve"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The reporting host/entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The check execution that produced the event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Check {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `Some(false)` disables all handling of this event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<bool>,

    /// Per-check overrides of the suppression defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<u64>,

    /// Check status codes, most recent last. Sources emit these as either
    /// numbers or numeric strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryStatus>,

    /// `"check"` or `"client/check"` entries naming other checks whose
    /// currently-firing event suppresses this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,

    /// Free-text diagnostic output from the check execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `check.history`, tolerant of both JSON numbers and
/// numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryStatus {
    Number(i64),
    Text(String),
}

impl HistoryStatus {
    /// The status as a non-negative integer, or `None` if the entry does
    /// not parse as one.
    pub fn as_status(&self) -> Option<u64> {
        match self {
            HistoryStatus::Number(n) => u64::try_from(*n).ok(),
            HistoryStatus::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl Event {
    /// Client name, or the `"unknown"` sentinel.
    pub fn client_name(&self) -> &str {
        self.client.name.as_deref().unwrap_or(UNKNOWN)
    }

    /// Check name, or the `"unknown"` sentinel.
    pub fn check_name(&self) -> &str {
        self.check.name.as_deref().unwrap_or(UNKNOWN)
    }

    /// The check history as plain integers, or `None` when the history is
    /// absent or contains an entry that does not parse. A partially
    /// unparseable history is unusable for the masking correction, so it
    /// is treated as absent rather than guessed at.
    pub fn history_statuses(&self) -> Option<Vec<u64>> {
        if self.check.history.is_empty() {
            return None;
        }
        self.check
            .history
            .iter()
            .map(HistoryStatus::as_status)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_is_all_defaults() {
        let event: Event = serde_json::from_value(json!({})).unwrap();
        assert_eq!(event.client_name(), UNKNOWN);
        assert_eq!(event.check_name(), UNKNOWN);
        assert_eq!(event.occurrences, 0);
        assert_eq!(event.action, None);
        assert!(event.history_statuses().is_none());
    }

    #[test]
    fn test_named_event() {
        let event: Event = serde_json::from_value(json!({
            "client": {"name": "web01"},
            "check": {"name": "disk", "alert": false},
            "occurrences": 3,
            "action": "create"
        }))
        .unwrap();
        assert_eq!(event.client_name(), "web01");
        assert_eq!(event.check_name(), "disk");
        assert_eq!(event.check.alert, Some(false));
        assert_eq!(event.occurrences, 3);
    }

    #[test]
    fn test_history_mixed_numbers_and_strings() {
        let event: Event = serde_json::from_value(json!({
            "check": {"history": ["0", 1, "2", 0]}
        }))
        .unwrap();
        assert_eq!(event.history_statuses(), Some(vec![0, 1, 2, 0]));
    }

    #[test]
    fn test_history_with_garbage_entry_is_unusable() {
        let event: Event = serde_json::from_value(json!({
            "check": {"history": ["1", "flapping", "0"]}
        }))
        .unwrap();
        assert_eq!(event.history_statuses(), None);
    }

    #[test]
    fn test_unmodeled_fields_round_trip() {
        let input = json!({
            "client": {"name": "web01", "address": "10.0.0.1"},
            "check": {"name": "disk", "status": 2},
            "occurrences": 1,
            "timestamp": 1700000000
        });
        let event: Event = serde_json::from_value(input.clone()).unwrap();
        let output = serde_json::to_value(&event).unwrap();
        assert_eq!(output["client"]["address"], "10.0.0.1");
        assert_eq!(output["check"]["status"], 2);
        assert_eq!(output["timestamp"], 1700000000);
    }
}
