//! Suppression threshold defaults.

use serde::{Deserialize, Serialize};

/// Plugin-wide suppression thresholds, overridable per-check by the
/// event's own fields.
///
/// `occurrences` is the minimum consecutive firings before an event is
/// actionable; `refresh / interval` determines how often an already-open
/// incident is re-handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionDefaults {
    pub occurrences: u64,
    pub interval: u64,
    pub refresh: u64,
}

impl Default for SuppressionDefaults {
    fn default() -> Self {
        Self {
            occurrences: 1,
            interval: 30,
            refresh: 1800,
        }
    }
}

impl SuppressionDefaults {
    /// Apply a partial override from a settings document.
    pub fn merged(mut self, overrides: Option<&DefaultsOverride>) -> Self {
        if let Some(o) = overrides {
            if let Some(v) = o.occurrences {
                self.occurrences = v;
            }
            if let Some(v) = o.interval {
                self.interval = v;
            }
            if let Some(v) = o.refresh {
                self.refresh = v;
            }
        }
        self
    }
}

/// Partial form of [`SuppressionDefaults`] as found under the `eventsift`
/// key of a settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsOverride {
    #[serde(default)]
    pub occurrences: Option<u64>,

    #[serde(default)]
    pub interval: Option<u64>,

    #[serde(default)]
    pub refresh: Option<u64>,
}
