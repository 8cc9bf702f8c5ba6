//! Repeated-occurrence suppression.
//!
//! Thresholds resolve event-provided per-check value first, then the
//! configured defaults, then the hardcoded defaults (1/30/1800). An
//! incident below the occurrence threshold is suppressed outright; one
//! above it is re-handled only every `refresh / interval` occurrences
//! while the source keeps reporting `"create"`.

use es_config::SuppressionDefaults;

use super::FilterOutcome;
use crate::event::Event;

pub(crate) fn check_repeated(event: &Event, defaults: &SuppressionDefaults) -> FilterOutcome {
    let threshold = event.check.occurrences.unwrap_or(defaults.occurrences);
    let interval = event.check.interval.unwrap_or(defaults.interval);
    let refresh = event.check.refresh.unwrap_or(defaults.refresh);

    let incident_occurrences = match event.history_statuses() {
        Some(history) if masks_completed_streak(&history, threshold) => threshold,
        _ => event.occurrences,
    };

    if incident_occurrences < threshold {
        return FilterOutcome::suppressed("not enough occurrences");
    }

    if incident_occurrences > threshold && event.action.as_deref() == Some("create") {
        // interval 0 would make the refresh window meaningless; treat it
        // like a zero repeat gate, which passes every occurrence.
        let repeat_every = if interval == 0 { 0 } else { refresh / interval };
        if repeat_every != 0 && (incident_occurrences - threshold) % repeat_every != 0 {
            return FilterOutcome::suppressed(format!(
                "only handling every {repeat_every} occurrences"
            ));
        }
    }

    FilterOutcome::Continue
}

/// Detect a stale run obscuring a completed streak, e.g. `1 1 1 2 0`
/// with a threshold of 3: the lone 2 hides that the streak already hit
/// its threshold, so the caller treats the incident as exactly at
/// threshold.
///
/// The correction applies iff, scanning trailing runs:
/// - the final entry is literally 0,
/// - preceded by a run of one non-zero value shorter than the threshold,
/// - preceded by a run of a different non-zero value at least
///   threshold long.
///
/// This is a band-aid for the single-masking-value case only. Sequences
/// with several distinct masking values, like `1 1 1 2 3 0`, are NOT
/// corrected; downstream suppression outcomes depend on that limitation,
/// so it must stay.
fn masks_completed_streak(history: &[u64], threshold: u64) -> bool {
    if threshold < 2 {
        return false;
    }
    let Some((&last, rest)) = history.split_last() else {
        return false;
    };
    if last != 0 {
        return false;
    }
    let Some((masking_value, masking_len, rest)) = trailing_run(rest) else {
        return false;
    };
    if masking_value == 0 || masking_len as u64 > threshold - 1 {
        return false;
    }
    let Some((streak_value, streak_len, _)) = trailing_run(rest) else {
        return false;
    };
    streak_value != 0 && streak_value != masking_value && streak_len as u64 >= threshold
}

/// Value, length, and remaining prefix of the trailing run of equal
/// values.
fn trailing_run(values: &[u64]) -> Option<(u64, usize, &[u64])> {
    let (&value, _) = values.split_last()?;
    let start = values
        .iter()
        .rposition(|&v| v != value)
        .map_or(0, |i| i + 1);
    Some((value, values.len() - start, &values[..start]))
}
