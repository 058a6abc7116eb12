//! Conflict detection.
//!
//! Two events conflict when their half-open intervals overlap
//! (`a.start < b.end && b.start < a.end`). A pair sharing a professional or a
//! room is a double booking (error); any other overlap is a warning.
//!
//! The algorithm sits behind [`ConflictDetector`]. [`PairwiseDetector`] is the
//! reference implementation; [`SweepLineDetector`] produces the same output
//! for larger inputs.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::conflict::Conflict;
use crate::models::event::{Event, EventId};
use crate::models::settings::SchedulingPolicy;

pub trait ConflictDetector {
    /// Every overlapping pair in `events`, each reported once, ordered by
    /// the input position of the first then the second event.
    fn detect(&self, events: &[&Event]) -> Vec<Conflict>;
}

/// Compares every pair. Fine for a day's worth of appointments.
#[derive(Debug, Default, Clone, Copy)]
pub struct PairwiseDetector;

impl ConflictDetector for PairwiseDetector {
    fn detect(&self, events: &[&Event]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                if a.overlaps(b) {
                    conflicts.push(classify(a, b));
                }
            }
        }
        conflicts
    }
}

/// Sorts by start time and keeps a set of still-open events.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepLineDetector;

impl ConflictDetector for SweepLineDetector {
    fn detect(&self, events: &[&Event]) -> Vec<Conflict> {
        let mut order: Vec<usize> = (0..events.len())
            .filter(|&i| !events[i].is_degenerate())
            .collect();
        order.sort_by_key(|&i| (events[i].start, i));

        let mut active: Vec<usize> = Vec::new();
        let mut pairs: Vec<(usize, usize)> = Vec::new();

        for &current in &order {
            let start = events[current].start;
            active.retain(|&open| events[open].end > start);
            for &open in &active {
                pairs.push((open.min(current), open.max(current)));
            }
            active.push(current);
        }

        pairs.sort_unstable();
        pairs
            .into_iter()
            .map(|(i, j)| classify(events[i], events[j]))
            .collect()
    }
}

fn classify(a: &Event, b: &Event) -> Conflict {
    let overlap = (a.end.min(b.end) - a.start.max(b.start)).num_minutes();
    Conflict::classify(
        a.id.clone(),
        b.id.clone(),
        overlap,
        a.resources.shared_with(&b.resources),
    )
}

/// Events the policy lets participate in conflict detection
pub fn participating<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    policy: &SchedulingPolicy,
) -> Vec<&'a Event> {
    events.into_iter().filter(|event| policy.counts(event)).collect()
}

/// All conflicts in a (single-day) event list, using the pairwise detector
pub fn conflicts_for<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    policy: &SchedulingPolicy,
) -> Vec<Conflict> {
    conflicts_with(&PairwiseDetector, events, policy)
}

/// All conflicts in an event list using the given detector
pub fn conflicts_with<'a>(
    detector: &dyn ConflictDetector,
    events: impl IntoIterator<Item = &'a Event>,
    policy: &SchedulingPolicy,
) -> Vec<Conflict> {
    let events: Vec<&Event> = events.into_iter().collect();
    let candidates = participating(events.iter().copied(), policy);
    let conflicts = detector.detect(&candidates);
    log::debug!(
        "Detected {} conflicts among {} events ({} skipped by policy)",
        conflicts.len(),
        candidates.len(),
        events.len() - candidates.len()
    );
    conflicts
}

/// Conflicts for a multi-day (week) snapshot, detected per start day
pub fn conflicts_by_day<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    policy: &SchedulingPolicy,
) -> BTreeMap<NaiveDate, Vec<Conflict>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for event in participating(events, policy) {
        days.entry(event.day()).or_default().push(event);
    }

    days.into_iter()
        .map(|(day, day_events)| (day, PairwiseDetector.detect(&day_events)))
        .filter(|(_, conflicts)| !conflicts.is_empty())
        .collect()
}

/// Conflicts that involve the given event
pub fn conflicts_involving<'a>(conflicts: &'a [Conflict], id: &EventId) -> Vec<&'a Conflict> {
    conflicts.iter().filter(|conflict| conflict.involves(id)).collect()
}
