// Property-based tests for the scheduling core
// Random clinic days checked against invariants of the grid, layout,
// conflict and occupancy services

mod fixtures;

use chrono::{Duration, NaiveDateTime};
use proptest::prelude::*;

use clinic_agenda::models::event::Event;
use clinic_agenda::models::settings::{GridConfig, SchedulingPolicy};
use clinic_agenda::services::conflict::{conflicts_for, conflicts_with, PairwiseDetector, SweepLineDetector};
use clinic_agenda::services::grid::TimeGrid;
use clinic_agenda::services::layout::position_for;
use clinic_agenda::services::occupancy::{free_windows, occupancy_rate};

use fixtures::clinic_day;

fn event_at(id: usize, start_minute: i64, duration: i64) -> Event {
    let start = fixtures::at(0, 0) + Duration::minutes(start_minute);
    let mut event = Event::new(format!("e{}", id), start, start + Duration::minutes(1)).unwrap();
    event.end = start + Duration::minutes(duration);
    event
}

fn day_events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((0i64..1440, 0i64..240), 0..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (start, duration))| event_at(i, start, duration))
            .collect()
    })
}

fn grid_config() -> impl Strategy<Value = GridConfig> {
    (0u32..12, 1u32..12, prop::sample::select(vec![5u32, 10, 15, 20, 30, 60]))
        .prop_map(|(start, span, slot)| GridConfig::new(start, start + span, slot).unwrap())
}

/// Total minutes covered by the union of the intervals, clipped to [lo, hi)
fn union_minutes(events: &[Event], lo: NaiveDateTime, hi: NaiveDateTime) -> i64 {
    let mut spans: Vec<(NaiveDateTime, NaiveDateTime)> = events
        .iter()
        .map(|event| (event.start.max(lo), event.end.min(hi)))
        .filter(|(start, end)| start < end)
        .collect();
    spans.sort();

    let mut total = 0;
    let mut current: Option<(NaiveDateTime, NaiveDateTime)> = None;
    for (start, end) in spans {
        current = match current {
            Some((open_start, open_end)) if start <= open_end => Some((open_start, open_end.max(end))),
            Some((open_start, open_end)) => {
                total += (open_end - open_start).num_minutes();
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((start, end)) = current {
        total += (end - start).num_minutes();
    }
    total
}

proptest! {
    /// Property: blocks never shrink below the minimum height
    #[test]
    fn prop_height_has_floor(start in 0i64..1440, duration in -60i64..600) {
        let grid = TimeGrid::default();
        let position = position_for(&event_at(0, start, duration), &grid);
        prop_assert!(position.height >= grid.config().min_event_height);
    }

    /// Property: a later start never sits higher on the grid
    #[test]
    fn prop_top_is_monotonic(a in 0i64..1440, b in 0i64..1440) {
        let grid = TimeGrid::default();
        let (early, late) = (a.min(b), a.max(b));
        let top_early = position_for(&event_at(0, early, 30), &grid).top;
        let top_late = position_for(&event_at(1, late, 30), &grid).top;
        prop_assert!(top_early <= top_late);
    }

    /// Property: two events conflict exactly when their half-open intervals overlap
    #[test]
    fn prop_conflict_iff_overlap(
        a_start in 0i64..1440, a_len in 0i64..180,
        b_start in 0i64..1440, b_len in 0i64..180,
    ) {
        let events = vec![event_at(0, a_start, a_len), event_at(1, b_start, b_len)];
        let overlap = a_len > 0
            && b_len > 0
            && a_start < b_start + b_len
            && b_start < a_start + a_len;
        let conflicts = conflicts_for(&events, &SchedulingPolicy::default());
        prop_assert_eq!(conflicts.len(), usize::from(overlap));
    }

    /// Property: the sweep-line detector reports exactly what pairwise does
    #[test]
    fn prop_sweep_line_matches_pairwise(events in day_events()) {
        let policy = SchedulingPolicy::default();
        prop_assert_eq!(
            conflicts_with(&SweepLineDetector, &events, &policy),
            conflicts_with(&PairwiseDetector, &events, &policy)
        );
    }

    /// Property: free windows are sorted, disjoint, inside the working window,
    /// and together with the busy time cover it exactly
    #[test]
    fn prop_free_windows_partition_window(events in day_events(), config in grid_config()) {
        let grid = TimeGrid::new(config).unwrap();
        let day = clinic_day();
        let windows = free_windows(&events, day, None, &grid, &SchedulingPolicy::default());
        let (lo, hi) = (grid.window_start(day), grid.window_end(day));

        for window in &windows {
            prop_assert!(window.start < window.end);
            prop_assert!(window.start >= lo && window.end <= hi);
            for event in events.iter().filter(|event| !event.is_degenerate()) {
                prop_assert!(!(window.start < event.end && event.start < window.end));
            }
        }
        for pair in windows.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }

        let free: i64 = windows.iter().map(|window| window.duration_minutes()).sum();
        prop_assert_eq!(free + union_minutes(&events, lo, hi), grid.window_minutes());
    }

    /// Property: occupancy is the rounded share of summed durations, unclipped
    #[test]
    fn prop_occupancy_formula(events in day_events()) {
        let grid = TimeGrid::default();
        let booked: i64 = events.iter().map(|event| event.duration_minutes()).sum();
        let expected = (100.0 * booked as f64 / grid.window_minutes() as f64).round() as u32;
        prop_assert_eq!(
            occupancy_rate(&events, clinic_day(), None, &grid, &SchedulingPolicy::default()),
            expected
        );
    }

    /// Property: rounding lands on a slot boundary within half a slot, and is idempotent
    #[test]
    fn prop_round_to_slot(seconds in 0i64..86_400, config in grid_config()) {
        let grid = TimeGrid::new(config).unwrap();
        let time = fixtures::at(0, 0) + Duration::seconds(seconds);
        let rounded = grid.round_to_slot(time);

        prop_assert!(grid.is_slot_aligned(rounded));
        prop_assert_eq!(grid.round_to_slot(rounded), rounded);
        prop_assert!((rounded - time).num_seconds().abs() <= grid.slot_minutes() * 30);
    }
}
