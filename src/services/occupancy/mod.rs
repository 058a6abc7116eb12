//! Occupancy and free-slot analysis for a single day.
//!
//! Occupancy sums true event durations without deduplicating overlaps, so a
//! double-booked day reads above 100%. That is the overload signal the agenda
//! header shows; it is not clipped.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::event::{Event, EventKind, EventState};
use crate::models::resource::ResourceId;
use crate::models::settings::SchedulingPolicy;
use crate::models::slot::FreeWindow;
use crate::services::grid::TimeGrid;

/// Events of `day` that count against the schedule, optionally for one resource
fn booked<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    day: NaiveDate,
    resource: Option<&ResourceId>,
    policy: &SchedulingPolicy,
) -> Vec<&'a Event> {
    events
        .into_iter()
        .filter(|event| event.day() == day)
        .filter(|event| policy.counts(event))
        .filter(|event| resource.map_or(true, |id| event.uses_resource(id)))
        .collect()
}

/// Sum of true durations, in minutes
pub fn booked_minutes<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    day: NaiveDate,
    resource: Option<&ResourceId>,
    policy: &SchedulingPolicy,
) -> i64 {
    booked(events, day, resource, policy)
        .iter()
        .map(|event| event.duration_minutes())
        .sum()
}

/// Share of the working window consumed by events, as a rounded percentage.
///
/// Can exceed 100 when events overlap.
pub fn occupancy_rate<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    day: NaiveDate,
    resource: Option<&ResourceId>,
    grid: &TimeGrid,
    policy: &SchedulingPolicy,
) -> u32 {
    rate(booked_minutes(events, day, resource, policy), grid.window_minutes())
}

fn rate(minutes: i64, window_minutes: i64) -> u32 {
    if window_minutes <= 0 {
        return 0;
    }
    (100.0 * minutes as f64 / window_minutes as f64).round() as u32
}

/// Unoccupied intervals of the working window, sorted and non-overlapping
pub fn free_windows<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    day: NaiveDate,
    resource: Option<&ResourceId>,
    grid: &TimeGrid,
    policy: &SchedulingPolicy,
) -> Vec<FreeWindow> {
    let mut busy: Vec<&Event> = booked(events, day, resource, policy)
        .into_iter()
        .filter(|event| {
            if event.is_degenerate() {
                log::warn!("Skipping event {} with end before start", event.id);
                false
            } else {
                true
            }
        })
        .collect();
    busy.sort_by_key(|event| event.start);

    let window_end = grid.window_end(day);
    let mut cursor = grid.window_start(day);
    let mut windows = Vec::new();

    for event in busy {
        if cursor >= window_end {
            break;
        }
        if event.start > cursor {
            windows.push(FreeWindow::new(cursor, event.start.min(window_end)));
        }
        cursor = cursor.max(event.end);
    }

    if cursor < window_end {
        windows.push(FreeWindow::new(cursor, window_end));
    }

    windows
}

/// Earliest free window able to hold an appointment of `min_minutes`
pub fn first_free_window<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    day: NaiveDate,
    resource: Option<&ResourceId>,
    grid: &TimeGrid,
    policy: &SchedulingPolicy,
    min_minutes: i64,
) -> Option<FreeWindow> {
    free_windows(events, day, resource, grid, policy)
        .into_iter()
        .find(|window| window.fits(min_minutes))
}

/// Day statistics shown above the agenda
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: NaiveDate,
    /// Every event of the day, whatever its state
    pub total_events: usize,
    pub by_state: Vec<(EventState, usize)>,
    pub by_kind: Vec<(EventKind, usize)>,
    pub booked_minutes: i64,
    pub occupancy_rate: u32,
    pub free_minutes: i64,
    pub largest_free_window: Option<FreeWindow>,
}

pub fn day_summary<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    day: NaiveDate,
    resource: Option<&ResourceId>,
    grid: &TimeGrid,
    policy: &SchedulingPolicy,
) -> DaySummary {
    let events: Vec<&Event> = events.into_iter().collect();
    let day_events: Vec<&Event> = events
        .iter()
        .copied()
        .filter(|event| event.day() == day)
        .filter(|event| resource.map_or(true, |id| event.uses_resource(id)))
        .collect();

    let by_state = EventState::ALL
        .into_iter()
        .map(|state| (state, day_events.iter().filter(|e| e.state == state).count()))
        .filter(|(_, count)| *count > 0)
        .collect();
    let by_kind = EventKind::ALL
        .into_iter()
        .map(|kind| (kind, day_events.iter().filter(|e| e.kind == kind).count()))
        .filter(|(_, count)| *count > 0)
        .collect();

    let minutes = booked_minutes(events.iter().copied(), day, resource, policy);
    let windows = free_windows(events.iter().copied(), day, resource, grid, policy);

    DaySummary {
        day,
        total_events: day_events.len(),
        by_state,
        by_kind,
        booked_minutes: minutes,
        occupancy_rate: rate(minutes, grid.window_minutes()),
        free_minutes: windows.iter().map(FreeWindow::duration_minutes).sum(),
        largest_free_window: windows
            .iter()
            .copied()
            .max_by_key(|window| (window.duration_minutes(), std::cmp::Reverse(window.start))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn event(id: &str, start: (u32, u32), end: (u32, u32)) -> Event {
        Event::new(id, at(start.0, start.1), at(end.0, end.1)).unwrap()
    }

    fn policy() -> SchedulingPolicy {
        SchedulingPolicy::default()
    }

    #[test]
    fn test_occupancy_empty_day() {
        let events: Vec<Event> = Vec::new();
        assert_eq!(occupancy_rate(&events, day(), None, &TimeGrid::default(), &policy()), 0);
    }

    #[test]
    fn test_occupancy_counts_overlaps_twice() {
        let events = vec![event("a", (7, 0), (21, 0)), event("b", (9, 0), (16, 0))];
        assert_eq!(
            occupancy_rate(&events, day(), None, &TimeGrid::default(), &policy()),
            150
        );
    }

    #[test]
    fn test_occupancy_ignores_other_days() {
        let mut other = event("a", (9, 0), (10, 0));
        other.start += chrono::Duration::days(1);
        other.end += chrono::Duration::days(1);
        assert_eq!(occupancy_rate(&[other], day(), None, &TimeGrid::default(), &policy()), 0);
    }

    #[test]
    fn test_occupancy_for_resource() {
        let mut a = event("a", (9, 0), (16, 0));
        a.resources.professional = Some("dr-ana".into());
        let b = event("b", (9, 0), (16, 0));
        let id = ResourceId::from("dr-ana");
        assert_eq!(
            occupancy_rate(&[a, b], day(), Some(&id), &TimeGrid::default(), &policy()),
            50
        );
    }

    #[test]
    fn test_free_windows_for_resource_ignore_other_professionals() {
        let mut ana = event("a", (9, 0), (10, 0));
        ana.resources.professional = Some("dr-ana".into());
        let mut bo = event("b", (12, 0), (14, 0));
        bo.resources.professional = Some("dr-bo".into());
        let mut shared_room = event("c", (16, 0), (17, 0));
        shared_room.resources.room = Some("room-1".into());
        let events = vec![ana, bo, shared_room];
        let grid = TimeGrid::default();

        let id = ResourceId::from("dr-ana");
        let windows = free_windows(&events, day(), Some(&id), &grid, &policy());
        assert_eq!(
            windows,
            vec![
                FreeWindow::new(at(7, 0), at(9, 0)),
                FreeWindow::new(at(10, 0), at(21, 0)),
            ]
        );

        let room = ResourceId::from("room-1");
        let windows = free_windows(&events, day(), Some(&room), &grid, &policy());
        assert_eq!(
            windows,
            vec![
                FreeWindow::new(at(7, 0), at(16, 0)),
                FreeWindow::new(at(17, 0), at(21, 0)),
            ]
        );

        // Nobody books the unknown resource, so its whole window is free
        let unknown = ResourceId::from("dr-zed");
        let windows = free_windows(&events, day(), Some(&unknown), &grid, &policy());
        assert_eq!(windows, vec![FreeWindow::new(at(7, 0), at(21, 0))]);
    }

    #[test]
    fn test_free_windows_merge_overlapping_events() {
        let events = vec![
            event("a", (10, 0), (11, 30)),
            event("b", (11, 0), (12, 0)),
            event("c", (10, 15), (10, 45)),
        ];
        let windows = free_windows(&events, day(), None, &TimeGrid::default(), &policy());
        assert_eq!(
            windows,
            vec![
                FreeWindow::new(at(7, 0), at(10, 0)),
                FreeWindow::new(at(12, 0), at(21, 0)),
            ]
        );
    }

    #[test]
    fn test_free_windows_clip_to_window() {
        let events = vec![event("early", (6, 0), (7, 30)), event("late", (20, 30), (22, 0))];
        let windows = free_windows(&events, day(), None, &TimeGrid::default(), &policy());
        assert_eq!(windows, vec![FreeWindow::new(at(7, 30), at(20, 30))]);
    }

    #[test]
    fn test_free_windows_event_after_window() {
        let events = vec![event("evening", (21, 30), (22, 0))];
        let windows = free_windows(&events, day(), None, &TimeGrid::default(), &policy());
        assert_eq!(windows, vec![FreeWindow::new(at(7, 0), at(21, 0))]);
    }

    #[test]
    fn test_fully_booked_day_has_no_windows() {
        let events = vec![event("a", (7, 0), (21, 0))];
        let windows = free_windows(&events, day(), None, &TimeGrid::default(), &policy());
        assert!(windows.is_empty());
    }

    #[test]
    fn test_cancelled_event_frees_its_slot() {
        let mut cancelled = event("a", (9, 0), (10, 0));
        cancelled.state = EventState::Cancelled;
        let events = vec![cancelled];
        let grid = TimeGrid::default();
        assert_eq!(free_windows(&events, day(), None, &grid, &policy()).len(), 1);
        assert_eq!(occupancy_rate(&events, day(), None, &grid, &policy()), 0);
    }

    #[test]
    fn test_first_free_window() {
        let events = vec![event("a", (7, 30), (9, 0)), event("b", (9, 45), (12, 0))];
        let found = first_free_window(&events, day(), None, &TimeGrid::default(), &policy(), 45);
        assert_eq!(found, Some(FreeWindow::new(at(9, 0), at(9, 45))));
        let found = first_free_window(&events, day(), None, &TimeGrid::default(), &policy(), 60);
        assert_eq!(found, Some(FreeWindow::new(at(12, 0), at(21, 0))));
    }

    #[test]
    fn test_day_summary() {
        let mut cancelled = event("c", (14, 0), (15, 0));
        cancelled.state = EventState::Cancelled;
        cancelled.kind = EventKind::Urgent;
        let events = vec![event("a", (9, 0), (10, 0)), event("b", (10, 0), (11, 0)), cancelled];

        let summary = day_summary(&events, day(), None, &TimeGrid::default(), &policy());
        assert_eq!(summary.total_events, 3);
        assert_eq!(
            summary.by_state,
            vec![(EventState::Scheduled, 2), (EventState::Cancelled, 1)]
        );
        assert_eq!(
            summary.by_kind,
            vec![(EventKind::Consultation, 2), (EventKind::Urgent, 1)]
        );
        assert_eq!(summary.booked_minutes, 120);
        assert_eq!(summary.occupancy_rate, 14);
        assert_eq!(summary.free_minutes, 720);
        assert_eq!(
            summary.largest_free_window,
            Some(FreeWindow::new(at(11, 0), at(21, 0)))
        );
    }
}
