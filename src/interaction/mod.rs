// Interaction module
// Drag, resize and create gestures on the time grid.
//
// Gestures never persist anything: on release they hand a proposal to a
// ProposalSink, which forwards it to the external store.

pub mod create;
pub mod drag;
pub mod resize;

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::event::EventId;
use crate::models::resource::{Resource, ResourceId};
use crate::services::grid::TimeGrid;

/// Pointer position in screen units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Placement of the grid container at the moment of the gesture.
///
/// Content y = pointer y - `top` - `scroll_offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridViewport {
    pub top: f32,
    pub scroll_offset: f32,
}

impl GridViewport {
    pub fn new(top: f32, scroll_offset: f32) -> Self {
        Self { top, scroll_offset }
    }

    pub fn content_y(&self, pointer: Point) -> f32 {
        pointer.y - self.top - self.scroll_offset
    }
}

/// Where a gesture was released
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub day: NaiveDate,
    /// Discrete hour row under the drop, used when no pointer position exists
    pub hour_row: Option<u32>,
    /// Lane the gesture ended in, for resource views
    pub resource: Option<Resource>,
}

impl DropTarget {
    pub fn day(day: NaiveDate) -> Self {
        Self {
            day,
            hour_row: None,
            resource: None,
        }
    }

    pub fn with_row(mut self, row: u32) -> Self {
        self.hour_row = Some(row);
        self
    }

    pub fn in_lane(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }
}

/// Outbound callbacks to the persistence collaborator.
///
/// Each gesture fires at most one of these.
#[cfg_attr(test, mockall::automock)]
pub trait ProposalSink {
    fn propose_move(
        &mut self,
        event_id: &EventId,
        new_start: NaiveDateTime,
        new_resource: Option<ResourceId>,
    );
    fn propose_resize(&mut self, event_id: &EventId, new_duration_minutes: i64);
    fn propose_create(&mut self, start: NaiveDateTime, resource: Option<ResourceId>);
}

/// A recorded outbound proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    Move {
        event_id: EventId,
        new_start: NaiveDateTime,
        new_resource: Option<ResourceId>,
    },
    Resize {
        event_id: EventId,
        new_duration_minutes: i64,
    },
    Create {
        start: NaiveDateTime,
        resource: Option<ResourceId>,
    },
}

/// Queue proposals for a host that forwards them in batches
impl ProposalSink for Vec<Proposal> {
    fn propose_move(
        &mut self,
        event_id: &EventId,
        new_start: NaiveDateTime,
        new_resource: Option<ResourceId>,
    ) {
        self.push(Proposal::Move {
            event_id: event_id.clone(),
            new_start,
            new_resource,
        });
    }

    fn propose_resize(&mut self, event_id: &EventId, new_duration_minutes: i64) {
        self.push(Proposal::Resize {
            event_id: event_id.clone(),
            new_duration_minutes,
        });
    }

    fn propose_create(&mut self, start: NaiveDateTime, resource: Option<ResourceId>) {
        self.push(Proposal::Create { start, resource });
    }
}

/// Project a pointer onto `day`, clamped to the working window and rounded
/// to the nearest slot
pub fn time_at_pointer(
    pointer: Point,
    viewport: &GridViewport,
    day: NaiveDate,
    grid: &TimeGrid,
) -> NaiveDateTime {
    let minutes = grid
        .minutes_for_pixels(viewport.content_y(pointer))
        .clamp(0.0, grid.window_minutes() as f64);
    let raw = grid.window_start(day) + chrono::Duration::milliseconds((minutes * 60_000.0) as i64);
    grid.round_to_slot(raw)
}

/// Start of the given hour row, clamped to the working window
pub fn time_at_row(row: u32, day: NaiveDate, grid: &TimeGrid) -> NaiveDateTime {
    let offset = (i64::from(row) * 60).min(grid.window_minutes());
    grid.time_for_offset(day, offset)
}
