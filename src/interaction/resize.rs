// Event Resize
//
// Dragging the bottom edge of an event block changes its duration; the start
// stays fixed. The height delta converts back to minutes through the grid's
// pixels-per-hour and snaps to whole slots, never below one slot.

use chrono::NaiveDateTime;

use super::{Point, ProposalSink};
use crate::models::event::{Event, EventId};
use crate::services::grid::TimeGrid;

/// Context for an active resize operation
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeSession {
    /// The event being resized
    pub event_id: EventId,
    /// Fixed start of the event
    pub start: NaiveDateTime,
    /// True duration before the gesture
    pub original_minutes: i64,
    /// Pointer position at gesture start
    pub origin: Point,
    /// Latest pointer position, if the pointer moved
    pub pointer_pos: Option<Point>,
}

impl ResizeSession {
    pub fn from_event(event: &Event, origin: Point) -> Self {
        Self {
            event_id: event.id.clone(),
            start: event.start,
            original_minutes: event.duration_minutes(),
            origin,
            pointer_pos: None,
        }
    }

    /// Proposed duration for the current pointer position.
    ///
    /// The snapped value only replaces the original duration when it lies in
    /// the direction of the drag, so an off-grid duration stays put until the
    /// pointer crosses a slot boundary.
    pub fn proposed_minutes(&self, grid: &TimeGrid) -> i64 {
        let delta = self
            .pointer_pos
            .map_or(0.0, |pointer| pointer.y - self.origin.y);
        let minutes = self.original_minutes as f64 + grid.minutes_for_pixels(delta);
        let snapped = grid.round_duration(minutes);

        let follows_drag = (delta > 0.0 && snapped > self.original_minutes)
            || (delta < 0.0 && snapped < self.original_minutes);
        if follows_drag {
            snapped
        } else {
            self.original_minutes
        }
    }
}

/// Result of a completed resize gesture
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeProposal {
    pub event_id: EventId,
    pub new_duration_minutes: i64,
    pub new_end: NaiveDateTime,
}

/// Manager for resize gestures (the restricted form of a drag)
#[derive(Debug, Default)]
pub struct ResizeController {
    session: Option<ResizeSession>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ResizeSession> {
        self.session.as_ref()
    }

    pub fn is_listening(&self) -> bool {
        self.session.is_some()
    }

    /// Check if resizing a specific event
    pub fn is_resizing_event(&self, event_id: &EventId) -> bool {
        self.session
            .as_ref()
            .map_or(false, |session| &session.event_id == event_id)
    }

    /// Begin a resize from a pointer-down on the block's bottom edge
    pub fn begin(&mut self, event: &Event, origin: Point) {
        if let Some(stale) = self.session.take() {
            log::warn!("Discarding unfinished resize of event {}", stale.event_id);
        }
        self.session = Some(ResizeSession::from_event(event, origin));
    }

    pub fn pointer_moved(&mut self, pos: Point) {
        if let Some(session) = self.session.as_mut() {
            session.pointer_pos = Some(pos);
        }
    }

    /// Live preview of the duration while the gesture runs
    pub fn preview_minutes(&self, grid: &TimeGrid) -> Option<i64> {
        self.session
            .as_ref()
            .map(|session| session.proposed_minutes(grid))
    }

    /// Cancel the resize operation
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Finish the resize and propose the new duration.
    ///
    /// Nothing fires when the pointer never moved or the snapped duration
    /// equals the current one.
    pub fn finish(&mut self, grid: &TimeGrid, sink: &mut dyn ProposalSink) -> Option<ResizeProposal> {
        let session = self.session.take()?;
        if session.pointer_pos.is_none() {
            log::debug!("Resize of event {} released without movement", session.event_id);
            return None;
        }

        let minutes = session.proposed_minutes(grid);
        if minutes == session.original_minutes {
            return None;
        }

        log::debug!(
            "Proposing resize of event {} from {} to {} minutes",
            session.event_id,
            session.original_minutes,
            minutes
        );
        sink.propose_resize(&session.event_id, minutes);

        Some(ResizeProposal {
            new_end: session.start + chrono::Duration::minutes(minutes),
            event_id: session.event_id,
            new_duration_minutes: minutes,
        })
    }
}
