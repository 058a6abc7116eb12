use chrono::{Duration, NaiveDateTime};

use super::{time_at_pointer, DropTarget, GridViewport, Point, ProposalSink};
use crate::models::event::{Event, EventId};
use crate::models::resource::{ResourceId, ResourceKind, ResourceRefs};
use crate::services::grid::TimeGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Dropped,
    Cancelled,
}

/// State of one in-progress move gesture
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub event_id: EventId,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    pub original_resources: ResourceRefs,
    pub pointer_pos: Option<Point>,
    /// Whether a real pointer position was seen during the gesture
    pub used_pointer: bool,
}

impl DragSession {
    pub fn from_event(event: &Event) -> Self {
        Self {
            event_id: event.id.clone(),
            original_start: event.start,
            original_end: event.end,
            original_resources: event.resources.clone(),
            pointer_pos: None,
            used_pointer: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.original_end - self.original_start
    }
}

/// Result of a completed move gesture
#[derive(Clone, Debug, PartialEq)]
pub struct MoveProposal {
    pub event_id: EventId,
    pub new_start: NaiveDateTime,
    /// New start plus the original duration
    pub new_end: NaiveDateTime,
    /// Set only for cross-resource drops
    pub new_resource: Option<(ResourceKind, ResourceId)>,
}

/// Owns the drag state machine: `Idle -> Dragging -> {Dropped, Cancelled}`.
///
/// The session only exists between `begin` and `drop`/`cancel`; pointer
/// moves are ignored outside it.
#[derive(Debug)]
pub struct DragController {
    session: Option<DragSession>,
    phase: DragPhase,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            session: None,
            phase: DragPhase::Idle,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn active(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether pointer movement is currently being tracked
    pub fn is_listening(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_dragging_event(&self, event_id: &EventId) -> bool {
        self.session
            .as_ref()
            .map_or(false, |session| &session.event_id == event_id)
    }

    /// Start dragging `event`, discarding any stale session
    pub fn begin(&mut self, event: &Event) {
        if let Some(stale) = self.session.take() {
            log::warn!(
                "Discarding unfinished drag of event {} before starting a new one",
                stale.event_id
            );
        }
        log::debug!("Drag started for event {}", event.id);
        self.session = Some(DragSession::from_event(event));
        self.phase = DragPhase::Dragging;
    }

    /// Record the latest pointer position. No computation happens here.
    pub fn pointer_moved(&mut self, pos: Point) {
        if let Some(session) = self.session.as_mut() {
            log::trace!("Drag pointer at ({}, {})", pos.x, pos.y);
            session.pointer_pos = Some(pos);
            session.used_pointer = true;
        }
    }

    /// Abort the gesture. No proposal fires.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!("Drag of event {} cancelled", session.event_id);
                self.phase = DragPhase::Cancelled;
                true
            }
            None => false,
        }
    }

    /// Finish the gesture on `target` and hand the proposed start to `sink`.
    ///
    /// Returns None, firing nothing, when no drag is in progress.
    pub fn drop(
        &mut self,
        target: &DropTarget,
        viewport: &GridViewport,
        grid: &TimeGrid,
        sink: &mut dyn ProposalSink,
    ) -> Option<MoveProposal> {
        let Some(session) = self.session.take() else {
            log::warn!("Drop received without an active drag, ignoring");
            return None;
        };
        self.phase = DragPhase::Dropped;

        let new_start = candidate_start(&session, target, viewport, grid);
        let new_resource = target.resource.as_ref().and_then(|resource| {
            let current = session.original_resources.get(resource.kind);
            (current != Some(&resource.id)).then(|| (resource.kind, resource.id.clone()))
        });

        log::debug!(
            "Proposing move of event {} to {} (pointer: {}, resource: {:?})",
            session.event_id,
            new_start,
            session.used_pointer,
            new_resource
        );
        sink.propose_move(
            &session.event_id,
            new_start,
            new_resource.as_ref().map(|(_, id)| id.clone()),
        );

        Some(MoveProposal {
            new_end: new_start + session.duration(),
            event_id: session.event_id,
            new_start,
            new_resource,
        })
    }
}

/// Slot-aligned start for a drop: the real pointer when one was seen, else
/// the target's hour row, else the original time of day on the target day
fn candidate_start(
    session: &DragSession,
    target: &DropTarget,
    viewport: &GridViewport,
    grid: &TimeGrid,
) -> NaiveDateTime {
    match (session.used_pointer, session.pointer_pos) {
        (true, Some(pointer)) => time_at_pointer(pointer, viewport, target.day, grid),
        _ => {
            let fallback = match target.hour_row {
                Some(row) => super::time_at_row(row, target.day, grid),
                None => target.day.and_time(session.original_start.time()),
            };
            grid.round_to_slot(fallback)
        }
    }
}
