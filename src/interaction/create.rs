// Create gesture
// A click on empty grid space proposes a new appointment at the slot under it.

use chrono::NaiveDateTime;

use super::{time_at_pointer, time_at_row, DropTarget, GridViewport, Point, ProposalSink};
use crate::models::resource::ResourceId;
use crate::services::grid::TimeGrid;

#[derive(Clone, Debug, PartialEq)]
pub struct CreateProposal {
    pub start: NaiveDateTime,
    pub resource: Option<ResourceId>,
}

/// Propose a new appointment at the clicked position.
///
/// Uses the pointer when present, else the target's hour row. Returns None,
/// firing nothing, when neither locates a time.
pub fn propose_create(
    target: &DropTarget,
    pointer: Option<Point>,
    viewport: &GridViewport,
    grid: &TimeGrid,
    sink: &mut dyn ProposalSink,
) -> Option<CreateProposal> {
    let start = match (pointer, target.hour_row) {
        (Some(pointer), _) => time_at_pointer(pointer, viewport, target.day, grid),
        (None, Some(row)) => time_at_row(row, target.day, grid),
        (None, None) => {
            log::warn!("Create request on {} without a position, ignoring", target.day);
            return None;
        }
    };
    let resource = target.resource.as_ref().map(|resource| resource.id.clone());

    log::debug!("Proposing new appointment at {} (resource: {:?})", start, resource);
    sink.propose_create(start, resource.clone());

    Some(CreateProposal { start, resource })
}
