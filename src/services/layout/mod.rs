//! Position calculator for event blocks on the time grid.
//!
//! Heights carry a presentational floor so short appointments stay clickable.
//! Nothing here feeds back into conflict or occupancy math, which always use
//! the true duration.

use serde::{Deserialize, Serialize};

use crate::models::event::Event;
use crate::services::grid::TimeGrid;

/// Vertical placement of an event block, in grid units (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventPosition {
    pub top: f32,
    pub height: f32,
}

impl EventPosition {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom()
    }
}

/// Compute the block position for an event.
///
/// Never fails: zero or negative durations get the minimum height.
pub fn position_for(event: &Event, grid: &TimeGrid) -> EventPosition {
    let pixels_per_hour = grid.pixels_per_hour();
    let top = grid.offset_for_time(event.start) as f32 / 60.0 * pixels_per_hour;
    let natural = event.duration_minutes() as f32 / 60.0 * pixels_per_hour;

    EventPosition {
        top,
        height: natural.max(grid.config().min_event_height),
    }
}

/// Positions for a whole day, in input order
pub fn positions_for<'a>(events: &[&'a Event], grid: &TimeGrid) -> Vec<(&'a Event, EventPosition)> {
    events
        .iter()
        .map(|event| (*event, position_for(event, grid)))
        .collect()
}

/// What a pointer-down on an event block starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
}

/// Blocks shorter than this split evenly between move and resize areas
const SMALL_BLOCK_HEIGHT: f32 = 50.0;
/// Height of the bottom resize area on taller blocks
const RESIZE_ZONE_HEIGHT: f32 = 20.0;

/// Hit areas of an event block: the body moves, the bottom edge resizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeZone {
    pub block: EventPosition,
    pub zone_height: f32,
}

impl ResizeZone {
    pub fn for_position(block: EventPosition) -> Self {
        let zone_height = if block.height < SMALL_BLOCK_HEIGHT {
            block.height / 2.0
        } else {
            RESIZE_ZONE_HEIGHT
        };
        Self { block, zone_height }
    }

    /// Classify a pointer-down at `y`; None when outside the block
    pub fn hit_test(&self, y: f32) -> Option<GestureKind> {
        if !self.block.contains_y(y) {
            return None;
        }
        if y >= self.block.bottom() - self.zone_height {
            Some(GestureKind::Resize)
        } else {
            Some(GestureKind::Move)
        }
    }
}
