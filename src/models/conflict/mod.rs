// Conflict module
// Derived scheduling conflicts; recomputed on every pass, never persisted

use serde::{Deserialize, Serialize};

use super::event::EventId;
use super::resource::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Time overlap without a shared resource
    Overlap,
    /// Time overlap on the same professional or room
    DoubleBooking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// A pair of overlapping events.
///
/// Each unordered pair is reported once; `first` precedes `second` in the
/// input order the detector was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub first: EventId,
    pub second: EventId,
    pub kind: ConflictKind,
    pub severity: Severity,
    pub overlap_minutes: i64,
    /// Resource kinds both events reference identically
    pub shared: Vec<ResourceKind>,
}

impl Conflict {
    /// Build a conflict, deriving kind and severity from the shared resources
    pub fn classify(
        first: EventId,
        second: EventId,
        overlap_minutes: i64,
        shared: Vec<ResourceKind>,
    ) -> Self {
        let (kind, severity) = if shared.is_empty() {
            (ConflictKind::Overlap, Severity::Warning)
        } else {
            (ConflictKind::DoubleBooking, Severity::Error)
        };

        Self {
            first,
            second,
            kind,
            severity,
            overlap_minutes,
            shared,
        }
    }

    pub fn involves(&self, id: &EventId) -> bool {
        &self.first == id || &self.second == id
    }

    /// The other event of the pair, if `id` is part of it
    pub fn counterpart(&self, id: &EventId) -> Option<&EventId> {
        if &self.first == id {
            Some(&self.second)
        } else if &self.second == id {
            Some(&self.first)
        } else {
            None
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
