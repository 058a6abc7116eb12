//! Agenda facade.
//!
//! Bundles a snapshot of events and resources with the settings and exposes
//! the derived query surface used by the day, week and resource views.
//! Snapshots are replaced wholesale; nothing is mutated mid-computation.
//!
//! [`PendingChanges`] is the optimistic layer: the views render
//! [`PendingChanges::apply`] while the store confirms or rejects proposals.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::interaction::drag::MoveProposal;
use crate::interaction::resize::ResizeProposal;
use crate::models::conflict::Conflict;
use crate::models::event::{Event, EventId};
use crate::models::resource::{Resource, ResourceId, ResourceKind};
use crate::models::settings::{AgendaSettings, ConfigError};
use crate::models::slot::FreeWindow;
use crate::services::conflict;
use crate::services::grid::TimeGrid;
use crate::services::grouping::{self, GroupingOptions, ResourceLane};
use crate::services::layout::{self, EventPosition};
use crate::services::occupancy::{self, DaySummary};
use crate::utils::date::events_on_day;

pub struct Agenda {
    settings: AgendaSettings,
    grid: TimeGrid,
    events: Vec<Event>,
    resources: Vec<Resource>,
}

impl Agenda {
    pub fn new(settings: AgendaSettings) -> Result<Self, ConfigError> {
        let grid = TimeGrid::new(settings.grid)?;
        Ok(Self {
            settings,
            grid,
            events: Vec::new(),
            resources: Vec::new(),
        })
    }

    pub fn with_snapshot(mut self, events: Vec<Event>, resources: Vec<Resource>) -> Self {
        self.replace_events(events);
        self.resources = resources;
        self
    }

    /// Swap in a new event snapshot
    pub fn replace_events(&mut self, events: Vec<Event>) {
        let invalid = events.iter().filter(|event| event.validate().is_err()).count();
        if invalid > 0 {
            log::warn!("Snapshot contains {} events with an invalid time range", invalid);
        }
        self.events = events;
    }

    pub fn replace_resources(&mut self, resources: Vec<Resource>) {
        self.resources = resources;
    }

    pub fn settings(&self) -> &AgendaSettings {
        &self.settings
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Conflicts among the events of one day
    pub fn conflicts_for(&self, day: NaiveDate) -> Vec<Conflict> {
        conflict::conflicts_for(events_on_day(&self.events, day), &self.settings.policy)
    }

    /// Conflicts across the whole snapshot, scoped per day
    pub fn conflicts_by_day(&self) -> Vec<(NaiveDate, Vec<Conflict>)> {
        conflict::conflicts_by_day(&self.events, &self.settings.policy)
            .into_iter()
            .collect()
    }

    pub fn occupancy_rate(&self, day: NaiveDate, resource: Option<&ResourceId>) -> u32 {
        occupancy::occupancy_rate(&self.events, day, resource, &self.grid, &self.settings.policy)
    }

    pub fn free_windows(&self, day: NaiveDate, resource: Option<&ResourceId>) -> Vec<FreeWindow> {
        occupancy::free_windows(&self.events, day, resource, &self.grid, &self.settings.policy)
    }

    pub fn day_summary(&self, day: NaiveDate, resource: Option<&ResourceId>) -> DaySummary {
        occupancy::day_summary(&self.events, day, resource, &self.grid, &self.settings.policy)
    }

    pub fn position_for(&self, event: &Event) -> EventPosition {
        layout::position_for(event, &self.grid)
    }

    /// Lanes of the resource view for one day
    pub fn lanes(&self, day: NaiveDate, options: GroupingOptions) -> Vec<ResourceLane<'_>> {
        let mut lanes = grouping::group_by_resource(&self.events, &self.resources, options);
        for lane in &mut lanes {
            lane.events.retain(|event| event.day() == day);
        }
        lanes
    }
}

/// Optimistic edit awaiting confirmation from the store
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub resource: Option<(ResourceKind, ResourceId)>,
}

/// Proposals applied locally until the store answers.
///
/// One entry per event; the latest proposal for an event wins.
#[derive(Debug, Default)]
pub struct PendingChanges {
    changes: HashMap<EventId, PendingChange>,
}

impl PendingChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_move(&mut self, proposal: &MoveProposal) {
        let change = self
            .changes
            .entry(proposal.event_id.clone())
            .or_insert(PendingChange {
                start: None,
                end: None,
                resource: None,
            });
        change.start = Some(proposal.new_start);
        change.end = Some(proposal.new_end);
        if proposal.new_resource.is_some() {
            change.resource = proposal.new_resource.clone();
        }
    }

    pub fn record_resize(&mut self, proposal: &ResizeProposal) {
        let change = self
            .changes
            .entry(proposal.event_id.clone())
            .or_insert(PendingChange {
                start: None,
                end: None,
                resource: None,
            });
        change.end = Some(proposal.new_end);
    }

    pub fn is_pending(&self, id: &EventId) -> bool {
        self.changes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The store accepted the change; the next snapshot will carry it
    pub fn confirm(&mut self, id: &EventId) -> Option<PendingChange> {
        self.changes.remove(id)
    }

    /// The store rejected the change; drop it so the view rolls back
    pub fn reject(&mut self, id: &EventId) -> Option<PendingChange> {
        let change = self.changes.remove(id);
        if change.is_some() {
            log::info!("Rolled back optimistic change for event {}", id);
        }
        change
    }

    /// Snapshot with every pending change applied
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        events
            .iter()
            .map(|event| match self.changes.get(&event.id) {
                Some(change) => {
                    let mut updated = event.clone();
                    if let Some(start) = change.start {
                        updated.start = start;
                    }
                    if let Some(end) = change.end {
                        updated.end = end;
                    }
                    if let Some((kind, id)) = &change.resource {
                        updated.resources = updated.resources.with(*kind, id.clone());
                    }
                    updated
                }
                None => event.clone(),
            })
            .collect()
    }
}
