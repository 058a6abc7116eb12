//! Multi-resource grouping for side-by-side lane rendering.
//!
//! Events land in the lane of every configured resource whose kind-specific
//! reference they carry. Events matching no lane are dropped unless
//! [`GroupingOptions::unassigned_lane`] is set; they still take part in the
//! day-level conflict pass either way.

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::models::resource::Resource;
use crate::models::settings::SchedulingPolicy;
use crate::models::slot::FreeWindow;
use crate::services::grid::TimeGrid;
use crate::services::occupancy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingOptions {
    /// Collect events that match no configured resource in a trailing lane
    pub unassigned_lane: bool,
}

/// One column of the resource view
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceLane<'a> {
    /// None for the unassigned lane
    pub resource: Option<&'a Resource>,
    pub events: Vec<&'a Event>,
}

impl<'a> ResourceLane<'a> {
    pub fn is_unassigned(&self) -> bool {
        self.resource.is_none()
    }

    pub fn label(&self) -> &str {
        match self.resource {
            Some(resource) if !resource.name.is_empty() => &resource.name,
            Some(resource) => resource.id.as_str(),
            None => "Unassigned",
        }
    }

    /// Occupancy of this lane for `day`; 0 for an empty lane
    pub fn occupancy(&self, day: NaiveDate, grid: &TimeGrid, policy: &SchedulingPolicy) -> u32 {
        occupancy::occupancy_rate(self.events.iter().copied(), day, None, grid, policy)
    }

    pub fn free_windows(
        &self,
        day: NaiveDate,
        grid: &TimeGrid,
        policy: &SchedulingPolicy,
    ) -> Vec<FreeWindow> {
        occupancy::free_windows(self.events.iter().copied(), day, None, grid, policy)
    }
}

/// Partition events into lanes, in resource-list order
pub fn group_by_resource<'a>(
    events: &'a [Event],
    resources: &'a [Resource],
    options: GroupingOptions,
) -> Vec<ResourceLane<'a>> {
    let mut lanes: Vec<ResourceLane<'a>> = resources
        .iter()
        .map(|resource| ResourceLane {
            resource: Some(resource),
            events: events
                .iter()
                .filter(|event| event.resources.matches(resource))
                .collect(),
        })
        .collect();

    let unmatched: Vec<&Event> = events
        .iter()
        .filter(|event| !resources.iter().any(|resource| event.resources.matches(resource)))
        .collect();

    if options.unassigned_lane {
        lanes.push(ResourceLane {
            resource: None,
            events: unmatched,
        });
    } else if !unmatched.is_empty() {
        log::debug!(
            "{} events match no configured resource and are hidden from lanes",
            unmatched.len()
        );
    }

    lanes
}
