// Event module
// Appointment model shared by every scheduling service

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::resource::{ResourceId, ResourceRefs};

/// Opaque event identifier, stable within the working set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle state of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventState {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl EventState {
    pub const ALL: [EventState; 4] = [
        EventState::Scheduled,
        EventState::Confirmed,
        EventState::Completed,
        EventState::Cancelled,
    ];

    /// Completed and cancelled appointments cannot change state any more
    pub fn is_terminal(&self) -> bool {
        matches!(self, EventState::Completed | EventState::Cancelled)
    }
}

/// Appointment category. Styling and statistics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    Consultation,
    FollowUp,
    Review,
    Treatment,
    Urgent,
    Administrative,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Consultation,
        EventKind::FollowUp,
        EventKind::Review,
        EventKind::Treatment,
        EventKind::Urgent,
        EventKind::Administrative,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Errors raised when an event is created at the data-entry boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event id cannot be empty")]
    EmptyId,
    #[error("Event end time must be after start time")]
    InvalidRange,
    #[error("Event {0} is required")]
    MissingField(&'static str),
}

/// A time-boxed appointment on the agenda
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub state: EventState,
    #[serde(default)]
    pub kind: EventKind,
    #[serde(default)]
    pub resources: ResourceRefs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use clinic_agenda::models::event::Event;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    /// let start = day.and_hms_opt(9, 0, 0).unwrap();
    /// let end = day.and_hms_opt(9, 30, 0).unwrap();
    /// let event = Event::new("apt-1", start, end).unwrap();
    /// assert_eq!(event.duration_minutes(), 30);
    /// ```
    pub fn new(
        id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: EventId::new(id),
            title: String::new(),
            start,
            end,
            state: EventState::default(),
            kind: EventKind::default(),
            resources: ResourceRefs::default(),
            priority: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event. Used for snapshots that bypass the constructors.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.id.0.trim().is_empty() {
            return Err(EventError::EmptyId);
        }

        if self.end <= self.start {
            return Err(EventError::InvalidRange);
        }

        Ok(())
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True duration in whole minutes; degenerate ranges count as zero
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes().max(0)
    }

    /// Calendar day the event starts on
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == EventState::Cancelled
    }

    /// Half-open interval overlap; back-to-back events do not overlap.
    /// A degenerate range overlaps nothing.
    pub fn overlaps(&self, other: &Event) -> bool {
        !self.is_degenerate()
            && !other.is_degenerate()
            && self.start < other.end
            && other.start < self.end
    }

    /// True when both events reference the same professional or the same room
    pub fn shares_resource(&self, other: &Event) -> bool {
        !self.resources.shared_with(&other.resources).is_empty()
    }

    /// True when the professional or room reference equals `id`
    pub fn uses_resource(&self, id: &ResourceId) -> bool {
        self.resources.references(id)
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    id: Option<String>,
    title: String,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    state: EventState,
    kind: EventKind,
    resources: ResourceRefs,
    priority: Option<Priority>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: String::new(),
            start: None,
            end: None,
            state: EventState::default(),
            kind: EventKind::default(),
            resources: ResourceRefs::default(),
            priority: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn state(mut self, state: EventState) -> Self {
        self.state = state;
        self
    }

    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn professional(mut self, id: impl Into<String>) -> Self {
        self.resources.professional = Some(ResourceId::new(id));
        self
    }

    pub fn room(mut self, id: impl Into<String>) -> Self {
        self.resources.room = Some(ResourceId::new(id));
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, EventError> {
        let id = self.id.ok_or(EventError::MissingField("id"))?;
        let start = self.start.ok_or(EventError::MissingField("start time"))?;
        let end = self.end.ok_or(EventError::MissingField("end time"))?;

        let event = Event {
            id: EventId(id),
            title: self.title,
            start,
            end,
            state: self.state,
            kind: self.kind,
            resources: self.resources,
            priority: self.priority,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
