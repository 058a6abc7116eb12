// Settings module
// Grid configuration and scheduling policy, loaded from agenda.toml

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::event::Event;

pub const DEFAULT_START_HOUR: u32 = 7;
pub const DEFAULT_END_HOUR: u32 = 21;
pub const DEFAULT_SLOT_MINUTES: u32 = 15;
pub const DEFAULT_PIXELS_PER_HOUR: f32 = 60.0;
pub const DEFAULT_MIN_EVENT_HEIGHT: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Working hours must satisfy start < end <= 24 (got {start}:00-{end}:00)")]
    InvalidHours { start: u32, end: u32 },
    #[error("Slot size must be a positive divisor of 60 minutes (got {0})")]
    InvalidSlot(u32),
    #[error("Pixels per hour must be positive (got {0})")]
    InvalidScale(f32),
    #[error("Minimum event height cannot be negative (got {0})")]
    InvalidMinHeight(f32),
}

/// Working-hours window, slot granularity and vertical scale of the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub slot_minutes: u32,
    pub pixels_per_hour: f32,
    /// Floor applied to rendered heights so short events stay clickable
    pub min_event_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            slot_minutes: DEFAULT_SLOT_MINUTES,
            pixels_per_hour: DEFAULT_PIXELS_PER_HOUR,
            min_event_height: DEFAULT_MIN_EVENT_HEIGHT,
        }
    }
}

impl GridConfig {
    pub fn new(start_hour: u32, end_hour: u32, slot_minutes: u32) -> Result<Self, ConfigError> {
        let config = Self {
            start_hour,
            end_hour,
            slot_minutes,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_scale(mut self, pixels_per_hour: f32, min_event_height: f32) -> Self {
        self.pixels_per_hour = pixels_per_hour;
        self.min_event_height = min_event_height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(ConfigError::InvalidHours {
                start: self.start_hour,
                end: self.end_hour,
            });
        }

        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(ConfigError::InvalidSlot(self.slot_minutes));
        }

        if !(self.pixels_per_hour > 0.0) {
            return Err(ConfigError::InvalidScale(self.pixels_per_hour));
        }

        if !(self.min_event_height >= 0.0) {
            return Err(ConfigError::InvalidMinHeight(self.min_event_height));
        }

        Ok(())
    }

    pub fn window_minutes(&self) -> i64 {
        i64::from(self.end_hour.saturating_sub(self.start_hour)) * 60
    }
}

/// Knobs that change which events count against the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPolicy {
    /// When false, cancelled appointments release their slot: they are left
    /// out of conflict detection, occupancy and free-window computation.
    pub cancelled_blocks_slots: bool,
}

impl SchedulingPolicy {
    pub fn counts(&self, event: &Event) -> bool {
        self.cancelled_blocks_slots || !event.is_cancelled()
    }
}

/// Top-level settings persisted as agenda.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaSettings {
    pub grid: GridConfig,
    pub policy: SchedulingPolicy,
}

impl AgendaSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()
    }
}
