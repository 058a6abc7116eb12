//! Time grid model.
//!
//! Single source of truth for the working-hours window and slot granularity.
//! Every other service maps wall-clock time through a [`TimeGrid`] instead of
//! reading the hours directly, so changing [`GridConfig`] is enough to reshape
//! the agenda.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::settings::{ConfigError, GridConfig};
use crate::models::slot::TimeSlot;
use crate::utils::date::{minutes_since_midnight, start_of_day};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    config: GridConfig,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            config: GridConfig::default(),
        }
    }
}

impl TimeGrid {
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn slot_minutes(&self) -> i64 {
        i64::from(self.config.slot_minutes)
    }

    pub fn pixels_per_hour(&self) -> f32 {
        self.config.pixels_per_hour
    }

    /// Length of the working window in minutes
    pub fn window_minutes(&self) -> i64 {
        self.config.window_minutes()
    }

    pub fn window_start(&self, day: NaiveDate) -> NaiveDateTime {
        start_of_day(day) + Duration::hours(i64::from(self.config.start_hour))
    }

    pub fn window_end(&self, day: NaiveDate) -> NaiveDateTime {
        start_of_day(day) + Duration::hours(i64::from(self.config.end_hour))
    }

    /// Minutes between the window start and the time of day of `date`.
    ///
    /// Not clamped: times before the window are negative and times after it
    /// exceed [`window_minutes`](Self::window_minutes).
    pub fn offset_for_time(&self, date: NaiveDateTime) -> i64 {
        (date - self.window_start(date.date())).num_minutes()
    }

    pub fn contains_offset(&self, offset_minutes: i64) -> bool {
        (0..=self.window_minutes()).contains(&offset_minutes)
    }

    /// Inverse of [`offset_for_time`](Self::offset_for_time) on the given day
    pub fn time_for_offset(&self, day: NaiveDate, offset_minutes: i64) -> NaiveDateTime {
        self.window_start(day) + Duration::minutes(offset_minutes)
    }

    /// Every slot from window start (inclusive) to window end (exclusive)
    pub fn slots(&self) -> Vec<TimeSlot> {
        let step = self.config.slot_minutes as usize;
        (self.config.start_hour * 60..self.config.end_hour * 60)
            .step_by(step)
            .map(|minute| TimeSlot::new(minute / 60, minute % 60))
            .collect()
    }

    pub fn slot_count(&self) -> usize {
        (self.window_minutes() / self.slot_minutes()) as usize
    }

    /// Round to the nearest slot boundary, zeroing seconds and sub-seconds.
    ///
    /// Sub-minute components take part in the rounding; an exact half slot
    /// rounds up.
    pub fn round_to_slot(&self, date: NaiveDateTime) -> NaiveDateTime {
        let slot = self.slot_minutes() as f64;
        let rounded = (minutes_since_midnight(date) / slot).round() as i64 * self.slot_minutes();
        start_of_day(date.date()) + Duration::minutes(rounded)
    }

    pub fn is_slot_aligned(&self, date: NaiveDateTime) -> bool {
        date.second() == 0
            && date.nanosecond() == 0
            && i64::from(date.hour() * 60 + date.minute()) % self.slot_minutes() == 0
    }

    /// Round a duration to the nearest whole number of slots, never below one slot
    pub fn round_duration(&self, minutes: f64) -> i64 {
        let slot = self.slot_minutes();
        let slots = (minutes / slot as f64).round() as i64;
        (slots * slot).max(slot)
    }

    pub fn minutes_for_pixels(&self, pixels: f32) -> f64 {
        f64::from(pixels) / f64::from(self.config.pixels_per_hour) * 60.0
    }

    pub fn pixels_for_minutes(&self, minutes: i64) -> f32 {
        minutes as f32 / 60.0 * self.config.pixels_per_hour
    }

    /// Slot containing the given time of day, if it is inside the window
    pub fn slot_at(&self, time: NaiveTime) -> Option<TimeSlot> {
        let minute = i64::from(time.hour() * 60 + time.minute());
        let offset = minute - i64::from(self.config.start_hour) * 60;
        if offset < 0 || offset >= self.window_minutes() {
            return None;
        }
        let aligned = minute - minute % self.slot_minutes();
        Some(TimeSlot::new((aligned / 60) as u32, (aligned % 60) as u32))
    }
}
