// Date utility functions
// Day and week scoping for agenda snapshots

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::event::Event;

pub fn is_same_day(date1: NaiveDateTime, date2: NaiveDateTime) -> bool {
    date1.date() == date2.date()
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Minutes elapsed since midnight, including seconds as a fraction
pub fn minutes_since_midnight(date: NaiveDateTime) -> f64 {
    let elapsed = date - start_of_day(date.date());
    elapsed.num_milliseconds() as f64 / 60_000.0
}

/// First day of the week containing `date`.
///
/// `first_day_of_week` counts from Sunday (0 = Sunday, 1 = Monday).
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// The seven days of the week containing `date`
pub fn week_days(date: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let start = get_week_start(date, first_day_of_week);
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}

/// Events starting on the given day, in input order
pub fn events_on_day(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|event| event.day() == day).collect()
}
