// Test fixtures - reusable test data
// Provides a consistent clinic day across all test files
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use clinic_agenda::models::event::{Event, EventKind, EventState};
use clinic_agenda::models::resource::Resource;

/// Monday 10 March 2025, the reference clinic day
pub fn clinic_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    clinic_day().and_hms_opt(hour, minute, 0).unwrap()
}

/// Appointment on the clinic day without resources
pub fn appointment(id: &str, start: (u32, u32), end: (u32, u32)) -> Event {
    Event::new(id, at(start.0, start.1), at(end.0, end.1)).unwrap()
}

/// Appointment on the clinic day with a professional and an optional room
pub fn booked(
    id: &str,
    start: (u32, u32),
    end: (u32, u32),
    professional: &str,
    room: Option<&str>,
) -> Event {
    let mut builder = Event::builder()
        .id(id)
        .start(at(start.0, start.1))
        .end(at(end.0, end.1))
        .professional(professional);
    if let Some(room) = room {
        builder = builder.room(room);
    }
    builder.build().unwrap()
}

pub fn cancelled(mut event: Event) -> Event {
    event.state = EventState::Cancelled;
    event
}

pub fn resources() -> Vec<Resource> {
    vec![
        Resource::professional("dr-ana", "Dr. Ana Souza"),
        Resource::professional("dr-bo", "Dr. Bo Lima"),
        Resource::room("room-1", "Room 1"),
        Resource::room("room-2", "Room 2"),
    ]
}

/// A realistic morning with one double booking and one soft overlap
pub fn busy_morning() -> Vec<Event> {
    let mut urgent = booked("apt-4", (10, 0), (10, 30), "dr-bo", Some("room-2"));
    urgent.kind = EventKind::Urgent;
    vec![
        booked("apt-1", (8, 0), (8, 45), "dr-ana", Some("room-1")),
        booked("apt-2", (8, 30), (9, 0), "dr-ana", Some("room-2")),
        booked("apt-3", (10, 0), (10, 30), "dr-ana", Some("room-1")),
        urgent,
        cancelled(booked("apt-5", (11, 0), (12, 0), "dr-ana", Some("room-1"))),
        booked("apt-6", (11, 30), (12, 0), "dr-ana", Some("room-1")),
    ]
}
