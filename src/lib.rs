// Clinic Agenda Library
// Scheduling core behind the agenda's day, week and resource views

pub mod interaction;
pub mod models;
pub mod services;
pub mod utils;
