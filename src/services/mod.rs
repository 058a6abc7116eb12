// Service module exports
// Pure computations over event snapshots, plus the settings loader

pub mod agenda;
pub mod conflict;
pub mod grid;
pub mod grouping;
pub mod layout;
pub mod occupancy;
pub mod settings;
