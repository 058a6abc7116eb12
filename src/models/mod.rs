// Module exports for models
// Plain data consumed and produced by the scheduling services

pub mod conflict;
pub mod event;
pub mod resource;
pub mod settings;
pub mod slot;
