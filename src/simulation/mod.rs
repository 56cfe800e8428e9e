//! Simulation engine: world events, day ticks and the service that owns them

pub mod day;
pub mod events;
pub mod service;

pub use day::{advance_day, DayReport};
pub use events::{trigger_event, EventOutcome};
pub use service::Simulation;
