//! Simulation state, its bounded event log and the store that persists it

pub mod event_log;
pub mod model;
pub mod persistence;
pub mod store;

pub use event_log::EventLog;
pub use model::{Inventory, SimulationState};
pub use persistence::SnapshotFile;
pub use store::StateStore;
