use std::sync::Arc;

use tokio::sync::Mutex;

use crate::simulation::Simulation;

/// Shared handle to the one simulation; the mutex serializes every request
#[derive(Clone)]
pub struct AppState {
    pub(crate) sim: Arc<Mutex<Simulation>>,
}

impl AppState {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim: Arc::new(Mutex::new(sim)),
        }
    }
}
