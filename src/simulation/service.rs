//! The simulation service
//!
//! Owns the state store, the catalogs, the config and the random source.
//! Every external operation goes through here so there is exactly one
//! place that holds mutable game state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::catalog::{Catalogs, EventCategory};
use crate::command::{CommandOutcome, Interpreter};
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::simulation::day::{advance_day, DayReport};
use crate::simulation::events::{trigger_event, EventOutcome};
use crate::state::{SimulationState, SnapshotFile, StateStore};

pub struct Simulation<R: Rng = ChaCha8Rng> {
    store: StateStore,
    catalogs: Catalogs,
    config: SimulationConfig,
    rng: R,
}

impl Simulation<ChaCha8Rng> {
    /// Build from config: load the snapshot file (if any) and seed the RNG
    pub fn from_config(config: SimulationConfig) -> Self {
        let store = match config.server.state_file.clone() {
            Some(path) => StateStore::open(&config, SnapshotFile::new(path)),
            None => StateStore::in_memory(&config),
        };
        let rng = match config.rng.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_parts(config, store, Catalogs::builtin(), rng)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_parts(
        config: SimulationConfig,
        store: StateStore,
        catalogs: Catalogs,
        rng: R,
    ) -> Self {
        Self {
            store,
            catalogs,
            config,
            rng,
        }
    }

    pub fn state(&self) -> &SimulationState {
        self.store.get()
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Error from the most recent save attempt, if it failed
    pub fn persistence_warning(&self) -> Option<&str> {
        self.store.last_persistence_error()
    }

    /// Raw field override (no clamping)
    pub fn update(&mut self, partial: &serde_json::Value) -> Result<&SimulationState> {
        self.store.merge(partial)
    }

    pub fn reset(&mut self) -> &SimulationState {
        self.store.reset()
    }

    /// Fire a world event; `location` defaults to the current location
    pub fn trigger_event(
        &mut self,
        location: Option<&str>,
        category: EventCategory,
    ) -> Option<EventOutcome> {
        let location = location
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.store.get().location.clone());
        trigger_event(
            &mut self.store,
            &self.catalogs.events,
            &location,
            category,
            &mut self.rng,
        )
    }

    pub fn advance_day(&mut self) -> DayReport {
        advance_day(&mut self.store, &self.config.day, &mut self.rng)
    }

    /// Interpret a free-text prompt
    pub fn chat(&mut self, prompt: &str) -> CommandOutcome {
        Interpreter::new(
            &mut self.store,
            &self.catalogs,
            &self.config.day,
            &mut self.rng,
        )
        .interpret(prompt)
    }

    pub fn market_report(&self) -> String {
        self.catalogs.markets.report()
    }
}
