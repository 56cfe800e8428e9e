//! State store - owns the live state and persists it after every mutation

use serde_json::Value;

use crate::core::config::{SimulationConfig, TemplateConfig};
use crate::core::error::{Result, SimError};
use crate::state::model::SimulationState;
use crate::state::persistence::SnapshotFile;

/// Owner of the single live `SimulationState`
///
/// Save failures never propagate: they are logged and kept in
/// `last_persistence_error` until the next successful save.
#[derive(Debug)]
pub struct StateStore {
    state: SimulationState,
    template: TemplateConfig,
    log_capacity: usize,
    snapshot: Option<SnapshotFile>,
    last_persistence_error: Option<String>,
}

impl StateStore {
    /// A store that never touches disk
    pub fn in_memory(config: &SimulationConfig) -> Self {
        Self {
            state: SimulationState::from_template(&config.template),
            template: config.template.clone(),
            log_capacity: config.log.capacity,
            snapshot: None,
            last_persistence_error: None,
        }
    }

    /// Load from `snapshot`, falling back to the template when the file is
    /// missing or unreadable
    pub fn open(config: &SimulationConfig, snapshot: SnapshotFile) -> Self {
        let state = match snapshot.load() {
            Ok(Some(mut state)) => {
                state.recent_events.truncate_front(config.log.capacity);
                tracing::info!(
                    "Loaded saved state from {} (day {})",
                    snapshot.path().display(),
                    state.day
                );
                state
            }
            Ok(None) => {
                tracing::info!(
                    "No saved state at {}, starting from template",
                    snapshot.path().display()
                );
                SimulationState::from_template(&config.template)
            }
            Err(err) => {
                tracing::warn!(
                    "Could not load {}: {} - starting from template",
                    snapshot.path().display(),
                    err
                );
                SimulationState::from_template(&config.template)
            }
        };

        Self {
            state,
            template: config.template.clone(),
            log_capacity: config.log.capacity,
            snapshot: Some(snapshot),
            last_persistence_error: None,
        }
    }

    pub fn get(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable access for the engine. Callers finish with `append_event`
    /// or `persist` so the change reaches disk.
    pub(crate) fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Raw override: write every key of `partial` verbatim, no clamping
    ///
    /// Non-object input is ignored. A value the typed field cannot hold
    /// rejects the whole update and leaves the state untouched.
    pub fn merge(&mut self, partial: &Value) -> Result<&SimulationState> {
        let Some(updates) = partial.as_object() else {
            return Ok(&self.state);
        };
        if updates.is_empty() {
            return Ok(&self.state);
        }

        let mut merged = serde_json::to_value(&self.state)?;
        if let Some(fields) = merged.as_object_mut() {
            for (key, value) in updates {
                fields.insert(key.clone(), value.clone());
            }
        }

        let next: SimulationState = serde_json::from_value(merged).map_err(|err| {
            SimError::InvalidUpdate(format!(
                "{}. Numeric fields (money, population, happiness, energy, security, \
                 day, cash_invested, dividends_received) take numbers, location takes \
                 a string, recent_events takes a list of strings",
                err
            ))
        })?;

        tracing::debug!("Raw update applied to {} field(s)", updates.len());
        self.state = next;
        self.persist();
        Ok(&self.state)
    }

    /// Restore template values, clear the log and record the reset
    pub fn reset(&mut self) -> &SimulationState {
        self.state.apply_template(&self.template);
        tracing::info!("State reset to template");
        self.append_event("Game reset");
        &self.state
    }

    /// Append `Day N: text` to the log (evicting the oldest) and persist
    pub fn append_event(&mut self, text: &str) {
        let entry = format!("Day {}: {}", self.state.day, text);
        self.state.recent_events.push(entry, self.log_capacity);
        self.persist();
    }

    /// Write the snapshot; returns false when the write failed
    pub fn persist(&mut self) -> bool {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return true;
        };

        match snapshot.save(&self.state) {
            Ok(()) => {
                self.last_persistence_error = None;
                true
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to save state to {}: {}",
                    snapshot.path().display(),
                    err
                );
                self.last_persistence_error = Some(err.to_string());
                false
            }
        }
    }

    pub fn last_persistence_error(&self) -> Option<&str> {
        self.last_persistence_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn store() -> StateStore {
        StateStore::in_memory(&SimulationConfig::default())
    }

    #[test]
    fn test_merge_overwrites_without_clamping() {
        let mut store = store();
        let state = store
            .merge(&json!({"happiness": 250, "money": -5, "location": "Atlantis"}))
            .unwrap();
        assert_eq!(state.happiness, 250);
        assert_eq!(state.money, -5);
        assert_eq!(state.location, "Atlantis");
    }

    #[test]
    fn test_merge_accepts_unknown_keys() {
        let mut store = store();
        store.merge(&json!({"reputation": 9})).unwrap();
        assert_eq!(store.get().extra.get("reputation"), Some(&json!(9)));
    }

    #[test]
    fn test_merge_rejects_ill_typed_value_atomically() {
        let mut store = store();
        let before = store.get().clone();
        let result = store.merge(&json!({"energy": 1, "money": "lots"}));
        assert!(matches!(result, Err(SimError::InvalidUpdate(_))));
        assert_eq!(store.get(), &before);
    }

    #[test]
    fn test_merge_ignores_non_object() {
        let mut store = store();
        let before = store.get().clone();
        store.merge(&json!([1, 2, 3])).unwrap();
        store.merge(&json!("money")).unwrap();
        assert_eq!(store.get(), &before);
    }

    #[test]
    fn test_append_event_prefixes_day() {
        let mut store = store();
        store.state_mut().day = 4;
        store.append_event("Something happened");
        assert_eq!(
            store.get().recent_events.latest(),
            Some("Day 4: Something happened")
        );
    }

    #[test]
    fn test_reset_restores_template_and_logs_once() {
        let mut store = store();
        store.merge(&json!({"money": 1, "day": 30, "cash_invested": 99})).unwrap();
        store.append_event("one");
        store.append_event("two");

        let state = store.reset();
        assert_eq!(state.money, 1_000_000);
        assert_eq!(state.day, 1);
        assert_eq!(state.cash_invested, 0);
        assert_eq!(state.recent_events.len(), 1);
        assert_eq!(state.recent_events.latest(), Some("Day 1: Game reset"));
    }

    #[test]
    fn test_reset_restores_every_canonical_field() {
        let mut store = store();
        store
            .merge(&json!({
                "money": -42,
                "population": 7,
                "happiness": 3,
                "location": "Zurich",
                "energy": -8,
                "security": 250,
                "day": 99,
                "cash_invested": 123_456,
                "dividends_received": 789,
            }))
            .unwrap();

        let template = TemplateConfig::default();
        let state = store.reset();
        assert_eq!(state.money, template.money);
        assert_eq!(state.population, template.population);
        assert_eq!(state.happiness, template.happiness);
        assert_eq!(state.location, template.location);
        assert_eq!(state.energy, template.energy);
        assert_eq!(state.security, template.security);
        assert_eq!(state.day, 1);
        assert_eq!(state.cash_invested, 0);
        assert_eq!(state.dividends_received, 0);
    }

    #[test]
    fn test_merge_floors_float_day() {
        let mut store = store();
        let state = store.merge(&json!({"day": 3.0, "money": 3.7})).unwrap();
        assert_eq!(state.day, 3);
        assert_eq!(state.money, 3);
    }

    #[test]
    fn test_open_falls_back_on_corrupt_file() {
        let path = std::env::temp_dir().join(format!(
            "life_sim_store_corrupt_{}.json",
            std::process::id()
        ));
        fs::write(&path, "][").unwrap();

        let store = StateStore::open(&SimulationConfig::default(), SnapshotFile::new(&path));
        assert_eq!(store.get(), &SimulationState::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_failure_is_reported_not_fatal() {
        let path = std::env::temp_dir()
            .join("life_sim_missing_dir_for_store")
            .join("state.json");
        let mut store = StateStore::open(&SimulationConfig::default(), SnapshotFile::new(path));

        store.append_event("still works");
        assert_eq!(store.get().recent_events.len(), 1);
        assert!(store.last_persistence_error().is_some());
    }

    #[test]
    fn test_mutations_reach_disk() {
        let path = std::env::temp_dir().join(format!(
            "life_sim_store_roundtrip_{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        let config = SimulationConfig::default();

        let mut store = StateStore::open(&config, SnapshotFile::new(&path));
        store.merge(&json!({"money": 77})).unwrap();
        assert!(store.last_persistence_error().is_none());

        let reopened = StateStore::open(&config, SnapshotFile::new(&path));
        assert_eq!(reopened.get().money, 77);
        let _ = fs::remove_file(&path);
    }
}
