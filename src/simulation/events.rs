//! World events - pick an effect bundle and apply it to the state
//!
//! Selection is uniform within the requested category. The `chance` weight on
//! each definition is carried through but does not bias the pick.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::catalog::events::{Effect, EventCatalog, EventCategory, EventDefinition};
use crate::core::types::apply_clamped;
use crate::state::StateStore;

/// The event that fired and what it did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventOutcome {
    pub name: String,
    pub category: EventCategory,
    pub location: String,
    pub description: String,
    pub effect: Effect,
}

/// Fire one event of `category` at `location`
///
/// An empty category falls back to the random bucket. Returns `None` only
/// when the catalog has no candidates at all.
pub fn trigger_event<R: Rng + ?Sized>(
    store: &mut StateStore,
    catalog: &EventCatalog,
    location: &str,
    category: EventCategory,
    rng: &mut R,
) -> Option<EventOutcome> {
    let mut candidates = catalog.bucket(category);
    if candidates.is_empty() && category != EventCategory::Random {
        tracing::debug!("No {} events defined, using random bucket", category.as_str());
        candidates = catalog.bucket(EventCategory::Random);
    }

    let chosen: &EventDefinition = candidates.choose(rng)?;
    apply_effect(store, &chosen.effect);

    let outcome = EventOutcome {
        name: chosen.name.clone(),
        category: chosen.category,
        location: location.to_string(),
        description: chosen.description.clone(),
        effect: chosen.effect,
    };

    tracing::debug!(
        "Event '{}' at {}: money {:+}, happiness {:+}, security {:+}",
        outcome.name,
        outcome.location,
        outcome.effect.money,
        outcome.effect.happiness,
        outcome.effect.security
    );

    store.append_event(&format!(
        "{} at {}: {}",
        outcome.name, outcome.location, outcome.description
    ));

    Some(outcome)
}

/// Money is unbounded; happiness and security are clamped to 0..=100
pub fn apply_effect(store: &mut StateStore, effect: &Effect) {
    let state = store.state_mut();
    state.money = state.money.saturating_add(effect.money);
    state.happiness = apply_clamped(state.happiness, effect.happiness);
    state.security = apply_clamped(state.security, effect.security);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn single_event_catalog(effect: Effect) -> EventCatalog {
        EventCatalog::new(vec![EventDefinition {
            name: "Test Event".into(),
            category: EventCategory::Random,
            location: None,
            effect,
            chance: 0.0,
            description: "Something big.".into(),
        }])
    }

    #[test]
    fn test_trigger_applies_effect_and_logs() {
        let mut store = StateStore::in_memory(&SimulationConfig::default());
        let catalog = single_event_catalog(Effect {
            money: -1_500_000,
            happiness: 500,
            security: -500,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome =
            trigger_event(&mut store, &catalog, "Tokyo", EventCategory::Random, &mut rng).unwrap();

        let state = store.get();
        assert_eq!(outcome.name, "Test Event");
        assert_eq!(state.money, 1_000_000 - 1_500_000);
        assert_eq!(state.happiness, 100);
        assert_eq!(state.security, 0);
        assert_eq!(
            state.recent_events.latest(),
            Some("Day 1: Test Event at Tokyo: Something big.")
        );
    }

    #[test]
    fn test_empty_category_falls_back_to_random() {
        let mut store = StateStore::in_memory(&SimulationConfig::default());
        let catalog = single_event_catalog(Effect::default());
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let outcome =
            trigger_event(&mut store, &catalog, "Home", EventCategory::Danger, &mut rng).unwrap();
        assert_eq!(outcome.category, EventCategory::Random);
    }

    #[test]
    fn test_empty_catalog_returns_none() {
        let mut store = StateStore::in_memory(&SimulationConfig::default());
        let catalog = EventCatalog::new(Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert!(trigger_event(&mut store, &catalog, "Home", EventCategory::Random, &mut rng).is_none());
        assert!(store.get().recent_events.is_empty());
    }

    #[test]
    fn test_selection_ignores_chance_weight() {
        // Two candidates, one with zero weight: both must still be picked
        let catalog = EventCatalog::new(vec![
            EventDefinition {
                name: "Heavy".into(),
                category: EventCategory::Business,
                location: None,
                effect: Effect::default(),
                chance: 1.0,
                description: String::new(),
            },
            EventDefinition {
                name: "Weightless".into(),
                category: EventCategory::Business,
                location: None,
                effect: Effect::default(),
                chance: 0.0,
                description: String::new(),
            },
        ]);
        let mut store = StateStore::in_memory(&SimulationConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        let mut weightless = 0;
        for _ in 0..200 {
            let outcome =
                trigger_event(&mut store, &catalog, "Home", EventCategory::Business, &mut rng)
                    .unwrap();
            if outcome.name == "Weightless" {
                weightless += 1;
            }
        }
        assert!(weightless > 50 && weightless < 150, "got {}", weightless);
    }
}
