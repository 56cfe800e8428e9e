//! Integration tests for the simulation service
//!
//! These drive the public `Simulation` API the way the HTTP layer does:
//! - Free-text commands end to end (travel, invest, advance day)
//! - Snapshot persistence across restarts
//! - Event log capacity and ordering

use std::fs;
use std::path::PathBuf;

use life_sim::catalog::EventCategory;
use life_sim::command::{Intent, OutcomeKind};
use life_sim::core::config::SimulationConfig;
use life_sim::simulation::Simulation;
use serde_json::json;

fn memory_sim(seed: u64) -> Simulation {
    let mut config = SimulationConfig::default();
    config.server.state_file = None;
    config.rng.seed = Some(seed);
    Simulation::from_config(config)
}

fn file_sim(path: &PathBuf, seed: u64) -> Simulation {
    let mut config = SimulationConfig::default();
    config.server.state_file = Some(path.clone());
    config.rng.seed = Some(seed);
    Simulation::from_config(config)
}

fn scratch_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("life_sim_it_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

// ============================================================================
// Command Workflows
// ============================================================================

#[test]
fn test_new_game_invest_then_advance() {
    let mut sim = memory_sim(1);

    let outcome = sim.chat("invest 50000");
    assert_eq!(outcome.intent, Intent::Invest);
    assert_eq!(outcome.kind, OutcomeKind::Applied);
    assert_eq!(sim.state().money, 950_000);
    assert_eq!(sim.state().cash_invested, 50_000);

    // 5000 * 10 + 50000 * 0.05
    let report = sim.advance_day();
    assert_eq!(report.new_day, 2);
    assert_eq!(report.income, 52_500);
    assert_eq!(sim.state().money, 1_002_500);
    assert_eq!(
        sim.state().recent_events.latest(),
        Some("Day 2: Day advanced: income +$52,500")
    );
}

#[test]
fn test_unknown_destination_changes_nothing() {
    let mut sim = memory_sim(2);
    let before = sim.state().clone();

    let outcome = sim.chat("go to Atlantis");
    assert_eq!(outcome.intent, Intent::Travel);
    assert_eq!(outcome.kind, OutcomeKind::LookupMiss);
    assert!(outcome.response.contains("Tokyo"));
    assert_eq!(sim.state(), &before);
}

#[test]
fn test_tour_of_locations() {
    let mut sim = memory_sim(3);
    for (prompt, expected) in [
        ("go to london", "London"),
        ("visit Singapore", "Singapore"),
        ("travel shanghai", "Shanghai"),
        ("go to silicon valley", "Silicon Valley"),
    ] {
        sim.chat(prompt);
        assert_eq!(sim.state().location, expected);
    }
    let log: Vec<&str> = sim.state().recent_events.iter().collect();
    assert_eq!(log.len(), 4);
    assert_eq!(log[0], "Day 1: Travelled to London");
    assert_eq!(log[3], "Day 1: Travelled to Silicon Valley");
}

#[test]
fn test_update_then_reset() {
    let mut sim = memory_sim(4);
    sim.update(&json!({"money": 5, "happiness": -40, "mood": "grumpy"}))
        .unwrap();
    assert_eq!(sim.state().money, 5);
    assert_eq!(sim.state().happiness, -40);
    assert_eq!(sim.state().extra["mood"], "grumpy");

    let state = sim.reset().clone();
    assert_eq!(state.money, 1_000_000);
    assert_eq!(state.happiness, 75);
    assert_eq!(state.day, 1);
    assert_eq!(state.recent_events.len(), 1);
}

#[test]
fn test_events_keep_stats_in_range() {
    let mut sim = memory_sim(5);
    sim.update(&json!({"happiness": 1, "security": 99})).unwrap();
    for category in EventCategory::ALL.iter().cycle().take(60) {
        let outcome = sim.trigger_event(Some("Zurich"), *category);
        assert!(outcome.is_some());
        let state = sim.state();
        assert!((0..=100).contains(&state.happiness));
        assert!((0..=100).contains(&state.security));
    }
}

// ============================================================================
// Event Log
// ============================================================================

#[test]
fn test_log_keeps_most_recent_twenty() {
    let mut sim = memory_sim(6);
    for i in 0..25 {
        sim.update(&json!({"day": i + 1})).unwrap();
        sim.chat("go to tokyo");
    }
    let log: Vec<&str> = sim.state().recent_events.iter().collect();
    assert_eq!(log.len(), 20);
    assert_eq!(log[0], "Day 6: Travelled to Tokyo");
    assert_eq!(log[19], "Day 25: Travelled to Tokyo");
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_state_survives_restart() {
    let path = scratch_file("restart.json");
    {
        let mut sim = file_sim(&path, 7);
        sim.chat("go to dubai");
        sim.chat("invest 1000");
        assert!(sim.persistence_warning().is_none());
    }

    let sim = file_sim(&path, 7);
    assert_eq!(sim.state().location, "Dubai");
    assert_eq!(sim.state().cash_invested, 1000);
    assert_eq!(sim.state().recent_events.len(), 2);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_partial_snapshot_fills_defaults() {
    let path = scratch_file("partial.json");
    fs::write(&path, r#"{"money": 12.9, "location": "Tokyo", "pets": 3}"#).unwrap();

    let sim = file_sim(&path, 8);
    assert_eq!(sim.state().money, 12);
    assert_eq!(sim.state().location, "Tokyo");
    assert_eq!(sim.state().population, 5000);
    assert_eq!(sim.state().extra["pets"], 3);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_corrupt_snapshot_starts_fresh() {
    let path = scratch_file("corrupt.json");
    fs::write(&path, "this is not json").unwrap();

    let sim = file_sim(&path, 9);
    assert_eq!(sim.state().money, 1_000_000);
    assert_eq!(sim.state().location, "New York");

    let _ = fs::remove_file(&path);
}

#[test]
fn test_unwritable_snapshot_reports_warning() {
    let path = std::env::temp_dir()
        .join("life_sim_missing_dir_for_tests")
        .join("nested")
        .join("state.json");

    let mut sim = file_sim(&path, 10);
    let outcome = sim.chat("invest 10");
    assert_eq!(outcome.kind, OutcomeKind::Applied);
    assert_eq!(sim.state().money, 999_990);
    assert!(sim.persistence_warning().is_some());
}
