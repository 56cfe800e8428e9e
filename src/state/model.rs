//! The simulation state record

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::config::TemplateConfig;
use crate::core::types::{Day, Money};
use crate::state::event_log::EventLog;

/// The player's world
///
/// Missing fields in a snapshot are filled from the default template, and
/// unknown fields are kept in `extra` so the record stays open-schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationState {
    #[serde(deserialize_with = "lenient_int")]
    pub money: Money,
    #[serde(deserialize_with = "lenient_int")]
    pub population: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub happiness: i64,
    pub location: String,
    #[serde(deserialize_with = "lenient_int")]
    pub energy: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub security: i64,
    #[serde(deserialize_with = "lenient_day")]
    pub day: Day,
    #[serde(deserialize_with = "lenient_int")]
    pub cash_invested: Money,
    #[serde(deserialize_with = "lenient_int")]
    pub dividends_received: Money,
    pub recent_events: EventLog,
    /// Only present in snapshots written by the older coin/items layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Inventory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Coin purse and item list from the older state layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    #[serde(deserialize_with = "lenient_int")]
    pub coins: i64,
    pub items: Vec<Value>,
}

impl SimulationState {
    /// A fresh state built from the template values
    pub fn from_template(template: &TemplateConfig) -> Self {
        Self {
            money: template.money,
            population: template.population,
            happiness: template.happiness,
            location: template.location.clone(),
            energy: template.energy,
            security: template.security,
            day: 1,
            cash_invested: 0,
            dividends_received: 0,
            recent_events: EventLog::new(),
            inventory: None,
            extra: Map::new(),
        }
    }

    /// Overwrite the canonical fields with template values
    ///
    /// Unknown fields and the legacy inventory are left alone.
    pub fn apply_template(&mut self, template: &TemplateConfig) {
        self.money = template.money;
        self.population = template.population;
        self.happiness = template.happiness;
        self.location = template.location.clone();
        self.energy = template.energy;
        self.security = template.security;
        self.day = 1;
        self.cash_invested = 0;
        self.dividends_received = 0;
        self.recent_events.clear();
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::from_template(&TemplateConfig::default())
    }
}

/// Accept integers and finite floats (floored) for integer fields
///
/// Older snapshots stored income as floats (e.g. `1050000.0`).
fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    match Number::deserialize(deserializer)? {
        Number::Int(value) => Ok(value),
        Number::Float(value) if value.is_finite() => Ok(value.floor() as i64),
        Number::Float(value) => Err(serde::de::Error::custom(format!(
            "expected a finite number, got {}",
            value
        ))),
    }
}

/// Day counter: non-negative integers, or finite non-negative floats (floored)
fn lenient_day<'de, D>(deserializer: D) -> Result<Day, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(u64),
        Float(f64),
    }

    match Number::deserialize(deserializer)? {
        Number::Int(value) => Ok(value),
        Number::Float(value) if value.is_finite() && value >= 0.0 => Ok(value.floor() as u64),
        Number::Float(value) => Err(serde::de::Error::custom(format!(
            "expected a non-negative day, got {}",
            value
        ))),
    }
}
