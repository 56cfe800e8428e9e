//! Simulation configuration with documented constants
//!
//! Every tunable number lives here. Values come from `Default`, can be
//! overridden by an optional TOML file, and finally by CLI flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, SimError};
use crate::core::types::{Money, STAT_MAX, STAT_MIN};

/// Top-level configuration for the simulation service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Values a fresh or reset game starts from
    pub template: TemplateConfig,
    /// Event log sizing
    pub log: LogConfig,
    /// Day advancement rules
    pub day: DayConfig,
    /// Random source
    pub rng: RngConfig,
    /// HTTP and persistence settings
    pub server: ServerConfig,
}

/// Starting values used at first launch and on reset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub money: Money,
    pub population: i64,
    pub happiness: i64,
    /// Must name a Location Catalog entry
    pub location: String,
    pub energy: i64,
    pub security: i64,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            money: 1_000_000,
            population: 5000,
            happiness: 75,
            location: "New York".to_string(),
            energy: 100,
            security: 60,
        }
    }
}

/// Event log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum number of `recent_events` entries kept
    ///
    /// When the log is full the oldest entry is evicted first.
    pub capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { capacity: 20 }
    }
}

/// How passive income is computed on each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeModel {
    /// `population * population_income + floor(cash_invested * investment_yield)`
    #[default]
    Formula,
    /// Random signed money delta plus a happiness wobble
    Legacy,
}

/// Day advancement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DayConfig {
    pub income_model: IncomeModel,

    /// Income per head of population per day
    pub population_income: i64,

    /// Fraction of `cash_invested` paid out per day
    ///
    /// At 0.05, an investment of 100,000 yields 5,000 per day.
    pub investment_yield: f64,

    /// Inclusive range of energy lost per day
    pub energy_drop_min: i64,
    pub energy_drop_max: i64,

    /// Inclusive range of the legacy model's random money delta
    pub legacy_money_min: Money,
    pub legacy_money_max: Money,

    /// Legacy model happiness wobble is drawn from [-n, n]
    pub legacy_happiness_swing: i64,
}

impl Default for DayConfig {
    fn default() -> Self {
        Self {
            income_model: IncomeModel::Formula,
            population_income: 10,
            investment_yield: 0.05,
            energy_drop_min: 5,
            energy_drop_max: 15,
            legacy_money_min: -500,
            legacy_money_max: 1500,
            legacy_happiness_swing: 5,
        }
    }
}

/// Random source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RngConfig {
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
}

/// HTTP server and persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Snapshot file; `None` keeps state in memory only
    pub state_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            state_file: Some(PathBuf::from("state.json")),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.log.capacity == 0 {
            return Err(SimError::InvalidConfig(
                "log.capacity must be at least 1".into(),
            ));
        }

        if self.day.energy_drop_min > self.day.energy_drop_max {
            return Err(SimError::InvalidConfig(format!(
                "day.energy_drop_min ({}) should be <= day.energy_drop_max ({})",
                self.day.energy_drop_min, self.day.energy_drop_max
            )));
        }

        if self.day.legacy_money_min > self.day.legacy_money_max {
            return Err(SimError::InvalidConfig(format!(
                "day.legacy_money_min ({}) should be <= day.legacy_money_max ({})",
                self.day.legacy_money_min, self.day.legacy_money_max
            )));
        }

        if self.day.legacy_happiness_swing < 0 {
            return Err(SimError::InvalidConfig(
                "day.legacy_happiness_swing must not be negative".into(),
            ));
        }

        let t = &self.template;
        for (name, value) in [
            ("happiness", t.happiness),
            ("energy", t.energy),
            ("security", t.security),
        ] {
            if !(STAT_MIN..=STAT_MAX).contains(&value) {
                return Err(SimError::InvalidConfig(format!(
                    "template.{} ({}) must be within {}..={}",
                    name, value, STAT_MIN, STAT_MAX
                )));
            }
        }

        self.bind_addr()?;
        Ok(())
    }

    /// Parsed bind address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .map_err(|_| SimError::InvalidConfig(format!("invalid bind address: {}", self.server.bind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [log]
            capacity = 10

            [day]
            income_model = "legacy"
            "#,
        )
        .unwrap();

        assert_eq!(config.log.capacity, 10);
        assert_eq!(config.day.income_model, IncomeModel::Legacy);
        assert_eq!(config.day.population_income, 10);
        assert_eq!(config.template.money, 1_000_000);
    }

    #[test]
    fn test_inverted_energy_range_rejected() {
        let mut config = SimulationConfig::default();
        config.day.energy_drop_min = 20;
        config.day.energy_drop_max = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_template_rejected() {
        let mut config = SimulationConfig::default();
        config.template.happiness = 140;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_bind_rejected() {
        let result = SimulationConfig::from_toml_str(
            r#"
            [server]
            bind = "not-an-address"
            "#,
        );
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = SimulationConfig::from_toml_str("[log\ncapacity = ");
        assert!(matches!(result, Err(SimError::TomlError(_))));
    }
}
