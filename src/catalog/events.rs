//! World event definitions
//!
//! Each definition carries a `chance` weight, but selection within a
//! category is uniform: the weight is informational only.

use serde::{Deserialize, Serialize};

/// Event bucket requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    #[default]
    Random,
    Business,
    Danger,
}

impl EventCategory {
    pub const ALL: [EventCategory; 3] = [Self::Random, Self::Business, Self::Danger];

    /// Parse a category name, case-insensitive
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "random" => Some(Self::Random),
            "business" => Some(Self::Business),
            "danger" => Some(Self::Danger),
            _ => None,
        }
    }

    /// Parse a requested category; anything missing or unknown is `Random`
    pub fn from_request(name: Option<&str>) -> Self {
        match name.map(|n| (n, Self::parse(n))) {
            Some((_, Some(category))) => category,
            Some((raw, None)) => {
                tracing::debug!("Unknown event type {:?}, using random", raw);
                Self::Random
            }
            None => Self::Random,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Business => "business",
            Self::Danger => "danger",
        }
    }
}

/// Field deltas applied by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Effect {
    pub money: i64,
    pub happiness: i64,
    pub security: i64,
}

/// A possible world event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDefinition {
    pub name: String,
    pub category: EventCategory,
    /// Where this event is typically reported from; `None` means anywhere
    pub location: Option<String>,
    pub effect: Effect,
    /// Declared trigger weight. Not consulted by selection.
    pub chance: f64,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct EventCatalog {
    entries: Vec<EventDefinition>,
}

impl EventCatalog {
    pub fn new(entries: Vec<EventDefinition>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        use EventCategory::*;

        let def = |name: &str,
                   category: EventCategory,
                   location: Option<&str>,
                   (money, happiness, security): (i64, i64, i64),
                   chance: f64,
                   description: &str| EventDefinition {
            name: name.to_string(),
            category,
            location: location.map(str::to_string),
            effect: Effect {
                money,
                happiness,
                security,
            },
            chance,
            description: description.to_string(),
        };

        Self::new(vec![
            // Random
            def("Market Boom", Random, None, (50_000, 5, 0), 0.2, "Markets rallied and your portfolio rode the wave."),
            def("Local Festival", Random, None, (0, 10, 0), 0.3, "A street festival lifted everyone's spirits."),
            def("Power Outage", Random, None, (-10_000, -5, -5), 0.2, "A blackout halted operations for the day."),
            def("Viral Post", Random, Some("Silicon Valley"), (20_000, 8, 0), 0.15, "A post about your company went viral."),
            def("Heatwave", Random, Some("Dubai"), (-5_000, -5, 0), 0.15, "Scorching heat slowed everyone down."),
            // Business
            def("Investor Interest", Business, Some("New York"), (100_000, 5, 0), 0.2, "An investor wired funds after a promising pitch."),
            def("Supply Chain Disruption", Business, Some("Shanghai"), (-30_000, -5, 0), 0.25, "Shipments stalled at the port."),
            def("Government Grant", Business, None, (75_000, 3, 2), 0.15, "Your project qualified for an innovation grant."),
            def("Tax Audit", Business, Some("London"), (-40_000, -10, 0), 0.2, "Auditors found a few costly discrepancies."),
            def("Partnership Deal", Business, Some("Tokyo"), (60_000, 6, 3), 0.2, "A strategic partner signed on."),
            // Danger
            def("Cyber Attack", Danger, None, (-50_000, -10, -15), 0.25, "Hackers breached your systems."),
            def("Burglary", Danger, None, (-20_000, -8, -20), 0.3, "Thieves broke into your offices overnight."),
            def("Protest", Danger, None, (0, -15, -10), 0.2, "Protesters blocked your headquarters."),
            def("Natural Disaster", Danger, None, (-100_000, -20, -25), 0.1, "A storm tore through the region."),
            def("Extortion Attempt", Danger, Some("Singapore"), (-15_000, -5, -10), 0.15, "A criminal ring demanded protection money."),
        ])
    }

    /// All definitions in a category, catalog order
    pub fn bucket(&self, category: EventCategory) -> Vec<&EventDefinition> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

}
