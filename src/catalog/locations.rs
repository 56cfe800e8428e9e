//! Location catalog
//!
//! Places the player can travel to. Lookup is case-insensitive; travel uses
//! substring containment so "york" resolves to "New York".

use ahash::AHashMap;
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// Prevailing weather at a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[default]
    Clear,
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Humid,
    Arid,
    Temperate,
}

impl Weather {
    /// Human-readable label used in responses
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
            Self::Humid => "humid",
            Self::Arid => "hot and dry",
            Self::Temperate => "mild",
        }
    }
}

/// A travel destination
#[derive(Debug, Clone, serde::Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(rename = "type")]
    pub category: String,
    /// 1 (exposed) to 10 (fortress)
    pub defensibility: u8,
    pub description: String,
    pub specializations: Vec<String>,
    pub population: u64,
    pub weather: Weather,
}

impl Location {
    fn new(
        name: &str,
        category: &str,
        defensibility: u8,
        description: &str,
        specializations: &[&str],
        population: u64,
        weather: Weather,
    ) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            defensibility,
            description: description.to_string(),
            specializations: specializations.iter().map(|s| s.to_string()).collect(),
            population,
            weather,
        }
    }
}

/// Ordered location table with a case-insensitive name index
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    entries: Vec<Location>,
    by_name: AHashMap<String, usize>,
}

impl LocationCatalog {
    pub fn new(entries: Vec<Location>) -> Self {
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, loc)| (loc.name.to_lowercase(), i))
            .collect();
        Self { entries, by_name }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            Location::new(
                "Home",
                "Residential",
                3,
                "A quiet place to rest and plan your next move.",
                &["rest", "planning"],
                1,
                Weather::Clear,
            ),
            Location::new(
                "New York",
                "Metropolis",
                6,
                "The city that never sleeps, a global hub of finance and media.",
                &["finance", "media", "retail"],
                8_300_000,
                Weather::Temperate,
            ),
            Location::new(
                "London",
                "Financial Capital",
                7,
                "Historic streets and a trading floor that never stops moving.",
                &["finance", "insurance", "legal"],
                8_900_000,
                Weather::Rainy,
            ),
            Location::new(
                "Tokyo",
                "Tech Metropolis",
                8,
                "Neon towers, precision manufacturing and relentless innovation.",
                &["electronics", "robotics", "gaming"],
                13_900_000,
                Weather::Humid,
            ),
            Location::new(
                "Silicon Valley",
                "Tech Hub",
                5,
                "Garages turned unicorns; venture capital flows like water.",
                &["software", "venture capital", "ai"],
                3_000_000,
                Weather::Sunny,
            ),
            Location::new(
                "Dubai",
                "Trade Hub",
                7,
                "Skyscrapers rising out of the desert, built on trade and tourism.",
                &["real estate", "logistics", "tourism"],
                3_500_000,
                Weather::Arid,
            ),
            Location::new(
                "Singapore",
                "City State",
                9,
                "A spotless port city where shipping lanes meet private banking.",
                &["shipping", "banking", "biotech"],
                5_600_000,
                Weather::Humid,
            ),
            Location::new(
                "Zurich",
                "Banking Center",
                9,
                "Discreet vaults and lakeside calm; capital is safe here.",
                &["private banking", "insurance", "commodities"],
                420_000,
                Weather::Snowy,
            ),
            Location::new(
                "Shanghai",
                "Manufacturing Hub",
                6,
                "Factories and fintech side by side on the Huangpu.",
                &["manufacturing", "exports", "fintech"],
                24_900_000,
                Weather::Cloudy,
            ),
        ])
    }

    /// Exact name lookup, case-insensitive
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.entries[i])
    }

    /// First location (in catalog order) whose name contains `fragment`,
    /// case-insensitive. Empty fragments never match.
    pub fn find_by_fragment(&self, fragment: &str) -> Option<&Location> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        if let Some(exact) = self.get(&needle) {
            return Some(exact);
        }
        self.entries
            .iter()
            .find(|loc| loc.name.to_lowercase().contains(&needle))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|loc| loc.name.as_str()).collect()
    }
}

/// Serialized as an object keyed by location name, in catalog order
impl Serialize for LocationCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|loc| (loc.name.as_str(), loc)))
    }
}
