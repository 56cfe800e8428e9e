//! Static reference catalogs
//!
//! Read-only lookup tables loaded once at startup: locations the player can
//! travel to, market indices for the report, world event definitions and the
//! suggested business actions.

pub mod events;
pub mod locations;
pub mod markets;
pub mod prompts;

pub use events::{Effect, EventCatalog, EventCategory, EventDefinition};
pub use locations::{Location, LocationCatalog, Weather};
pub use markets::{Market, MarketCatalog};
pub use prompts::PromptCatalog;

/// All catalogs bundled together
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub locations: LocationCatalog,
    pub markets: MarketCatalog,
    pub events: EventCatalog,
    pub prompts: PromptCatalog,
}

impl Catalogs {
    /// The built-in game data
    pub fn builtin() -> Self {
        Self {
            locations: LocationCatalog::builtin(),
            markets: MarketCatalog::builtin(),
            events: EventCatalog::builtin(),
            prompts: PromptCatalog::builtin(),
        }
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::builtin()
    }
}
