//! Market indices shown in the market report

use serde::ser::{Serialize, Serializer};

/// A tracked market index
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Market {
    pub symbol: String,
    pub index: f64,
    /// Annualized volatility as a fraction (0.15 = 15%)
    pub volatility: f64,
    pub sector: String,
}

#[derive(Debug, Clone)]
pub struct MarketCatalog {
    entries: Vec<Market>,
}

impl MarketCatalog {
    pub fn new(entries: Vec<Market>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        let market = |symbol: &str, index: f64, volatility: f64, sector: &str| Market {
            symbol: symbol.to_string(),
            index,
            volatility,
            sector: sector.to_string(),
        };

        Self::new(vec![
            market("S&P 500", 4500.0, 0.15, "Broad Market"),
            market("NASDAQ", 14000.0, 0.22, "Technology"),
            market("FTSE 100", 7500.0, 0.12, "Blue Chip"),
            market("NIKKEI 225", 33000.0, 0.18, "Asia Pacific"),
            market("DAX", 15800.0, 0.16, "Industrials"),
            market("GOLD", 1950.0, 0.10, "Commodities"),
            market("BTC", 42000.0, 0.65, "Crypto"),
        ])
    }

    /// Multi-line human-readable report
    pub fn report(&self) -> String {
        let mut out = String::from("Market Report:");
        for m in &self.entries {
            out.push_str(&format!(
                "\n- {}: {:.2} (volatility {:.0}%, {})",
                m.symbol,
                m.index,
                m.volatility * 100.0,
                m.sector
            ));
        }
        out
    }
}

/// Serialized as an object keyed by symbol, in catalog order
impl Serialize for MarketCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|m| (m.symbol.as_str(), m)))
    }
}
