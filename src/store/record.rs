// Currency record module
// Defines the stored currency entry and the views returned to clients

use serde::{Deserialize, Serialize};

/// A single currency entry
///
/// Field order is the serialization order of `GET /currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRecord {
    /// Unique, case-sensitive identifier (e.g. "USD")
    pub id: String,
    pub name: String,
    pub symbol: String,
    /// Conversion factor relative to the base unit
    pub rate: f64,
    pub description: String,
}

impl CurrencyRecord {
    pub fn new(id: &str, name: &str, symbol: &str, rate: f64, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            rate,
            description: description.to_string(),
        }
    }

    /// Check the insertion rule: every field present and non-falsy.
    ///
    /// A zero (or NaN) rate counts as missing.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty()
            && !self.name.is_empty()
            && !self.symbol.is_empty()
            && self.rate != 0.0
            && !self.rate.is_nan()
            && !self.description.is_empty()
    }

    pub fn summary(&self) -> CurrencySummary<'_> {
        CurrencySummary {
            name: &self.name,
            symbol: &self.symbol,
            description: &self.description,
        }
    }
}

/// `{name, symbol, description}` view of a record
#[derive(Debug, Serialize)]
pub struct CurrencySummary<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub description: &'a str,
}
