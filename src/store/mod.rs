//! Currency store module
//!
//! In-memory, insertion-ordered collection of currency records.
//! The store performs no uniqueness checks itself; callers verify with
//! `lookup` before `insert` while holding exclusive access.

mod record;
mod seed;

pub use record::CurrencyRecord;
pub use seed::SeedError;

use std::path::Path;

/// Ordered collection of currency records
#[derive(Debug, Clone, Default)]
pub struct CurrencyStore {
    records: Vec<CurrencyRecord>,
}

impl CurrencyStore {
    /// Create a store holding the builtin USD/EUR seed
    pub fn seeded() -> Self {
        Self::from_records(seed::builtin())
    }

    /// Create a store from a TOML seed file
    pub fn from_seed_file(path: &Path) -> Result<Self, SeedError> {
        seed::load_file(path).map(Self::from_records)
    }

    pub const fn from_records(records: Vec<CurrencyRecord>) -> Self {
        Self { records }
    }

    /// Find a record by exact id
    pub fn lookup(&self, id: &str) -> Option<&CurrencyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Append a record to the end of the collection
    pub fn insert(&mut self, record: CurrencyRecord) {
        self.records.push(record);
    }

    /// All records in insertion order
    pub fn list(&self) -> &[CurrencyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_seeded() {
        let store = CurrencyStore::seeded();
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("EUR").map(|r| r.symbol.as_str()), Some("€"));
        assert!(store.lookup("usd").is_none(), "lookup is case-sensitive");
        assert!(store.lookup("XYZ").is_none());
    }

    #[test]
    fn test_insert_appends() {
        let mut store = CurrencyStore::seeded();
        store.insert(CurrencyRecord::new("GBP", "Pound", "£", 1.17, "UK"));

        let ids: Vec<&str> = store.list().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["USD", "EUR", "GBP"]);
    }

    #[test]
    fn test_empty_store() {
        let store = CurrencyStore::default();
        assert!(store.is_empty());
        assert!(store.lookup("USD").is_none());
    }
}
