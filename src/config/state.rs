// Application state module
// Shared configuration plus the currency dispatcher

use std::path::Path;

use super::types::Config;
use crate::handler::Dispatcher;
use crate::logger;
use crate::store::{CurrencyStore, SeedError};

/// Application state
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Create `AppState`, seeding the store from `store.seed_file` when set
    pub fn new(config: &Config) -> Result<Self, SeedError> {
        let store = match config.store.seed_file.as_deref() {
            Some(path) => CurrencyStore::from_seed_file(Path::new(path))?,
            None => CurrencyStore::seeded(),
        };
        if store.is_empty() {
            logger::log_warning("Currency store starts empty");
        }
        Ok(Self::with_store(config.clone(), store))
    }

    /// Create `AppState` around an existing store
    pub const fn with_store(config: Config, store: CurrencyStore) -> Self {
        Self {
            config,
            dispatcher: Dispatcher::new(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_config() -> Config {
        Config::load_from("nonexistent-test-config").unwrap()
    }

    #[test]
    fn test_default_seed() {
        let state = AppState::new(&base_config()).unwrap();
        assert_eq!(state.dispatcher.len(), 2);
    }

    #[test]
    fn test_seed_file_replaces_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[currencies]]\nid = \"SEK\"\nname = \"Swedish Krona\"\nsymbol = \"kr\"\nrate = 0.09\ndescription = \"The currency of Sweden.\""
        )
        .unwrap();

        let mut config = base_config();
        config.store.seed_file = Some(file.path().display().to_string());
        let state = AppState::new(&config).unwrap();

        let ids: Vec<String> = state.dispatcher.snapshot().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["SEK".to_string()]);
    }

    #[test]
    fn test_missing_seed_file_fails() {
        let mut config = base_config();
        config.store.seed_file = Some("/nonexistent/seed.toml".to_string());
        assert!(AppState::new(&config).is_err());
    }
}
