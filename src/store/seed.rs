// Seed data module
// Builtin currencies and optional TOML seed file loading

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::record::CurrencyRecord;

/// Errors raised while loading a seed file
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("seed record '{0}' has missing or empty fields")]
    InvalidRecord(String),
    #[error("seed record '{0}' is defined more than once")]
    DuplicateId(String),
}

/// On-disk layout: a list of `[[currencies]]` tables
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    currencies: Vec<CurrencyRecord>,
}

/// The records every fresh store starts with
pub fn builtin() -> Vec<CurrencyRecord> {
    vec![
        CurrencyRecord::new(
            "USD",
            "United States Dollar",
            "$",
            1.0,
            "The primary currency of the United States and many other countries.",
        ),
        CurrencyRecord::new(
            "EUR",
            "Euro",
            "€",
            0.85,
            "The official currency of many European countries.",
        ),
    ]
}

/// Load seed records from a TOML file
pub fn load_file(path: &Path) -> Result<Vec<CurrencyRecord>, SeedError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: display.clone(),
        source,
    })?;
    parse(&content).map_err(|err| match err {
        SeedError::Parse { source, .. } => SeedError::Parse {
            path: display,
            source,
        },
        other => other,
    })
}

/// Parse and validate seed content
fn parse(content: &str) -> Result<Vec<CurrencyRecord>, SeedError> {
    let file: SeedFile = toml::from_str(content).map_err(|source| SeedError::Parse {
        path: String::new(),
        source,
    })?;

    let mut records: Vec<CurrencyRecord> = Vec::with_capacity(file.currencies.len());
    for record in file.currencies {
        if !record.is_complete() {
            return Err(SeedError::InvalidRecord(record.id));
        }
        if records.iter().any(|r| r.id == record.id) {
            return Err(SeedError::DuplicateId(record.id));
        }
        records.push(record);
    }
    Ok(records)
}
