//! Loader for the JSON fixtures under `crates/testkit/fixtures`.

use cinema_tickets_domain::TicketCounts;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::{fmt, fs};

/// Errors raised while loading fixtures.
#[derive(Debug)]
pub enum FixtureError {
    /// Fixture file does not exist.
    MissingFixture {
        /// Path that could not be found.
        path: PathBuf,
    },
    /// Fixture file could not be read.
    FixtureRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Fixture file could not be parsed.
    FixtureParse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFixture { path } => {
                write!(formatter, "missing fixture: {}", path.display())
            },
            Self::FixtureRead { path, source } => {
                write!(formatter, "failed to read fixture {}: {source}", path.display())
            },
            Self::FixtureParse { path, source } => {
                write!(formatter, "failed to parse fixture {}: {source}", path.display())
            },
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FixtureRead { source, .. } => Some(source),
            Self::FixtureParse { source, .. } => Some(source),
            Self::MissingFixture { .. } => None,
        }
    }
}

/// Purchase request as accepted on the CLI `--stdin` channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseFixture {
    /// Raw account identifier.
    pub account_id: i64,
    /// Requested quantity per category.
    pub tickets: TicketCounts,
}

/// Absolute path to the fixture directory.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Absolute path of a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixture_root().join(relative_path)
}

/// Read a fixture file as text.
pub fn read_fixture(relative_path: &str) -> Result<String, FixtureError> {
    let path = fixture_path(relative_path);
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(contents),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            Err(FixtureError::MissingFixture { path })
        },
        Err(error) => Err(FixtureError::FixtureRead {
            path,
            source: error,
        }),
    }
}

/// Read and deserialize a JSON fixture.
pub fn load_json_fixture<T: DeserializeOwned>(relative_path: &str) -> Result<T, FixtureError> {
    let contents = read_fixture(relative_path)?;
    serde_json::from_str(&contents).map_err(|error| FixtureError::FixtureParse {
        path: fixture_path(relative_path),
        source: error,
    })
}

/// Load a purchase request fixture from `requests/<name>.json`.
pub fn purchase_fixture(name: &str) -> Result<PurchaseFixture, FixtureError> {
    load_json_fixture(&format!("requests/{name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_tickets_domain::TicketCategory;

    #[test]
    fn family_fixture_parses_category_keys() {
        let fixture = purchase_fixture("purchase.family").unwrap();
        assert_eq!(fixture.account_id, 42);
        assert_eq!(fixture.tickets.get(&TicketCategory::Adult), Some(&2));
        assert_eq!(fixture.tickets.get(&TicketCategory::Infant), Some(&1));
    }

    #[test]
    fn missing_fixture_is_reported() {
        let error = read_fixture("requests/does-not-exist.json").unwrap_err();
        assert!(matches!(error, FixtureError::MissingFixture { .. }));
    }
}
