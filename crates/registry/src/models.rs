//! The location reference table.

use std::{collections::HashSet, sync::Arc};

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::debug;
use visadesk_types::Location;

use crate::search::search_locations;

/// Reference table compiled into the binary.
const EMBEDDED_LOCATIONS: &str = include_str!("../data/locations.json");

static EMBEDDED: OnceCell<Arc<[Location]>> = OnceCell::new();

/// Errors raised while loading a reference table.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("location table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate location {city}, {state_code}")]
    Duplicate { city: String, state_code: String },
    #[error("location at position {0} has an empty city or state code")]
    Incomplete(usize),
}

/// Immutable, shareable set of city/state records in table order.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    locations: Arc<[Location]>,
}

impl LocationRegistry {
    /// Loads the embedded reference table. Parsing happens once per process.
    pub fn from_embedded() -> Result<Self, RegistryError> {
        let locations = EMBEDDED
            .get_or_try_init(|| {
                let parsed = parse_locations(EMBEDDED_LOCATIONS)?;
                debug!(count = parsed.len(), "Loaded embedded location table");
                Ok::<_, RegistryError>(Arc::from(parsed))
            })?
            .clone();
        Ok(Self { locations })
    }

    /// Builds a registry from caller-provided records, enforcing the
    /// `(city, state_code)` uniqueness key.
    pub fn from_locations(locations: Vec<Location>) -> Result<Self, RegistryError> {
        validate(&locations)?;
        Ok(Self {
            locations: Arc::from(locations),
        })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Finds the record whose canonical label equals `label`.
    pub fn find_by_label(&self, label: &str) -> Option<&Location> {
        let label = label.trim();
        self.locations.iter().find(|location| location.label().eq_ignore_ascii_case(label))
    }

    /// Ranked, deterministic search over city names. See [`search_locations`].
    pub fn search(&self, query: &str, limit: usize) -> Vec<Location> {
        search_locations(&self.locations, query, limit)
    }
}

fn parse_locations(json: &str) -> Result<Vec<Location>, RegistryError> {
    let locations: Vec<Location> = serde_json::from_str(json)?;
    validate(&locations)?;
    Ok(locations)
}

fn validate(locations: &[Location]) -> Result<(), RegistryError> {
    let mut seen = HashSet::with_capacity(locations.len());
    for (index, location) in locations.iter().enumerate() {
        if location.city.trim().is_empty() || location.state_code.trim().is_empty() {
            return Err(RegistryError::Incomplete(index));
        }
        if !seen.insert(location.key()) {
            return Err(RegistryError::Duplicate {
                city: location.city.clone(),
                state_code: location.state_code.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_rejected() {
        let error = LocationRegistry::from_locations(vec![
            Location::new("Portland", "Oregon", "OR"),
            Location::new("Portland", "Maine", "ME"),
            Location::new("Portland", "Oregon", "OR"),
        ])
        .expect_err("duplicate key");
        assert!(matches!(error, RegistryError::Duplicate { ref state_code, .. } if state_code == "OR"));
    }

    #[test]
    fn incomplete_rows_are_rejected() {
        let error = LocationRegistry::from_locations(vec![Location::new(" ", "Texas", "TX")]).expect_err("blank city");
        assert!(matches!(error, RegistryError::Incomplete(0)));
    }

    #[test]
    fn find_by_label_is_case_insensitive() {
        let registry = LocationRegistry::from_embedded().expect("embedded table");
        let location = registry.find_by_label("san jose, ca").expect("San Jose exists");
        assert_eq!(location.state, "California");
        assert!(registry.find_by_label("Atlantis, ZZ").is_none());
    }
}
