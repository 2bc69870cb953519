use std::fmt;

use serde::{Deserialize, Serialize};

/// A city/state pair drawn from the static reference table.
///
/// Records are immutable once loaded; `(city, state_code)` identifies a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// City name as displayed (e.g., "San Jose")
    pub city: String,
    /// Full state name (e.g., "California")
    pub state: String,
    /// Two-letter postal code (e.g., "CA")
    #[serde(rename = "stateCode")]
    pub state_code: String,
}

impl Location {
    pub fn new(city: impl Into<String>, state: impl Into<String>, state_code: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
            state_code: state_code.into(),
        }
    }

    /// Canonical "City, ST" label committed when the location is selected.
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.state_code)
    }

    /// Uniqueness key of the record.
    pub fn key(&self) -> (&str, &str) {
        (self.city.as_str(), self.state_code.as_str())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.state_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_state_code() {
        let location = Location::new("Austin", "Texas", "TX");
        assert_eq!(location.label(), "Austin, TX");
        assert_eq!(location.to_string(), location.label());
        assert_eq!(location.key(), ("Austin", "TX"));
    }

    #[test]
    fn deserializes_camel_case_state_code() {
        let json = r#"{ "city": "Boston", "state": "Massachusetts", "stateCode": "MA" }"#;
        let location: Location = serde_json::from_str(json).expect("deserialize Location");
        assert_eq!(location.state_code, "MA");
    }
}
