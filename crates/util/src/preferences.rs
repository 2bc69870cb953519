//! User preference persistence for the Visadesk TUI.
//!
//! This module provides a tiny JSON-backed store that records lightweight
//! configuration such as the user's preferred theme and how many location
//! suggestions to show. The file is written to the standard configuration
//! directory (`~/.config/visadesk/preferences.json` on most platforms) and is
//! safe to read/write from multiple threads thanks to the internal `Mutex`.
//! Timesheets and documents are never written here.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::expand_tilde;

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "VISADESK_PREFERENCES_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Canonical identifier of the theme selected via the TUI.
    pub preferred_theme: Option<String>,
    /// Maximum number of suggestions shown by the location field.
    #[serde(default)]
    pub location_result_limit: Option<usize>,
}

/// Thread-safe preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: Mutex<PreferencesPayload>,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Create a store at the default path, honoring `VISADESK_PREFERENCES_PATH`.
    pub fn new() -> Result<Self, PreferencesError> {
        Self::at_path(default_preferences_path())
    }

    /// Create a store backed by the provided file.
    pub fn at_path(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let resolved_path = path.into();
        let payload = load_payload(&resolved_path)?;
        Ok(Self {
            path: resolved_path,
            payload: Mutex::new(payload),
            persist_to_disk: true,
        })
    }

    /// Loads the default store, falling back to an ephemeral one on failure.
    pub fn load_or_ephemeral() -> Self {
        Self::new().unwrap_or_else(|error| {
            warn!(error = %error, "Failed to load preferences; continuing with in-memory defaults");
            Self::ephemeral()
        })
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the canonical identifier of the preferred theme, if one was saved.
    pub fn preferred_theme(&self) -> Option<String> {
        self.payload.lock().expect("preferences lock poisoned").preferred_theme.clone()
    }

    /// Persist a new preferred theme identifier.
    pub fn set_preferred_theme(&self, theme_id: Option<String>) -> Result<(), PreferencesError> {
        self.update(|payload| payload.preferred_theme = theme_id)
    }

    /// Returns the saved suggestion limit for the location field.
    pub fn location_result_limit(&self) -> Option<usize> {
        self.payload.lock().expect("preferences lock poisoned").location_result_limit
    }

    /// Persist the suggestion limit for the location field.
    pub fn set_location_result_limit(&self, limit: Option<usize>) -> Result<(), PreferencesError> {
        self.update(|payload| payload.location_result_limit = limit)
    }

    /// Build an in-memory store used as a fallback when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: Mutex::new(PreferencesPayload::default()),
            persist_to_disk: false,
        }
    }

    fn update(&self, apply: impl FnOnce(&mut PreferencesPayload)) -> Result<(), PreferencesError> {
        let mut payload = self.payload.lock().expect("preferences lock poisoned");
        apply(&mut payload);
        if self.persist_to_disk {
            self.save_locked(&payload)?;
        }
        Ok(())
    }

    fn save_locked(&self, payload: &PreferencesPayload) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn default_preferences_path() -> PathBuf {
    if let Ok(path) = env::var(PREFERENCES_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("visadesk")
        .join(PREFERENCES_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse preferences file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let preferences = UserPreferences::at_path(dir.path().join("preferences.json")).expect("load");
        assert_eq!(preferences.preferred_theme(), None);
        assert_eq!(preferences.location_result_limit(), None);
    }

    #[test]
    fn values_round_trip_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("preferences.json");
        let preferences = UserPreferences::at_path(&path).expect("load");
        preferences.set_preferred_theme(Some("nord".into())).expect("save theme");
        preferences.set_location_result_limit(Some(5)).expect("save limit");

        let reloaded = UserPreferences::at_path(&path).expect("reload");
        assert_eq!(reloaded.preferred_theme().as_deref(), Some("nord"));
        assert_eq!(reloaded.location_result_limit(), Some(5));
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").expect("write");
        let preferences = UserPreferences::at_path(&path).expect("load");
        assert_eq!(preferences.preferred_theme(), None);
    }

    #[test]
    fn env_override_selects_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.json");
        temp_env::with_var(PREFERENCES_PATH_ENV, Some(path.to_string_lossy().as_ref()), || {
            let preferences = UserPreferences::new().expect("load");
            assert_eq!(preferences.path(), path.as_path());
        });
    }

    #[test]
    fn ephemeral_store_does_not_touch_disk() {
        let preferences = UserPreferences::ephemeral();
        preferences.set_preferred_theme(Some("dracula".into())).expect("set");
        assert_eq!(preferences.preferred_theme().as_deref(), Some("dracula"));
        assert_eq!(preferences.path(), Path::new(""));
    }
}
