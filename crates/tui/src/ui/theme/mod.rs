//! Theme styling module for the TUI UI layer.
//!
//! This module defines the Dracula and Nord palettes, semantic theme roles,
//! and helper builders for Ratatui widgets and styles. Prefer these helpers
//! over hard-coding colors to keep the UI consistent.

use std::env;

use tracing::debug;

pub mod catalog;
pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use catalog::ThemeDefinition;
pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::{Theme, ThemeRoles};

/// Environment variable overriding the persisted theme choice.
pub const THEME_ENV: &str = "TUI_THEME";

/// Theme plus metadata describing how it was selected.
pub struct LoadedTheme {
    pub definition: &'static ThemeDefinition,
    pub theme: Box<dyn Theme>,
}

impl LoadedTheme {
    pub fn from_definition(definition: &'static ThemeDefinition) -> Self {
        Self {
            definition,
            theme: definition.build(),
        }
    }
}

/// Selects a theme from `TUI_THEME`, then the persisted preference, then the default.
pub fn load(preferred_theme: Option<&str>) -> LoadedTheme {
    if let Ok(theme_name) = env::var(THEME_ENV)
        && let Some(definition) = catalog::resolve(theme_name.trim())
    {
        debug!(theme = definition.id, "theme selected from environment");
        return LoadedTheme::from_definition(definition);
    }

    if let Some(name) = preferred_theme
        && let Some(definition) = catalog::resolve(name.trim())
    {
        debug!(theme = definition.id, "theme selected from preferences");
        return LoadedTheme::from_definition(definition);
    }

    LoadedTheme::from_definition(catalog::default_definition())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_beats_preference() {
        temp_env::with_var(THEME_ENV, Some("nord"), || {
            assert_eq!(load(Some("dracula")).definition.id, "nord");
        });
    }

    #[test]
    fn preference_used_without_env() {
        temp_env::with_var_unset(THEME_ENV, || {
            assert_eq!(load(Some("nord")).definition.id, "nord");
            assert_eq!(load(Some("bogus")).definition.id, "dracula");
            assert_eq!(load(None).definition.id, "dracula");
        });
    }
}
