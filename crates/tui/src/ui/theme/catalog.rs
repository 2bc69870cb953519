use ratatui::style::Color;

use super::{DraculaTheme, NordTheme, Theme};

/// Describes a selectable theme inside the TUI.
#[derive(Clone, Copy, Debug)]
pub struct ThemeDefinition {
    /// Canonical identifier used for persistence.
    pub id: &'static str,
    /// Human-friendly display name.
    pub label: &'static str,
    /// Accent shown next to the label in the status line.
    pub accent: Color,
    /// Theme aliases (e.g., env overrides) that map back to this definition.
    pub aliases: &'static [&'static str],
    factory: fn() -> Box<dyn Theme>,
}

impl ThemeDefinition {
    /// Instantiate the theme represented by this definition.
    pub fn build(&self) -> Box<dyn Theme> {
        (self.factory)()
    }
}

/// Ordered list of selectable themes; the first entry is the default.
pub const THEME_DEFINITIONS: &[ThemeDefinition] = &[
    ThemeDefinition {
        id: "dracula",
        label: "Dracula",
        accent: Color::Rgb(0xFF, 0x79, 0xC6),
        aliases: &["dracula", "default"],
        factory: || Box::new(DraculaTheme::new()),
    },
    ThemeDefinition {
        id: "nord",
        label: "Nord",
        accent: Color::Rgb(0x88, 0xC0, 0xD0),
        aliases: &["nord", "polar"],
        factory: || Box::new(NordTheme::new()),
    },
];

/// Resolves an identifier or alias, ignoring case.
pub fn resolve(name: &str) -> Option<&'static ThemeDefinition> {
    let needle = name.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return None;
    }
    THEME_DEFINITIONS
        .iter()
        .find(|definition| definition.id == needle || definition.aliases.contains(&needle.as_str()))
}

pub fn default_definition() -> &'static ThemeDefinition {
    &THEME_DEFINITIONS[0]
}

/// Definition following `current` in the catalog, wrapping around.
pub fn next_after(current: &str) -> &'static ThemeDefinition {
    let index = THEME_DEFINITIONS
        .iter()
        .position(|definition| definition.id == current)
        .map(|index| (index + 1) % THEME_DEFINITIONS.len())
        .unwrap_or_default();
    &THEME_DEFINITIONS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_aliases_case_insensitively() {
        assert_eq!(resolve("NORD").map(|d| d.id), Some("nord"));
        assert_eq!(resolve(" polar ").map(|d| d.id), Some("nord"));
        assert_eq!(resolve("default").map(|d| d.id), Some("dracula"));
        assert!(resolve("solarized").is_none());
        assert!(resolve("").is_none());
    }

    #[test]
    fn next_after_wraps() {
        assert_eq!(next_after("dracula").id, "nord");
        assert_eq!(next_after("nord").id, "dracula");
        assert_eq!(next_after("unknown").id, "dracula");
    }
}
