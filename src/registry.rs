//! Static theme and layout registries.
//!
//! Both registries ship inside the binary (`resources/*.json`), are parsed
//! once on first access, and are never mutated afterwards. Strict lookups
//! return a hard error for unknown names; the lenient variants exist for the
//! legacy batch-rendering path, which warns and substitutes or skips instead
//! (see [`crate::assemble`]).

use std::sync::OnceLock;

use indexmap::IndexMap;
use log::warn;
use serde::Deserialize;

use crate::errors::{DeckError, Result};
use crate::models::{LayoutTemplate, Theme};

const THEMES_JSON: &str = include_str!("../resources/themes.json");
const LAYOUTS_JSON: &str = include_str!("../resources/layouts.json");

#[derive(Deserialize)]
struct ThemesFile {
    themes: IndexMap<String, Theme>,
}

#[derive(Deserialize)]
struct LayoutsFile {
    layouts: IndexMap<String, LayoutTemplate>,
}

/// Keyed lookup tables mapping theme and layout names to their definitions.
pub struct Registry {
    themes: IndexMap<String, Theme>,
    layouts: IndexMap<String, LayoutTemplate>,
}

impl Registry {
    fn load() -> Result<Self> {
        let themes: ThemesFile = serde_json::from_str(THEMES_JSON)?;
        let layouts: LayoutsFile = serde_json::from_str(LAYOUTS_JSON)?;
        Ok(Self {
            themes: themes.themes,
            layouts: layouts.layouts,
        })
    }

    /// Strict theme lookup: unknown names abort slide generation.
    pub fn theme(&self, name: &str) -> Result<&Theme> {
        self.themes
            .get(name)
            .ok_or_else(|| DeckError::ThemeNotFound(name.to_string()))
    }

    /// Strict layout lookup: unknown names abort slide generation.
    pub fn layout(&self, name: &str) -> Result<&LayoutTemplate> {
        self.layouts
            .get(name)
            .ok_or_else(|| DeckError::LayoutNotFound(name.to_string()))
    }

    /// Lenient theme lookup for the legacy batch path: warns and substitutes
    /// the first registered theme when the name is unknown.
    pub fn theme_or_default(&self, name: &str) -> &Theme {
        if let Some(theme) = self.themes.get(name) {
            return theme;
        }
        let (fallback_name, fallback) = self
            .themes
            .first()
            .expect("theme registry is never empty");
        warn!("Theme '{name}' not found, using default theme '{fallback_name}'");
        fallback
    }

    /// Lenient layout lookup for the legacy batch path: warns and returns
    /// `None` so the caller can skip the slide.
    pub fn layout_lenient(&self, name: &str) -> Option<&LayoutTemplate> {
        let layout = self.layouts.get(name);
        if layout.is_none() {
            warn!("Layout '{name}' not found, skipping");
        }
        layout
    }

    /// All theme names with their display names, in declaration order.
    pub fn theme_names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.themes
            .iter()
            .map(|(key, theme)| (key.as_str(), theme.name.as_str()))
    }

    /// All layout names with their descriptions, in declaration order.
    pub fn layout_names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.layouts
            .iter()
            .map(|(key, layout)| (key.as_str(), layout.description.as_str()))
    }
}

/// The process-wide registry, parsed on first access.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| Registry::load().expect("embedded registry resources are valid JSON"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_resources_parse() {
        let registry = registry();
        assert!(registry.theme_names().count() >= 5);
        assert!(registry.layout_names().count() >= 8);
    }

    #[test]
    fn strict_lookup_errors_on_unknown_names() {
        let registry = registry();
        assert!(matches!(
            registry.theme("no-such-theme"),
            Err(DeckError::ThemeNotFound(_))
        ));
        assert!(matches!(
            registry.layout("no-such-layout"),
            Err(DeckError::LayoutNotFound(_))
        ));
    }

    #[test]
    fn lenient_lookup_substitutes_or_skips() {
        let registry = registry();
        let fallback = registry.theme_or_default("no-such-theme");
        assert_eq!(fallback.name, "Metallic Earth");
        assert!(registry.layout_lenient("no-such-layout").is_none());
        assert!(registry.layout_lenient("data-grid-dashboard").is_some());
    }

    #[test]
    fn dashboard_layout_matches_declaration() {
        let layout = registry().layout("data-grid-dashboard").unwrap();
        assert_eq!(layout.items.len(), 4);
        let header = layout.header.as_ref().unwrap();
        assert_eq!(header.rect.w, 12.0);
        let xs: Vec<f64> = layout.items.iter().map(|i| i.rect.x).collect();
        assert_eq!(xs, vec![0.0, 3.0, 6.0, 9.0]);
    }
}
