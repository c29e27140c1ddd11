//! Named layout themes and the provider capability used by grid planning.
//!
//! A theme is a [`Layout`] preset: paper/plot background, legend styling, and
//! x/y axis templates (grid and tick colors) kept under the index-1 axis
//! entries. Planning copies the templates onto every concrete axis of a grid.
//!
//! Themes are resolved through the [`ThemeProvider`] trait, passed explicitly
//! into each call; there is no process-wide registry.

use crate::error::{Error, Result};
use crate::models::{AxisId, AxisStyle, Layout};
use serde_json::json;
use std::collections::BTreeMap;

/// Theme used when a caller specifies none.
pub const DEFAULT_THEME: &str = "pearl";

/// Read-only lookup of theme layouts by name.
pub trait ThemeProvider {
    /// Layout preset for `name`, or [`Error::UnknownTheme`].
    fn layout(&self, name: &str) -> Result<Layout>;
}

/// In-memory theme registry with the built-in presets.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Layout>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert("pearl".to_string(), pearl());
        themes.insert("white".to_string(), white());
        themes.insert("solar".to_string(), solar());
        themes.insert("ggplot".to_string(), ggplot());
        Self { themes }
    }
}

impl ThemeRegistry {
    /// Register or replace a theme under `name`.
    pub fn insert(&mut self, name: impl Into<String>, layout: Layout) {
        self.themes.insert(name.into(), layout);
    }

    /// Registered theme names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }
}

impl ThemeProvider for ThemeRegistry {
    fn layout(&self, name: &str) -> Result<Layout> {
        self.themes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownTheme(name.to_string()))
    }
}

/// Assemble a theme layout from its palette.
fn theme_layout(
    paper: &str,
    plot: &str,
    text: &str,
    grid: &str,
    zeroline: &str,
) -> Layout {
    let mut layout = Layout::new();
    layout.set("paper_bgcolor", paper);
    layout.set("plot_bgcolor", plot);
    layout.set("legend", json!({ "bgcolor": paper, "font": { "color": text } }));
    layout.set("titlefont", json!({ "color": text }));

    let mut axis = AxisStyle::default();
    axis.set("showgrid", true);
    axis.set("gridcolor", grid);
    axis.set("zerolinecolor", zeroline);
    axis.set("tickfont", json!({ "color": text }));
    axis.set("titlefont", json!({ "color": text }));

    layout.axes.insert(AxisId::x(1), axis.clone());
    layout.axes.insert(AxisId::y(1), axis);
    layout
}

fn pearl() -> Layout {
    theme_layout("#F5F6F9", "#F5F6F9", "#4D5663", "#E1E5ED", "#E1E5ED")
}

fn white() -> Layout {
    theme_layout("#FFFFFF", "#FFFFFF", "#4D5663", "#E1E5ED", "#E1E5ED")
}

// Solarized-dark palette.
fn solar() -> Layout {
    theme_layout("#002B36", "#002B36", "#839496", "#073642", "#073642")
}

fn ggplot() -> Layout {
    theme_layout("#FFFFFF", "#E5E5E5", "#555555", "#FFFFFF", "#FFFFFF")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_has_builtin_themes() {
        let reg = ThemeRegistry::default();
        assert_eq!(reg.names(), vec!["ggplot", "pearl", "solar", "white"]);
        for name in reg.names() {
            let layout = reg.layout(name).unwrap();
            assert!(layout.get("paper_bgcolor").is_some());
            assert!(layout.axis(AxisId::x(1)).is_some());
            assert!(layout.axis(AxisId::y(1)).is_some());
        }
    }

    #[test]
    fn unknown_theme_is_an_error() {
        let reg = ThemeRegistry::default();
        assert!(matches!(
            reg.layout("neon"),
            Err(Error::UnknownTheme(name)) if name == "neon"
        ));
    }

    #[test]
    fn custom_theme_can_be_registered() {
        let mut reg = ThemeRegistry::default();
        let mut layout = Layout::new();
        layout.set("paper_bgcolor", "#101010");
        reg.insert("midnight", layout);
        let got = reg.layout("midnight").unwrap();
        assert_eq!(got.get("paper_bgcolor"), Some(&json!("#101010")));
    }
}
