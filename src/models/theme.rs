use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Color palette of a theme. All values are hex color strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub foreground: String,
    pub muted: String,
    pub border: String,
}

/// CSS-gradient-like strings used for screen backgrounds. The presentation
/// surface cannot render gradients, so [`Theme::slide_background`] extracts a
/// solid color from them instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Gradients {
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub background: String,
}

/// Font family triple: headings, body copy, and code blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFamily {
    pub heading: String,
    pub body: String,
    pub mono: String,
}

/// Typography scales keyed by semantic token name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: FontFamily,
    /// Point sizes keyed by semantic size (`xs` .. `5xl`).
    #[serde(default)]
    pub font_size: IndexMap<String, f64>,
    /// Multipliers keyed by token (`none` .. `loose`).
    #[serde(default)]
    pub line_height: IndexMap<String, f64>,
    /// CSS letter-spacing values keyed by token (`tight` .. `wider`).
    #[serde(default)]
    pub letter_spacing: IndexMap<String, String>,
}

/// An immutable theme: palette, gradients, and typography tokens.
/// Loaded once from the static registry and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    #[serde(default)]
    pub gradients: Gradients,
    pub typography: Typography,
}

impl Theme {
    /// Resolves a semantic size token through the theme scale.
    /// Returns `None` when the theme omits the token; callers fall back to
    /// the built-in size table.
    pub fn font_size(&self, token: &str) -> Option<f64> {
        self.typography.font_size.get(token).copied()
    }

    /// Solid background color for the fixed-size presentation surface.
    /// Extracts the first hex color stop from the background gradient,
    /// falling back to the palette background when the gradient carries no
    /// parseable stop.
    pub fn slide_background(&self) -> &str {
        if let Some(color) = first_hex_stop(&self.gradients.background) {
            return color;
        }
        &self.colors.background
    }
}

/// Finds the first `#RRGGBB` or `#RGB` token inside a CSS gradient string.
fn first_hex_stop(gradient: &str) -> Option<&str> {
    let bytes = gradient.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        if *byte != b'#' {
            continue;
        }
        let rest = &gradient[index + 1..];
        let hex_len = rest
            .bytes()
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        if hex_len >= 6 {
            return Some(&gradient[index..index + 7]);
        }
        if hex_len >= 3 {
            return Some(&gradient[index..index + 4]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_theme(gradient: &str) -> Theme {
        Theme {
            name: "Sample".to_string(),
            colors: ThemeColors {
                primary: "#1D4ED8".into(),
                secondary: "#1E3A8A".into(),
                accent: "#38BDF8".into(),
                background: "#FFFFFF".into(),
                foreground: "#0F172A".into(),
                muted: "#E2E8F0".into(),
                border: "#CBD5E1".into(),
            },
            gradients: Gradients {
                primary: String::new(),
                background: gradient.to_string(),
            },
            typography: Typography {
                font_family: FontFamily {
                    heading: "Space Grotesk".into(),
                    body: "Inter".into(),
                    mono: "JetBrains Mono".into(),
                },
                font_size: IndexMap::new(),
                line_height: IndexMap::new(),
                letter_spacing: IndexMap::new(),
            },
        }
    }

    #[test]
    fn extracts_first_gradient_stop() {
        let theme = sample_theme("linear-gradient(180deg, #F7F3EC 0%, #E7DED2 100%)");
        assert_eq!(theme.slide_background(), "#F7F3EC");
    }

    #[test]
    fn falls_back_to_palette_background() {
        let theme = sample_theme("radial-gradient(circle, white, gray)");
        assert_eq!(theme.slide_background(), "#FFFFFF");
    }

    #[test]
    fn short_hex_stop_is_accepted() {
        let theme = sample_theme("linear-gradient(90deg, #fff 0%, #eee 100%)");
        assert_eq!(theme.slide_background(), "#fff");
    }
}
