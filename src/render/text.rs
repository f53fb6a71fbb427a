//! Shared text resolution: semantic size tokens, color validation, and
//! rich-text segment conversion. Used by both render targets.

use crate::models::{RichTextRole, RichTextVariant, TextContent, Theme};
use crate::render::TextRun;

/// Built-in point sizes used when theme typography omits a token.
pub fn fallback_font_size(token: &str) -> f64 {
    match token {
        "xs" => 9.0,
        "sm" => 11.0,
        "base" => 12.0,
        "lg" => 14.0,
        "xl" => 16.0,
        "2xl" => 18.0,
        "3xl" => 22.0,
        "4xl" => 26.0,
        "5xl" => 32.0,
        _ => 12.0,
    }
}

/// Resolves a semantic size token: theme typography first, built-in table
/// second.
pub fn resolve_font_size(theme: &Theme, token: &str) -> f64 {
    theme
        .font_size(token)
        .unwrap_or_else(|| fallback_font_size(token))
}

/// Size resolution for rich-text items, where the prose role nudges the
/// resolved size upward. The fallback table here is intentionally different
/// from the plain-text one: rich text reads as prose, not labels.
pub fn rich_text_font_size(theme: &Theme, token: &str, role: RichTextRole) -> f64 {
    if let Some(size) = theme.font_size(token) {
        return match role {
            RichTextRole::Header => (size + 4.0).max(18.0),
            RichTextRole::Subheader => (size + 2.0).max(16.0),
            RichTextRole::Lead => (size + 2.0).max(18.0),
            _ => size,
        };
    }

    let base = match token {
        "sm" => 12.0,
        "base" => 14.0,
        "lg" => 18.0,
        "xl" => 20.0,
        "2xl" => 24.0,
        _ => 14.0,
    };
    match role {
        RichTextRole::Header => base + 4.0,
        RichTextRole::Subheader | RichTextRole::Lead => base + 2.0,
        _ => base,
    }
}

/// Resolves the color of a rich-text item from its variant.
pub fn rich_text_color(theme: &Theme, variant: RichTextVariant) -> String {
    match variant {
        RichTextVariant::Muted => theme.colors.muted.clone(),
        RichTextVariant::Accent => theme.colors.primary.clone(),
        _ => theme.colors.foreground.clone(),
    }
}

const NAMED_COLORS: [&str; 9] = [
    "black", "white", "red", "green", "blue", "yellow", "purple", "orange", "gray",
];

/// Validates an explicit color override: `#RGB`/`#RRGGBB` hex or one of a
/// small named set. Invalid values fall back to the theme default by
/// returning `None`.
pub fn validate_color(color: Option<&str>) -> Option<String> {
    let color = color?;
    if let Some(hex) = color.strip_prefix('#') {
        if (hex.len() == 3 || hex.len() == 6) && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Some(color.to_string());
        }
        return None;
    }
    let lower = color.to_ascii_lowercase();
    NAMED_COLORS.contains(&lower.as_str()).then_some(lower)
}

/// Letter-spacing token to additional character spacing in points.
pub fn letter_spacing_pt(token: Option<&str>) -> Option<f64> {
    match token? {
        "tight" => Some(-0.5),
        "wide" => Some(0.5),
        "wider" => Some(1.0),
        _ => Some(0.0),
    }
}

/// Line-height token to a line spacing multiplier.
pub fn line_spacing(token: Option<&str>) -> Option<f64> {
    let value = match token? {
        "none" => 1.0,
        "tight" => 1.25,
        "snug" => 1.375,
        "relaxed" => 1.625,
        "loose" => 2.0,
        _ => 1.5,
    };
    Some(value)
}

/// Converts a text payload into surface runs. Per-segment formatting wins
/// over the box-level defaults; invalid segment colors are dropped so the
/// box color applies.
pub fn content_to_runs(content: &TextContent) -> Vec<TextRun> {
    match content {
        TextContent::Plain(text) => vec![TextRun::plain(text.clone())],
        TextContent::Rich(segments) => segments
            .iter()
            .map(|segment| {
                let formatting = segment.formatting.clone().unwrap_or_default();
                TextRun {
                    text: segment.text.clone(),
                    bold: formatting.bold,
                    italic: formatting.italic,
                    underline: formatting.underline,
                    color: validate_color(formatting.color.as_deref()),
                    font_size: formatting.font_size,
                }
            })
            .collect(),
    }
}

/// Compact human formatting for large metric values: `1.2K`, `3.4M`, `1.0B`.
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::registry;

    #[test]
    fn theme_size_wins_over_fallback() {
        let theme = registry().theme("metallic-earth").unwrap();
        assert_eq!(resolve_font_size(theme, "3xl"), 22.0);
        assert_eq!(resolve_font_size(theme, "not-a-token"), 12.0);
    }

    #[test]
    fn rich_text_sizes_respect_role_minimums() {
        let theme = registry().theme("metallic-earth").unwrap();
        // base = 12pt in the theme; header floor is 18pt.
        assert_eq!(
            rich_text_font_size(theme, "base", RichTextRole::Header),
            18.0
        );
        assert_eq!(
            rich_text_font_size(theme, "3xl", RichTextRole::Header),
            26.0
        );
    }

    #[test]
    fn color_validation() {
        assert_eq!(validate_color(Some("#C9A227")), Some("#C9A227".to_string()));
        assert_eq!(validate_color(Some("#abc")), Some("#abc".to_string()));
        assert_eq!(validate_color(Some("RED")), Some("red".to_string()));
        assert_eq!(validate_color(Some("#12345")), None);
        assert_eq!(validate_color(Some("chartreuse-ish")), None);
        assert_eq!(validate_color(None), None);
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(950.0), "950");
        assert_eq!(format_number(1250.0), "1.3K");
        assert_eq!(format_number(2_500_000.0), "2.5M");
        assert_eq!(format_number(4.7), "4.7");
    }
}
