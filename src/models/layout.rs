use serde::{Deserialize, Serialize};

use super::item::DeckItem;

/// Baseline grid defaults used when a layout omits grid parameters.
pub const DEFAULT_GRID_COLS: f64 = 12.0;
pub const DEFAULT_ROW_HEIGHT_PX: f64 = 30.0;
pub const DEFAULT_MARGIN_PX: f64 = 10.0;

/// Grid parameters of a layout: column count, row height, and margins, all in
/// the screen grid's base units (px). Missing values default to the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridParams {
    #[serde(default = "default_cols")]
    pub cols: f64,
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    /// `[horizontal, vertical]` margin pair.
    #[serde(default = "default_margin")]
    pub margin: [f64; 2],
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cols: DEFAULT_GRID_COLS,
            row_height: DEFAULT_ROW_HEIGHT_PX,
            margin: [DEFAULT_MARGIN_PX, DEFAULT_MARGIN_PX],
        }
    }
}

fn default_cols() -> f64 {
    DEFAULT_GRID_COLS
}

fn default_row_height() -> f64 {
    DEFAULT_ROW_HEIGHT_PX
}

fn default_margin() -> [f64; 2] {
    [DEFAULT_MARGIN_PX, DEFAULT_MARGIN_PX]
}

/// A named, reusable declaration of a grid plus a default item set.
/// Immutable once loaded; the same template may back multiple slides, so
/// composition always clones before applying per-slide changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTemplate {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub grid: GridParams,
    /// `Some(false)` opts the layout out of auto-header synthesis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_header: Option<bool>,
    /// Explicit header band, rendered at its own declared grid position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<DeckItem>,
    #[serde(default)]
    pub items: Vec<DeckItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_grid_defaults_to_baseline() {
        let layout: LayoutTemplate =
            serde_json::from_str(r#"{ "description": "minimal", "items": [] }"#).unwrap();
        assert_eq!(layout.grid.cols, 12.0);
        assert_eq!(layout.grid.row_height, 30.0);
        assert_eq!(layout.grid.margin, [10.0, 10.0]);
        assert_eq!(layout.auto_header, None);
    }

    #[test]
    fn partial_grid_fills_missing_fields() {
        let layout: LayoutTemplate =
            serde_json::from_str(r#"{ "grid": { "cols": 10 }, "items": [] }"#).unwrap();
        assert_eq!(layout.grid.cols, 10.0);
        assert_eq!(layout.grid.row_height, 30.0);
    }
}
