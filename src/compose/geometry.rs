//! Grid-to-geometry mapping for the fixed-size presentation surface.
//!
//! Grid units are abstract column/row coordinates; this module converts them
//! into inch-based absolute boxes on a 16:9 slide. The screen target maps the
//! same grid units onto CSS grid lines instead (see [`crate::render::html`]).

use serde::Serialize;

use crate::models::layout::{DEFAULT_MARGIN_PX, DEFAULT_ROW_HEIGHT_PX};
use crate::models::{GridParams, GridRect};

/// Fixed presentation surface size: a 16:9 slide.
pub const SLIDE_WIDTH_IN: f64 = 10.0;
pub const SLIDE_HEIGHT_IN: f64 = 5.625;

/// One grid row at the baseline row height maps to this many inches.
pub const BASE_ROW_HEIGHT_IN: f64 = 0.45;

/// Smallest height a mapped box may have. Prevents zero or negative boxes
/// when padding exceeds a very small row span.
pub const MIN_ITEM_HEIGHT_IN: f64 = 0.1;

const BASE_X_PAD_IN: f64 = 0.15;
const BASE_W_PAD_IN: f64 = 0.25;
const BASE_Y_PAD_IN: f64 = 0.25;
const BASE_H_PAD_IN: f64 = 0.15;

/// A rectangle on the presentation surface, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InchRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl InchRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// A copy inset by the given horizontal and vertical amounts on each side.
    pub fn inset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            w: (self.w - 2.0 * dx).max(0.0),
            h: (self.h - 2.0 * dy).max(0.0),
        }
    }
}

/// Scale factors derived from one layout's grid parameters.
///
/// The mapping itself is pure: identical inputs always produce identical
/// outputs. This struct only caches the derived factors for a slide so they
/// are not recomputed per item; it is recomputed whenever the active layout
/// changes and is always passed explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMapping {
    cols: f64,
    row_height_in: f64,
    x_pad: f64,
    w_pad: f64,
    y_pad: f64,
    h_pad: f64,
}

impl GridMapping {
    /// Derives the mapping from a layout's grid parameters.
    ///
    /// Row height scales proportionally with the layout's configured row
    /// height relative to the baseline, and padding scales with the layout's
    /// configured margin relative to the baseline margin, so layout authors
    /// tune visual density without per-layout constants here.
    pub fn new(grid: &GridParams) -> Self {
        let cols = if grid.cols > 0.0 { grid.cols } else { 12.0 };
        let row_scale = grid.row_height / DEFAULT_ROW_HEIGHT_PX;
        let scale_x = grid.margin[0] / DEFAULT_MARGIN_PX;
        let scale_y = grid.margin[1] / DEFAULT_MARGIN_PX;

        Self {
            cols,
            row_height_in: BASE_ROW_HEIGHT_IN * row_scale,
            x_pad: BASE_X_PAD_IN * scale_x,
            w_pad: BASE_W_PAD_IN * scale_x,
            y_pad: BASE_Y_PAD_IN * scale_y,
            h_pad: BASE_H_PAD_IN * scale_y,
        }
    }

    pub fn cols(&self) -> f64 {
        self.cols
    }

    /// Maps a grid-unit rectangle into an inch rectangle on the slide.
    pub fn map(&self, rect: &GridRect) -> InchRect {
        let x = (rect.x / self.cols) * SLIDE_WIDTH_IN + self.x_pad;
        let w = ((rect.w / self.cols) * SLIDE_WIDTH_IN - self.w_pad).max(0.0);
        let y = rect.y * self.row_height_in + self.y_pad;
        let h = (rect.h * self.row_height_in - self.h_pad).max(MIN_ITEM_HEIGHT_IN);
        InchRect::new(x, y, w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cols: f64, row_height: f64, margin: [f64; 2]) -> GridParams {
        GridParams {
            cols,
            row_height,
            margin,
        }
    }

    #[test]
    fn horizontal_mapping_is_proportional_to_cols() {
        let mapping12 = GridMapping::new(&grid(12.0, 30.0, [10.0, 10.0]));
        let mapping24 = GridMapping::new(&grid(24.0, 30.0, [10.0, 10.0]));

        let narrow = mapping12.map(&GridRect::new(3.0, 0.0, 3.0, 4.0));
        let doubled = mapping24.map(&GridRect::new(6.0, 0.0, 6.0, 4.0));

        assert!((narrow.x - doubled.x).abs() < 1e-9);
        assert!((narrow.w - doubled.w).abs() < 1e-9);
    }

    #[test]
    fn full_width_item_spans_the_slide_minus_padding() {
        let mapping = GridMapping::new(&GridParams::default());
        let rect = mapping.map(&GridRect::new(0.0, 0.0, 12.0, 4.0));
        assert!((rect.x - 0.15).abs() < 1e-9);
        assert!((rect.w - (SLIDE_WIDTH_IN - 0.25)).abs() < 1e-9);
    }

    #[test]
    fn tiny_row_span_clamps_to_minimum_height() {
        let mapping = GridMapping::new(&GridParams::default());
        // 0.2 rows * 0.45in = 0.09in, minus 0.15in padding would go negative.
        let rect = mapping.map(&GridRect::new(0.0, 0.0, 4.0, 0.2));
        assert_eq!(rect.h, MIN_ITEM_HEIGHT_IN);
    }

    #[test]
    fn row_height_and_margin_scale_relative_to_baseline() {
        let dense = GridMapping::new(&grid(12.0, 15.0, [20.0, 20.0]));
        let rect = dense.map(&GridRect::new(0.0, 2.0, 6.0, 4.0));
        // Half row height: 2 rows * 0.225in; doubled margin: y pad 0.5in.
        assert!((rect.y - (2.0 * 0.225 + 0.5)).abs() < 1e-9);
        // 4 rows * 0.225in minus doubled h pad 0.3in.
        assert!((rect.h - (4.0 * 0.225 - 0.3)).abs() < 1e-9);
    }

    #[test]
    fn identical_inputs_produce_identical_outputs() {
        let mapping = GridMapping::new(&GridParams::default());
        let rect = GridRect::new(2.0, 3.0, 5.0, 4.0);
        assert_eq!(mapping.map(&rect), mapping.map(&rect));
    }
}
