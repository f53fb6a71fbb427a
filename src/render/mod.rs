//! Rendering: item renderers for the two output targets plus the abstract
//! drawing surface the presentation-file renderer emits onto.
//!
//! The screen target ([`html`]) builds a CSS-grid HTML document directly.
//! The presentation target ([`slide`]) maps items to inch geometry and emits
//! draw operations onto a [`Surface`]; the bundled OOXML writer
//! ([`crate::pptx`]) is one such surface. What a surface can natively embed
//! is declared up front in [`SurfaceCaps`]; renderers branch on it instead
//! of probing, and fall back to placeholders for missing capabilities.

pub mod html;
pub mod slide;
pub mod text;

use std::path::Path;

use crate::compose::InchRect;
use crate::models::{Align, ChartData, VAlign};

/// Optional embedding capabilities of an output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceCaps {
    /// Native chart embedding. Without it charts render as placeholder panels
    /// with the same geometry, so slide layout never breaks.
    pub charts: bool,
    /// Native table embedding.
    pub tables: bool,
    /// Image embedding from disk.
    pub images: bool,
}

/// A stroke: color and width in points.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width_pt: f64,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width_pt: f64) -> Self {
        Self {
            color: color.into(),
            width_pt,
        }
    }
}

/// Fill and outline of a drawn shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeStyle {
    pub fill: Option<String>,
    /// Fill opacity in `0.0..=1.0`; `None` means opaque.
    pub fill_alpha: Option<f64>,
    pub line: Option<Stroke>,
}

impl ShapeStyle {
    pub fn filled(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            fill_alpha: None,
            line: None,
        }
    }

    pub fn with_line(mut self, stroke: Stroke) -> Self {
        self.line = Some(stroke);
        self
    }
}

/// Box-level text options. Per-run overrides live on [`TextRun`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub font_size: f64,
    pub color: String,
    pub font_face: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: Align,
    pub valign: VAlign,
    /// Line spacing multiplier.
    pub line_spacing: Option<f64>,
    /// Additional character spacing in points.
    pub char_spacing: Option<f64>,
    pub shadow: bool,
    /// Background fill of the text box itself.
    pub fill: Option<String>,
    pub fill_alpha: Option<f64>,
    pub line: Option<Stroke>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            color: "#000000".to_string(),
            font_face: "Inter".to_string(),
            bold: false,
            italic: false,
            underline: false,
            align: Align::Left,
            valign: VAlign::Middle,
            line_spacing: None,
            char_spacing: None,
            shadow: false,
            fill: None,
            fill_alpha: None,
            line: None,
        }
    }
}

/// One run of text. `None` fields inherit from the box-level [`TextOptions`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: String,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub color: Option<String>,
    pub font_size: Option<f64>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// One cell of a table draw operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub bold: bool,
    pub color: String,
    pub fill: String,
    pub font_face: String,
    pub font_size: f64,
    pub align: Align,
}

/// Theme-derived colors a surface needs to style an embedded chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub series_color: String,
    pub label_color: String,
}

/// An output surface the presentation-target renderers draw onto.
///
/// Coordinates are inches on a fixed 10 × 5.625 in (16:9) slide. Optional
/// operations have no-op defaults; a surface that advertises a capability in
/// [`Surface::caps`] must implement the matching operation.
pub trait Surface {
    fn caps(&self) -> SurfaceCaps;

    /// Starts a new slide with a solid background color.
    fn begin_slide(&mut self, background: &str);

    fn draw_rect(&mut self, rect: &InchRect, style: &ShapeStyle);

    /// Draws a straight line across the rect's top edge (`h` is ignored).
    fn draw_line(&mut self, rect: &InchRect, stroke: &Stroke);

    fn draw_ellipse(&mut self, rect: &InchRect, style: &ShapeStyle);

    fn draw_text(&mut self, runs: &[TextRun], rect: &InchRect, options: &TextOptions);

    /// Embeds an image from disk. Returns `false` when the surface could not
    /// embed it, letting the caller fall back to a placeholder.
    fn draw_image(&mut self, _path: &Path, _rect: &InchRect) -> bool {
        false
    }

    /// Embeds a native chart. Only called when `caps().charts` is set.
    fn draw_chart(&mut self, _chart: &ChartData, _rect: &InchRect, _style: &ChartStyle) {}

    /// Embeds a native table. Only called when `caps().tables` is set.
    fn draw_table(&mut self, _rows: &[Vec<TableCell>], _rect: &InchRect, _border: &Stroke) {}
}
