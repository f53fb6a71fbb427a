use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    /// The CSS `text-align` keyword for this alignment.
    pub fn as_css(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "justify",
        }
    }

    /// The DrawingML paragraph alignment code (`a:pPr algn`).
    pub fn as_drawingml(&self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
            Align::Justify => "just",
        }
    }
}

/// Vertical anchoring inside a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VAlign {
    /// The DrawingML body anchor code (`a:bodyPr anchor`).
    pub fn as_drawingml(&self) -> &'static str {
        match self {
            VAlign::Top => "t",
            VAlign::Middle => "ctr",
            VAlign::Bottom => "b",
        }
    }
}

/// A rectangle in abstract grid units (column/row offsets and spans).
/// Grid units carry no physical size; each render target maps them through
/// its own geometry (CSS grid lines for the screen, inches for slides).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl GridRect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Inline formatting overrides carried by a single rich-text segment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFormatting {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    /// Hex color override (e.g. `#C9A227`).
    pub color: Option<String>,
    /// Explicit font size in points.
    pub font_size: Option<f64>,
}

/// One run of a rich-text value, with optional inline formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    #[serde(default)]
    pub formatting: Option<TextFormatting>,
}

/// Text payload that is either a plain string or an ordered list of styled
/// segments. Callers that only need a string can use [`TextContent::flatten`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    Plain(String),
    Rich(Vec<TextSegment>),
}

impl Default for TextContent {
    fn default() -> Self {
        TextContent::Plain(String::new())
    }
}

impl TextContent {
    pub fn is_empty(&self) -> bool {
        match self {
            TextContent::Plain(s) => s.is_empty(),
            TextContent::Rich(segments) => segments.iter().all(|s| s.text.is_empty()),
        }
    }

    /// Concatenates all runs into a single unstyled string.
    pub fn flatten(&self) -> String {
        match self {
            TextContent::Plain(s) => s.clone(),
            TextContent::Rich(segments) => {
                segments.iter().map(|s| s.text.as_str()).collect::<String>()
            }
        }
    }
}

impl From<&str> for TextContent {
    fn from(value: &str) -> Self {
        TextContent::Plain(value.to_string())
    }
}
