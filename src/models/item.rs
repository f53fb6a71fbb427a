//! The deck item model: a grid rectangle plus a discriminated item kind with a
//! type-specific data payload.
//!
//! Items arrive as JSON with a string `type` tag and a free-form `data`
//! object. Deserialization resolves the tag into the [`ItemKind`] sum type so
//! renderer dispatch is an exhaustive `match`; tags we do not recognize (or
//! payloads that fail to parse) collapse into [`ItemKind::Unknown`], which
//! renders as a labeled placeholder instead of failing the whole payload.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Align, GridRect, TextContent};

/// Data for a `text` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextData {
    /// Older payloads used `content` for the same field.
    #[serde(alias = "content")]
    #[serde(default)]
    pub text: TextContent,
    /// Semantic size token resolved through the theme scale (`xs` .. `5xl`).
    #[serde(default = "default_size_base")]
    pub size: String,
    #[serde(default)]
    pub align: Align,
    pub weight: Option<String>,
    pub font_family: Option<String>,
    pub letter_spacing: Option<String>,
    pub line_height: Option<String>,
    #[serde(default)]
    pub text_shadow: bool,
    /// Item-level hex color override for the entire text.
    pub color: Option<String>,
}

/// Prose role for a `rich-text` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RichTextRole {
    #[default]
    Paragraph,
    Header,
    Subheader,
    Lead,
    Blockquote,
}

/// Color treatment for a `rich-text` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RichTextVariant {
    #[default]
    Default,
    Muted,
    Accent,
    Highlight,
}

/// Data for a `rich-text` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextData {
    #[serde(default)]
    pub content: TextContent,
    #[serde(rename = "type", default)]
    pub role: RichTextRole,
    pub size: Option<String>,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub variant: RichTextVariant,
    pub font_family: Option<String>,
    pub letter_spacing: Option<String>,
    pub line_height: Option<String>,
    #[serde(default)]
    pub text_shadow: bool,
}

/// Marker style for a `list` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    #[default]
    Bullet,
    Numbered,
    Checklist,
}

/// Data for a `list` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData {
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(rename = "type", default)]
    pub style: ListStyle,
    pub size: Option<String>,
    pub variant: Option<String>,
    pub icon: Option<String>,
}

/// Visual treatment of a `quote` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteVariant {
    #[default]
    Default,
    Large,
    Minimal,
}

/// Data for a `quote` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    #[serde(default)]
    pub text: String,
    pub author: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    #[serde(default)]
    pub variant: QuoteVariant,
    #[serde(default)]
    pub align: Align,
}

/// Data for a `code` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeData {
    #[serde(default)]
    pub code: String,
    pub language: Option<String>,
    #[serde(default)]
    pub show_line_numbers: bool,
    #[serde(default)]
    pub highlight_lines: Vec<u32>,
    /// `light`, `dark`, or `auto`.
    pub theme: Option<String>,
    pub size: Option<String>,
}

/// Severity of a `note` item; drives the tinted background and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteSeverity {
    #[default]
    Info,
    Warning,
    Success,
    Error,
    Tip,
}

impl NoteSeverity {
    /// The fixed accent color for this severity.
    pub fn accent_hex(&self) -> &'static str {
        match self {
            NoteSeverity::Info => "#3b82f6",
            NoteSeverity::Warning => "#f59e0b",
            NoteSeverity::Success => "#10b981",
            NoteSeverity::Error => "#ef4444",
            NoteSeverity::Tip => "#8b5cf6",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NoteSeverity::Info => "Info",
            NoteSeverity::Warning => "Warning",
            NoteSeverity::Success => "Success",
            NoteSeverity::Error => "Error",
            NoteSeverity::Tip => "Tip",
        }
    }
}

/// Data for a `note` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteData {
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub severity: NoteSeverity,
    pub variant: Option<String>,
    pub size: Option<String>,
}

/// Data for a `header` item (the header band of a slide).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderData {
    #[serde(default)]
    pub title: String,
    pub subtitle: Option<String>,
    /// Defaults to rendering the divider when absent.
    pub show_divider: Option<bool>,
}

/// Data for a `kpi-card` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCardData {
    #[serde(default)]
    pub metric: TextContent,
    #[serde(default)]
    pub label: String,
    pub icon: Option<String>,
    pub trend: Option<String>,
}

/// Data for a `photo-card` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCardData {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    pub caption: Option<String>,
}

/// Chart series type. Passed through to the output surface uninterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Area,
}

/// One category/value pair of a single-series chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

/// Data for a `chart` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    /// Series label shown by surfaces that support it.
    pub label: Option<String>,
    #[serde(default)]
    pub data: Vec<ChartPoint>,
}

/// Data for a `table` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableData {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Data for a `testimonial` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestimonialData {
    #[serde(default)]
    pub quote: TextContent,
    pub author: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
}

/// One event on a `timeline` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Data for a `timeline` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineData {
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

/// Data for a `metric-card` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCardData {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub label: String,
    /// Signed change; the badge is colored by sign.
    pub change: Option<f64>,
    pub change_label: Option<String>,
}

/// Visual variant of a `button` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Outline,
}

/// Data for a `button` item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonData {
    #[serde(default)]
    pub text: TextContent,
    #[serde(default)]
    pub variant: ButtonVariant,
    pub size: Option<String>,
    pub href: Option<String>,
}

/// The discriminated item type with its type-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Text(TextData),
    RichText(RichTextData),
    List(ListData),
    Quote(QuoteData),
    Code(CodeData),
    Note(NoteData),
    Header(HeaderData),
    KpiCard(KpiCardData),
    PhotoCard(PhotoCardData),
    Chart(ChartData),
    Table(TableData),
    Testimonial(TestimonialData),
    Timeline(TimelineData),
    MetricCard(MetricCardData),
    Button(ButtonData),
    /// An unrecognized tag (or an unparsable payload). Rendered as a visible
    /// placeholder labeled with the tag; never an error.
    Unknown { tag: String, data: Value },
}

impl ItemKind {
    /// The wire tag for this kind.
    pub fn tag(&self) -> &str {
        match self {
            ItemKind::Text(_) => "text",
            ItemKind::RichText(_) => "rich-text",
            ItemKind::List(_) => "list",
            ItemKind::Quote(_) => "quote",
            ItemKind::Code(_) => "code",
            ItemKind::Note(_) => "note",
            ItemKind::Header(_) => "header",
            ItemKind::KpiCard(_) => "kpi-card",
            ItemKind::PhotoCard(_) => "photo-card",
            ItemKind::Chart(_) => "chart",
            ItemKind::Table(_) => "table",
            ItemKind::Testimonial(_) => "testimonial",
            ItemKind::Timeline(_) => "timeline",
            ItemKind::MetricCard(_) => "metric-card",
            ItemKind::Button(_) => "button",
            ItemKind::Unknown { tag, .. } => tag,
        }
    }

    pub(crate) fn from_tagged(tag: &str, data: Value) -> ItemKind {
        macro_rules! parse_payload {
            ($variant:ident, $ty:ty) => {
                match serde_json::from_value::<$ty>(data.clone()) {
                    Ok(payload) => ItemKind::$variant(payload),
                    Err(e) => {
                        warn!("Item data for '{tag}' did not match its schema ({e}); rendering as placeholder");
                        ItemKind::Unknown {
                            tag: tag.to_string(),
                            data,
                        }
                    }
                }
            };
        }

        match tag {
            "text" => parse_payload!(Text, TextData),
            "rich-text" => parse_payload!(RichText, RichTextData),
            "list" => parse_payload!(List, ListData),
            "quote" => parse_payload!(Quote, QuoteData),
            "code" => parse_payload!(Code, CodeData),
            "note" => parse_payload!(Note, NoteData),
            "header" => parse_payload!(Header, HeaderData),
            "kpi-card" => parse_payload!(KpiCard, KpiCardData),
            "photo-card" => parse_payload!(PhotoCard, PhotoCardData),
            "chart" => parse_payload!(Chart, ChartData),
            "table" => parse_payload!(Table, TableData),
            "testimonial" => parse_payload!(Testimonial, TestimonialData),
            "timeline" => parse_payload!(Timeline, TimelineData),
            "metric-card" => parse_payload!(MetricCard, MetricCardData),
            "button" => parse_payload!(Button, ButtonData),
            _ => ItemKind::Unknown {
                tag: tag.to_string(),
                data,
            },
        }
    }

    pub(crate) fn to_data_value(&self) -> Value {
        let result = match self {
            ItemKind::Text(d) => serde_json::to_value(d),
            ItemKind::RichText(d) => serde_json::to_value(d),
            ItemKind::List(d) => serde_json::to_value(d),
            ItemKind::Quote(d) => serde_json::to_value(d),
            ItemKind::Code(d) => serde_json::to_value(d),
            ItemKind::Note(d) => serde_json::to_value(d),
            ItemKind::Header(d) => serde_json::to_value(d),
            ItemKind::KpiCard(d) => serde_json::to_value(d),
            ItemKind::PhotoCard(d) => serde_json::to_value(d),
            ItemKind::Chart(d) => serde_json::to_value(d),
            ItemKind::Table(d) => serde_json::to_value(d),
            ItemKind::Testimonial(d) => serde_json::to_value(d),
            ItemKind::Timeline(d) => serde_json::to_value(d),
            ItemKind::MetricCard(d) => serde_json::to_value(d),
            ItemKind::Button(d) => serde_json::to_value(d),
            ItemKind::Unknown { data, .. } => Ok(data.clone()),
        };
        result.unwrap_or(Value::Null)
    }
}

/// A positioned item on a slide: stable id, grid rectangle, and typed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckItem {
    /// Stable identifier, unique within the item list it belongs to.
    /// Override resolution and header de-duplication key on it.
    pub id: String,
    pub rect: GridRect,
    pub min_w: Option<f64>,
    pub min_h: Option<f64>,
    pub max_w: Option<f64>,
    pub max_h: Option<f64>,
    /// Non-interactive (non-draggable) on the editable screen grid.
    pub is_static: bool,
    pub kind: ItemKind,
}

impl DeckItem {
    pub fn new(id: impl Into<String>, rect: GridRect, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            rect,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
            is_static: false,
            kind,
        }
    }
}

/// Wire representation of a [`DeckItem`]: the grid-layout fields inline with a
/// string `type` tag and a free-form `data` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawItem {
    pub i: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<f64>,
    #[serde(default, rename = "static", skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl From<RawItem> for DeckItem {
    fn from(raw: RawItem) -> Self {
        DeckItem {
            id: raw.i,
            rect: GridRect::new(raw.x, raw.y, raw.w, raw.h),
            min_w: raw.min_w,
            min_h: raw.min_h,
            max_w: raw.max_w,
            max_h: raw.max_h,
            is_static: raw.is_static,
            kind: ItemKind::from_tagged(&raw.kind, raw.data),
        }
    }
}

impl From<&DeckItem> for RawItem {
    fn from(item: &DeckItem) -> Self {
        RawItem {
            i: item.id.clone(),
            x: item.rect.x,
            y: item.rect.y,
            w: item.rect.w,
            h: item.rect.h,
            min_w: item.min_w,
            min_h: item.min_h,
            max_w: item.max_w,
            max_h: item.max_h,
            is_static: item.is_static,
            kind: item.kind.tag().to_string(),
            data: item.kind.to_data_value(),
        }
    }
}

impl<'de> Deserialize<'de> for DeckItem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        RawItem::deserialize(deserializer).map(DeckItem::from)
    }
}

impl Serialize for DeckItem {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RawItem::from(self).serialize(serializer)
    }
}

fn default_size_base() -> String {
    "base".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_item() {
        let json = r#"{
            "i": "kpi1", "x": 0, "y": 0, "w": 3, "h": 4,
            "type": "kpi-card",
            "data": { "metric": "24%", "label": "Growth", "icon": "trending-up" }
        }"#;
        let item: DeckItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "kpi1");
        match &item.kind {
            ItemKind::KpiCard(kpi) => {
                assert_eq!(kpi.metric.flatten(), "24%");
                assert_eq!(kpi.label, "Growth");
            }
            other => panic!("expected kpi-card, got {}", other.tag()),
        }
    }

    #[test]
    fn unknown_tag_becomes_placeholder_kind() {
        let json = r#"{
            "i": "x1", "x": 0, "y": 0, "w": 2, "h": 2,
            "type": "hologram",
            "data": { "foo": 1 }
        }"#;
        let item: DeckItem = serde_json::from_str(json).unwrap();
        match &item.kind {
            ItemKind::Unknown { tag, .. } => assert_eq!(tag, "hologram"),
            other => panic!("expected unknown, got {}", other.tag()),
        }
    }

    #[test]
    fn rich_text_segments_parse() {
        let json = r##"{
            "i": "t", "x": 0, "y": 0, "w": 6, "h": 2,
            "type": "text",
            "data": {
                "text": [
                    { "text": "Revenue " },
                    { "text": "up", "formatting": { "bold": true, "color": "#10b981" } }
                ],
                "size": "xl", "align": "center"
            }
        }"##;
        let item: DeckItem = serde_json::from_str(json).unwrap();
        match &item.kind {
            ItemKind::Text(text) => {
                assert_eq!(text.text.flatten(), "Revenue up");
                assert_eq!(text.align, Align::Center);
            }
            other => panic!("expected text, got {}", other.tag()),
        }
    }

    #[test]
    fn round_trips_through_wire_shape() {
        let json = r#"{"i":"b1","x":4,"y":6,"w":4,"h":2,"static":true,"type":"button","data":{"text":"Get Started","variant":"primary"}}"#;
        let item: DeckItem = serde_json::from_str(json).unwrap();
        assert!(item.is_static);
        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["type"], "button");
        assert_eq!(back["static"], true);
        assert_eq!(back["data"]["variant"], "primary");
    }
}
