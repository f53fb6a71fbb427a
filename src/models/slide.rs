use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A per-slide patch applied to one of the layout's base items, matched by
/// stable id. Overrides tune fields of existing items; they never introduce
/// new items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemOverride {
    pub i: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(
        default,
        rename = "static",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_static: Option<bool>,
    /// Partial data payload, deep-merged key-by-key onto the base item's data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ItemOverride {
    pub fn data(id: impl Into<String>, data: Value) -> Self {
        Self {
            i: id.into(),
            data: Some(data),
            ..Default::default()
        }
    }
}

/// One requested slide: a layout name plus optional customizations.
/// A slide, its resolved layout template, and its resolved theme fully
/// determine the rendered output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideConfig {
    pub layout: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemOverride>,
    /// Free-text speaker notes; carried through assembly, not rendered on
    /// the presentation surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SlideConfig {
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
            title: None,
            subtitle: None,
            description: None,
            items: Vec::new(),
            notes: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_overrides(mut self, items: Vec<ItemOverride>) -> Self {
        self.items = items;
        self
    }
}

/// Descriptor for the generated title slide. Missing fields fall back to
/// generic defaults at render time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TitleSlideInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}
