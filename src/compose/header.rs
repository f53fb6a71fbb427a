//! Header composition: decides, per slide, whether to render an explicit
//! layout-provided header, a synthesized one, or none at all, and computes
//! the vertical offset other items receive to clear the header band.

use crate::models::{DeckItem, GridRect, HeaderData, ItemKind, LayoutTemplate};

/// Row span given to a synthesized header band.
pub const AUTO_HEADER_ROWS: f64 = 4.0;

/// Layout kinds that never receive a synthesized header: hero and
/// call-to-action style layouts own their full canvas.
const HEADERLESS_LAYOUTS: [&str; 2] = ["call-to-action", "bold-minimalist-hero"];

/// The per-slide header decision, evaluated once before item placement.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderPlan {
    /// The layout declares a header item; rendered at its own grid position,
    /// with the slide's custom title merged into its title field.
    Explicit(DeckItem),
    /// No explicit header and the layout does not opt out: a synthesized
    /// full-width header at row 0.
    Auto(DeckItem),
    /// No header, but the slide supplies a custom title; rendered as an
    /// isolated centered text block with no offset applied to other items.
    TitleOnly(String),
    /// Nothing extra is rendered.
    None,
}

impl HeaderPlan {
    /// The header item to render, if any.
    pub fn header_item(&self) -> Option<&DeckItem> {
        match self {
            HeaderPlan::Explicit(item) | HeaderPlan::Auto(item) => Some(item),
            _ => None,
        }
    }

    /// Row span of the header band; zero when no header is rendered.
    pub fn offset_rows(&self) -> f64 {
        self.header_item().map(|item| item.rect.h).unwrap_or(0.0)
    }
}

/// Evaluates the header state machine for one slide.
pub fn plan_header(
    layout_name: &str,
    layout: &LayoutTemplate,
    slide_title: Option<&str>,
) -> HeaderPlan {
    if let Some(header) = &layout.header {
        let mut header = header.clone();
        if let Some(title) = slide_title {
            if let ItemKind::Header(data) = &mut header.kind {
                data.title = title.to_string();
            }
        }
        return HeaderPlan::Explicit(header);
    }

    let auto_allowed =
        layout.auto_header != Some(false) && !HEADERLESS_LAYOUTS.contains(&layout_name);
    if auto_allowed {
        let title = slide_title
            .map(str::to_string)
            .unwrap_or_else(|| format_layout_name(layout_name));
        let subtitle = (!layout.description.is_empty()).then(|| layout.description.clone());
        let header = DeckItem::new(
            "auto-header",
            GridRect::new(0.0, 0.0, layout.grid.cols, AUTO_HEADER_ROWS),
            ItemKind::Header(HeaderData {
                title,
                subtitle,
                show_divider: Some(true),
            }),
        );
        return HeaderPlan::Auto(header);
    }

    match slide_title {
        Some(title) => HeaderPlan::TitleOnly(title.to_string()),
        None => HeaderPlan::None,
    }
}

/// Human-readable transform of a layout key: kebab-case to Title Case.
pub fn format_layout_name(layout_key: &str) -> String {
    layout_key
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridParams, LayoutTemplate};

    fn layout(auto_header: Option<bool>, header: Option<DeckItem>) -> LayoutTemplate {
        LayoutTemplate {
            description: "A test layout".to_string(),
            grid: GridParams::default(),
            auto_header,
            header,
            items: Vec::new(),
        }
    }

    fn explicit_header(rows: f64) -> DeckItem {
        DeckItem::new(
            "header",
            GridRect::new(0.0, 0.0, 12.0, rows),
            ItemKind::Header(HeaderData {
                title: "Layout Title".to_string(),
                subtitle: Some("Layout subtitle".to_string()),
                show_divider: None,
            }),
        )
    }

    #[test]
    fn explicit_header_takes_slide_title() {
        let layout = layout(None, Some(explicit_header(3.0)));
        let plan = plan_header("data-grid-dashboard", &layout, Some("Custom"));
        match plan {
            HeaderPlan::Explicit(item) => match item.kind {
                ItemKind::Header(data) => assert_eq!(data.title, "Custom"),
                _ => panic!("header item lost its kind"),
            },
            other => panic!("expected explicit plan, got {other:?}"),
        }
    }

    #[test]
    fn auto_header_titles_from_layout_name() {
        let layout = layout(None, None);
        let plan = plan_header("chart-showcase", &layout, None);
        match &plan {
            HeaderPlan::Auto(item) => {
                assert_eq!(item.id, "auto-header");
                assert_eq!(item.rect.w, 12.0);
                assert_eq!(item.rect.h, AUTO_HEADER_ROWS);
                match &item.kind {
                    ItemKind::Header(data) => {
                        assert_eq!(data.title, "Chart Showcase");
                        assert_eq!(data.subtitle.as_deref(), Some("A test layout"));
                    }
                    _ => panic!("auto header is not a header item"),
                }
            }
            other => panic!("expected auto plan, got {other:?}"),
        }
        assert_eq!(plan.offset_rows(), AUTO_HEADER_ROWS);
    }

    #[test]
    fn headerless_layouts_fall_back_to_title_block() {
        let layout = layout(None, None);
        assert_eq!(
            plan_header("call-to-action", &layout, Some("The Ask")),
            HeaderPlan::TitleOnly("The Ask".to_string())
        );
        assert_eq!(plan_header("bold-minimalist-hero", &layout, None), HeaderPlan::None);
    }

    #[test]
    fn auto_header_opt_out_is_respected() {
        let layout = layout(Some(false), None);
        assert_eq!(plan_header("content-slide", &layout, None), HeaderPlan::None);
    }

    #[test]
    fn formats_layout_keys() {
        assert_eq!(format_layout_name("data-grid-dashboard"), "Data Grid Dashboard");
        assert_eq!(format_layout_name("hero"), "Hero");
    }
}
