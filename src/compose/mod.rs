//! Slide composition: header policy, override merging, and the grid-unit to
//! target-unit geometry mapping.
//!
//! Composition is pure. It starts from the layout template's original,
//! unshifted items on every call, so re-composing the same slide twice never
//! double-applies the header offset.

pub mod geometry;
pub mod header;
pub mod merge;

pub use geometry::{GridMapping, InchRect};
pub use header::{format_layout_name, plan_header, HeaderPlan};
pub use merge::merge_items;

use crate::models::{DeckItem, LayoutTemplate, SlideConfig};

/// The fully composed content of one slide, ready for geometry mapping and
/// rendering on either target.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedSlide {
    /// Header band to render first, if the plan produced one.
    pub header: Option<DeckItem>,
    /// Isolated centered title, for slides with a custom title but no header.
    pub title_block: Option<String>,
    /// Merged, offset items with the header de-duplicated out.
    pub items: Vec<DeckItem>,
}

/// Composes one slide: plans the header, merges per-slide overrides onto the
/// layout's base items, removes a duplicate of the chosen header from the
/// item list, and shifts items that would overlap the header band.
///
/// Only items whose row position falls within the header's row span are
/// shifted; items already below the band keep their declared position.
pub fn compose_slide(
    layout_name: &str,
    layout: &LayoutTemplate,
    slide: &SlideConfig,
) -> ComposedSlide {
    let plan = plan_header(layout_name, layout, slide.title.as_deref());
    let header_rows = plan.offset_rows();
    let header_id = plan.header_item().map(|item| item.id.clone());

    let items = merge_items(&layout.items, &slide.items)
        .into_iter()
        .filter(|item| header_id.as_deref() != Some(item.id.as_str()))
        .map(|mut item| {
            if header_rows > 0.0 && item.rect.y < header_rows {
                item.rect.y += header_rows;
            }
            item
        })
        .collect();

    match plan {
        HeaderPlan::Explicit(header) | HeaderPlan::Auto(header) => ComposedSlide {
            header: Some(header),
            title_block: None,
            items,
        },
        HeaderPlan::TitleOnly(title) => ComposedSlide {
            header: None,
            title_block: Some(title),
            items,
        },
        HeaderPlan::None => ComposedSlide {
            header: None,
            title_block: None,
            items,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        GridParams, GridRect, HeaderData, ItemKind, KpiCardData, TextContent, TextData,
    };

    fn kpi_item(id: &str, x: f64, y: f64) -> DeckItem {
        DeckItem::new(
            id,
            GridRect::new(x, y, 3.0, 4.0),
            ItemKind::KpiCard(KpiCardData {
                metric: TextContent::from("1"),
                label: "L".to_string(),
                icon: None,
                trend: None,
            }),
        )
    }

    fn dashboard_layout() -> LayoutTemplate {
        LayoutTemplate {
            description: "KPIs".to_string(),
            grid: GridParams::default(),
            auto_header: None,
            header: Some(DeckItem::new(
                "header",
                GridRect::new(0.0, 0.0, 12.0, 3.0),
                ItemKind::Header(HeaderData {
                    title: "KPIs".to_string(),
                    subtitle: None,
                    show_divider: None,
                }),
            )),
            items: vec![kpi_item("kpi1", 0.0, 0.0), kpi_item("kpi2", 3.0, 6.0)],
        }
    }

    #[test]
    fn offset_applies_only_to_items_inside_the_header_band() {
        let layout = dashboard_layout();
        let composed = compose_slide("data-grid-dashboard", &layout, &SlideConfig::new("data-grid-dashboard"));

        assert!(composed.header.is_some());
        // kpi1 started at row 0, inside the 3-row band: shifted down.
        assert_eq!(composed.items[0].rect.y, 3.0);
        // kpi2 started at row 6, already clear of the band: untouched.
        assert_eq!(composed.items[1].rect.y, 6.0);
        // Horizontal positions never change.
        assert_eq!(composed.items[0].rect.x, 0.0);
        assert_eq!(composed.items[1].rect.x, 3.0);
    }

    #[test]
    fn recomposition_does_not_double_offset() {
        let layout = dashboard_layout();
        let slide = SlideConfig::new("data-grid-dashboard");
        let first = compose_slide("data-grid-dashboard", &layout, &slide);
        let second = compose_slide("data-grid-dashboard", &layout, &slide);
        assert_eq!(first, second);
        // The template itself is untouched.
        assert_eq!(layout.items[0].rect.y, 0.0);
    }

    #[test]
    fn header_never_renders_twice_when_listed_among_items() {
        let mut layout = dashboard_layout();
        // The header also appears in the generic item list.
        layout
            .items
            .push(layout.header.clone().expect("layout has header"));

        let composed = compose_slide("data-grid-dashboard", &layout, &SlideConfig::new("data-grid-dashboard"));
        let header_renderings = composed
            .items
            .iter()
            .filter(|item| item.id == "header")
            .count();
        assert_eq!(header_renderings, 0);
        assert!(composed.header.is_some());
    }

    #[test]
    fn title_only_slides_get_no_offset() {
        let layout = LayoutTemplate {
            description: String::new(),
            grid: GridParams::default(),
            auto_header: Some(false),
            header: None,
            items: vec![DeckItem::new(
                "body",
                GridRect::new(0.0, 1.0, 12.0, 4.0),
                ItemKind::Text(TextData::default()),
            )],
        };
        let slide = SlideConfig::new("content-slide").with_title("Standalone");
        let composed = compose_slide("content-slide", &layout, &slide);
        assert_eq!(composed.title_block.as_deref(), Some("Standalone"));
        assert_eq!(composed.items[0].rect.y, 1.0);
    }
}
