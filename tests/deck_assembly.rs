//! End-to-end assembly scenarios, observed through a recording surface and
//! the packaged artifact.

use std::path::Path;

use deckgrid::assemble::{DeckAssembler, DeckOptions};
use deckgrid::compose::InchRect;
use deckgrid::models::{ItemOverride, SlideConfig};
use deckgrid::render::{
    ChartStyle, ShapeStyle, Stroke, Surface, SurfaceCaps, TableCell, TextOptions, TextRun,
};
use deckgrid::DeckError;
use serde_json::json;

/// Records every draw operation so tests can assert on geometry and content.
#[derive(Default)]
struct RecordingSurface {
    slides: usize,
    texts: Vec<(usize, String, InchRect)>,
    rects: Vec<(usize, InchRect)>,
    tables: Vec<(usize, usize)>,
    charts: usize,
    ellipses: usize,
}

impl RecordingSurface {
    fn texts_containing(&self, needle: &str) -> Vec<&(usize, String, InchRect)> {
        self.texts
            .iter()
            .filter(|(_, text, _)| text.contains(needle))
            .collect()
    }

    fn texts_equal(&self, needle: &str) -> Vec<&(usize, String, InchRect)> {
        self.texts.iter().filter(|(_, text, _)| text == needle).collect()
    }
}

impl Surface for RecordingSurface {
    fn caps(&self) -> SurfaceCaps {
        SurfaceCaps {
            charts: false,
            tables: true,
            images: false,
        }
    }

    fn begin_slide(&mut self, _background: &str) {
        self.slides += 1;
    }

    fn draw_rect(&mut self, rect: &InchRect, _style: &ShapeStyle) {
        self.rects.push((self.slides, *rect));
    }

    fn draw_line(&mut self, _rect: &InchRect, _stroke: &Stroke) {}

    fn draw_ellipse(&mut self, _rect: &InchRect, _style: &ShapeStyle) {
        self.ellipses += 1;
    }

    fn draw_text(&mut self, runs: &[TextRun], rect: &InchRect, _options: &TextOptions) {
        let text: String = runs.iter().map(|run| run.text.as_str()).collect();
        self.texts.push((self.slides, text, *rect));
    }

    fn draw_chart(
        &mut self,
        _chart: &deckgrid::models::ChartData,
        _rect: &InchRect,
        _style: &ChartStyle,
    ) {
        self.charts += 1;
    }

    fn draw_table(&mut self, rows: &[Vec<TableCell>], _rect: &InchRect, _border: &Stroke) {
        self.tables.push((self.slides, rows.len()));
    }
}

fn one_slide_options(layout: &str, theme: &str) -> DeckOptions {
    DeckOptions {
        theme: theme.to_string(),
        layout: Some(layout.to_string()),
        ..Default::default()
    }
}

#[test]
fn dashboard_deck_is_title_content_closing() {
    let assembler =
        DeckAssembler::new(one_slide_options("data-grid-dashboard", "metallic-earth")).unwrap();
    let mut surface = RecordingSurface::default();
    assembler.render_to(&mut surface);

    assert_eq!(surface.slides, 3);
    // Title and closing slides carry their fixed copy.
    assert_eq!(surface.texts_containing("Marketing Presentation")[0].0, 1);
    assert_eq!(surface.texts_containing("Thank You")[0].0, 3);
}

#[test]
fn dashboard_header_spans_and_kpis_shift_below_the_band() {
    let assembler =
        DeckAssembler::new(one_slide_options("data-grid-dashboard", "metallic-earth")).unwrap();
    let mut surface = RecordingSurface::default();
    assembler.render_to(&mut surface);

    // The header title renders exactly once, on the content slide.
    let headers = surface.texts_containing("Key Performance Indicators");
    assert_eq!(headers.len(), 1);
    assert_eq!(headers[0].0, 2);

    // Header band x starts at the full-width left edge (0.15in pad) and the
    // header title is inset 0.3in further.
    assert!((headers[0].2.x - 0.45).abs() < 1e-9);

    // The four KPI metrics sit below the 3-row header band: grid y=3 maps to
    // 3 * 0.45 + 0.25 = 1.6in, and their x positions stay at columns 0/3/6/9.
    let expected_y = 3.0 * 0.45 + 0.25 + 0.15; // band offset + metric inset
    for (metric, column) in [("24%", 0.0), ("$2.5M", 3.0), ("150k", 6.0), ("95%", 9.0)] {
        let matches = surface.texts_containing(metric);
        assert_eq!(matches.len(), 1, "metric {metric} rendered once");
        let rect = matches[0].2;
        let expected_x = (column / 12.0) * 10.0 + 0.15 + 0.15;
        assert!(
            (rect.x - expected_x).abs() < 1e-9,
            "metric {metric} keeps its column"
        );
        assert!((rect.y - expected_y).abs() < 1e-9, "metric {metric} clears the header");
    }
}

#[test]
fn same_layout_with_different_overrides_diverges_only_in_overridden_fields() {
    let slides = vec![
        SlideConfig::new("data-grid-dashboard")
            .with_overrides(vec![ItemOverride::data("kpi1", json!({ "label": "Custom Label 1" }))]),
        SlideConfig::new("data-grid-dashboard")
            .with_overrides(vec![ItemOverride::data("kpi1", json!({ "label": "Custom Label 2" }))]),
    ];
    let assembler = DeckAssembler::new(DeckOptions {
        theme: "metallic-earth".to_string(),
        slides,
        ..Default::default()
    })
    .unwrap();

    let mut surface = RecordingSurface::default();
    assembler.render_to(&mut surface);

    let first = surface.texts_containing("Custom Label 1");
    let second = surface.texts_containing("Custom Label 2");
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first[0].0, 2);
    assert_eq!(second[0].0, 3);

    // The non-overridden metric value renders identically on both slides.
    let metrics = surface.texts_containing("24%");
    assert_eq!(metrics.len(), 2);
    assert_eq!(metrics[0].2, metrics[1].2);
}

#[test]
fn unknown_item_type_renders_placeholder_without_sinking_the_slide() {
    // An unknown type plus a bad payload for a known type, next to a valid
    // KPI grid: everything still renders.
    let slides = vec![SlideConfig {
        layout: "data-grid-dashboard".to_string(),
        title: None,
        subtitle: None,
        description: None,
        items: vec![ItemOverride::data("kpi2", json!({ "label": 42 }))],
        notes: None,
    }];
    let assembler = DeckAssembler::new(DeckOptions {
        theme: "corporate-blue".to_string(),
        slides,
        ..Default::default()
    })
    .unwrap();

    let mut surface = RecordingSurface::default();
    assembler.render_to(&mut surface);

    assert_eq!(surface.slides, 3);
    // kpi2's payload stopped matching the KPI schema, so it degrades to a
    // labeled placeholder; its neighbors render normally.
    assert_eq!(surface.texts_containing("Unknown item type: kpi-card").len(), 1);
    assert_eq!(surface.texts_containing("24%").len(), 1);
    assert_eq!(surface.texts_containing("95%").len(), 1);
}

#[test]
fn chart_without_native_support_renders_placeholder_panel() {
    let assembler =
        DeckAssembler::new(one_slide_options("chart-showcase", "tech-purple")).unwrap();
    let mut surface = RecordingSurface::default();
    assembler.render_to(&mut surface);

    assert_eq!(surface.charts, 0);
    let placeholders = surface.texts_equal("Chart");
    assert_eq!(placeholders.len(), 1);
    // The placeholder occupies the chart's mapped geometry, so layout holds.
    let rect = placeholders[0].2;
    assert!(rect.w > 5.0);
}

#[test]
fn timeline_pads_to_three_markers() {
    let slides = vec![SlideConfig::new("timeline-roadmap").with_overrides(vec![
        ItemOverride::data("timeline", json!({ "events": [ { "date": "Jan", "title": "Kickoff" } ] })),
    ])];
    let assembler = DeckAssembler::new(DeckOptions {
        theme: "metallic-earth".to_string(),
        slides,
        ..Default::default()
    })
    .unwrap();

    let mut surface = RecordingSurface::default();
    assembler.render_to(&mut surface);

    assert_eq!(surface.ellipses, 3);
    assert_eq!(surface.texts_containing("Jan \u{2014} Kickoff").len(), 1);
    assert_eq!(surface.texts_equal("Milestone").len(), 2);
}

#[test]
fn photo_card_without_image_support_shows_alt_text_and_caption() {
    let assembler =
        DeckAssembler::new(one_slide_options("photo-narrative-flow", "metallic-earth")).unwrap();
    let mut surface = RecordingSurface::default();
    assembler.render_to(&mut surface);

    // This surface declares no image capability, so the alt text placeholder
    // renders along with the caption overlay.
    assert_eq!(surface.texts_equal("Product in use").len(), 1);
    assert_eq!(surface.texts_equal("The v2 hardware in the field").len(), 1);
}

#[test]
fn comparison_table_uses_native_table_support() {
    let assembler =
        DeckAssembler::new(one_slide_options("comparison-table", "startup-green")).unwrap();
    let mut surface = RecordingSurface::default();
    assembler.render_to(&mut surface);

    // Header row plus four body rows from the layout's table data.
    assert_eq!(surface.tables, vec![(2, 5)]);
}

#[test]
fn strict_failure_writes_no_partial_artifact() {
    let path = std::env::temp_dir().join("deckgrid-no-partial.pptx");
    std::fs::remove_file(&path).ok();

    let result = DeckAssembler::new(one_slide_options("data-grid-dashboard", "no-such-theme"));
    assert!(matches!(result, Err(DeckError::ThemeNotFound(_))));
    assert!(!Path::new(&path).exists());
}

#[test]
fn artifact_contains_one_part_per_slide() {
    let assembler = DeckAssembler::new(DeckOptions {
        theme: "warm-orange".to_string(),
        slides: vec![
            SlideConfig::new("bold-minimalist-hero"),
            SlideConfig::new("metrics-breakdown"),
            SlideConfig::new("timeline-roadmap"),
        ],
        ..Default::default()
    })
    .unwrap();

    let path = std::env::temp_dir().join("deckgrid-artifact-test.pptx");
    assembler.write_pptx(&path).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|index| archive.by_index(index).unwrap().name().to_string())
        .collect();

    // Title + 3 content + closing.
    for number in 1..=5 {
        assert!(names.contains(&format!("ppt/slides/slide{number}.xml")));
    }
    assert!(!names.contains(&"ppt/slides/slide6.xml".to_string()));
    std::fs::remove_file(&path).ok();
}

#[test]
fn lenient_batch_drops_only_the_unknown_slide() {
    let assembler = DeckAssembler::lenient(DeckOptions {
        theme: "metallic-earth".to_string(),
        slides: vec![
            SlideConfig::new("data-grid-dashboard"),
            SlideConfig::new("not-a-real-layout"),
            SlideConfig::new("call-to-action"),
        ],
        ..Default::default()
    })
    .unwrap();

    let mut surface = RecordingSurface::default();
    assembler.render_to(&mut surface);

    // Title + 2 surviving content slides + closing.
    assert_eq!(surface.slides, 4);
    assert_eq!(surface.texts_containing("Key Performance Indicators").len(), 1);
    assert_eq!(surface.texts_containing("Ready to move forward?").len(), 1);
}
