//! Item renderers for the fixed-size presentation surface.
//!
//! One routine per item type, dispatched by an exhaustive match over the
//! item's kind. Each routine maps the item's typed data plus theme tokens
//! into draw operations on a [`Surface`], with type-specific fallbacks when
//! the surface lacks an optional capability. An unrecognized item type
//! renders a visible placeholder labeled with its tag, so one bad item
//! never aborts the slide.

use std::path::{Path, PathBuf};

use log::debug;

use crate::compose::{ComposedSlide, GridMapping, InchRect};
use crate::models::{
    Align, ButtonData, ChartData, CodeData, DeckItem, HeaderData, ItemKind, KpiCardData, ListData,
    ListStyle, MetricCardData, NoteData, PhotoCardData, QuoteData, QuoteVariant, RichTextData,
    RichTextRole, TableData, TestimonialData, TextContent, TextData, Theme, TimelineData,
    TitleSlideInfo, VAlign,
};
use crate::render::text::{
    content_to_runs, format_number, letter_spacing_pt, line_spacing, resolve_font_size,
    rich_text_color, rich_text_font_size, validate_color,
};
use crate::render::{ChartStyle, ShapeStyle, Stroke, Surface, TableCell, TextOptions, TextRun};

/// Per-deck rendering context shared by all slides.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    /// Base path for resolving relative image sources.
    pub assets_base: Option<&'a Path>,
}

/// Renders the opening title slide.
pub fn render_title_slide(surface: &mut dyn Surface, theme: &Theme, info: &TitleSlideInfo) {
    surface.begin_slide(theme.slide_background());

    let title = info.title.as_deref().unwrap_or("Marketing Presentation");
    surface.draw_text(
        &[TextRun::plain(title)],
        &InchRect::new(0.5, 1.5, 9.0, 1.0),
        &TextOptions {
            font_size: 44.0,
            color: theme.colors.primary.clone(),
            font_face: theme.typography.font_family.heading.clone(),
            bold: true,
            align: Align::Center,
            ..Default::default()
        },
    );

    let mut subtitle_parts: Vec<String> = Vec::new();
    if let Some(subtitle) = &info.subtitle {
        subtitle_parts.push(subtitle.clone());
    }
    let meta: Vec<&str> = [&info.author, &info.company, &info.date]
        .iter()
        .filter_map(|field| field.as_deref())
        .collect();
    if !meta.is_empty() {
        subtitle_parts.push(meta.join(" • "));
    }
    let subtitle = if subtitle_parts.is_empty() {
        "Generated with deckgrid".to_string()
    } else {
        subtitle_parts.join(" — ")
    };
    surface.draw_text(
        &[TextRun::plain(subtitle)],
        &InchRect::new(0.5, 3.0, 9.0, 0.5),
        &TextOptions {
            font_size: 24.0,
            color: theme.colors.foreground.clone(),
            font_face: theme.typography.font_family.body.clone(),
            align: Align::Center,
            ..Default::default()
        },
    );
}

/// Renders the fixed closing slide.
pub fn render_closing_slide(surface: &mut dyn Surface, theme: &Theme) {
    surface.begin_slide(theme.slide_background());
    surface.draw_text(
        &[TextRun::plain("Thank You")],
        &InchRect::new(2.0, 2.0, 6.0, 1.0),
        &TextOptions {
            font_size: 36.0,
            color: theme.colors.primary.clone(),
            font_face: theme.typography.font_family.heading.clone(),
            bold: true,
            align: Align::Center,
            ..Default::default()
        },
    );
    surface.draw_text(
        &[TextRun::plain("Questions?")],
        &InchRect::new(2.0, 3.5, 6.0, 0.5),
        &TextOptions {
            font_size: 24.0,
            color: theme.colors.foreground.clone(),
            font_face: theme.typography.font_family.body.clone(),
            align: Align::Center,
            ..Default::default()
        },
    );
}

/// Renders one composed content slide: header band (or standalone title),
/// then every item through the geometry mapping.
pub fn render_content_slide(
    surface: &mut dyn Surface,
    composed: &ComposedSlide,
    mapping: &GridMapping,
    ctx: &RenderContext<'_>,
) {
    surface.begin_slide(ctx.theme.slide_background());

    if let Some(header) = &composed.header {
        render_item(surface, header, mapping, ctx);
    } else if let Some(title) = &composed.title_block {
        surface.draw_text(
            &[TextRun::plain(title.clone())],
            &InchRect::new(0.5, 0.2, 9.0, 0.8),
            &TextOptions {
                font_size: 36.0,
                color: ctx.theme.colors.primary.clone(),
                font_face: ctx.theme.typography.font_family.heading.clone(),
                bold: true,
                align: Align::Center,
                ..Default::default()
            },
        );
    }

    for item in &composed.items {
        render_item(surface, item, mapping, ctx);
    }
}

/// Maps one item through the grid geometry and dispatches to its renderer.
pub fn render_item(
    surface: &mut dyn Surface,
    item: &DeckItem,
    mapping: &GridMapping,
    ctx: &RenderContext<'_>,
) {
    let rect = mapping.map(&item.rect);
    debug!(
        "rendering item '{}' ({}) at {:.2},{:.2} {:.2}x{:.2} in",
        item.id,
        item.kind.tag(),
        rect.x,
        rect.y,
        rect.w,
        rect.h
    );

    match &item.kind {
        ItemKind::Text(data) => text_item(surface, data, &rect, ctx.theme),
        ItemKind::RichText(data) => rich_text_item(surface, data, &rect, ctx.theme),
        ItemKind::List(data) => list_item(surface, data, &rect, ctx.theme),
        ItemKind::Quote(data) => quote_item(surface, data, &rect, ctx.theme),
        ItemKind::Code(data) => code_item(surface, data, &rect, ctx.theme),
        ItemKind::Note(data) => note_item(surface, data, &rect, ctx.theme),
        ItemKind::Header(data) => header_item(surface, data, &rect, ctx.theme),
        ItemKind::KpiCard(data) => kpi_card_item(surface, data, &rect, ctx.theme),
        ItemKind::PhotoCard(data) => photo_card_item(surface, data, &rect, ctx),
        ItemKind::Chart(data) => chart_item(surface, data, &rect, ctx.theme),
        ItemKind::Table(data) => table_item(surface, data, &rect, ctx.theme),
        ItemKind::Testimonial(data) => testimonial_item(surface, data, &rect, ctx.theme),
        ItemKind::Timeline(data) => timeline_item(surface, data, &rect, ctx.theme),
        ItemKind::MetricCard(data) => metric_card_item(surface, data, &rect, ctx.theme),
        ItemKind::Button(data) => button_item(surface, data, &rect, ctx.theme),
        ItemKind::Unknown { tag, .. } => unknown_item(surface, tag, &rect, ctx.theme),
    }
}

fn text_item(surface: &mut dyn Surface, data: &TextData, rect: &InchRect, theme: &Theme) {
    let font_size = resolve_font_size(theme, &data.size);
    let color = validate_color(data.color.as_deref()).unwrap_or_else(|| theme.colors.foreground.clone());
    let font_face = data
        .font_family
        .clone()
        .unwrap_or_else(|| theme.typography.font_family.body.clone());
    let weight = data.weight.as_deref();

    let mut runs = content_to_runs(&data.text);
    if let TextContent::Rich(_) = &data.text {
        for run in &mut runs {
            run.bold = run.bold.or(Some(weight == Some("bold")));
            run.italic = run.italic.or(Some(weight == Some("italic")));
        }
    }

    surface.draw_text(
        &runs,
        rect,
        &TextOptions {
            font_size,
            color,
            font_face,
            bold: weight == Some("bold"),
            italic: weight == Some("italic"),
            align: data.align,
            line_spacing: line_spacing(data.line_height.as_deref()),
            char_spacing: letter_spacing_pt(data.letter_spacing.as_deref()),
            shadow: data.text_shadow,
            ..Default::default()
        },
    );
}

fn rich_text_item(surface: &mut dyn Surface, data: &RichTextData, rect: &InchRect, theme: &Theme) {
    let token = data.size.as_deref().unwrap_or("base");
    let font_size = rich_text_font_size(theme, token, data.role);
    let color = rich_text_color(theme, data.variant);
    let heading_role = matches!(data.role, RichTextRole::Header | RichTextRole::Subheader);
    let font_face = data.font_family.clone().unwrap_or_else(|| {
        if heading_role {
            theme.typography.font_family.heading.clone()
        } else {
            theme.typography.font_family.body.clone()
        }
    });

    let mut runs = content_to_runs(&data.content);
    if let TextContent::Rich(_) = &data.content {
        for run in &mut runs {
            run.bold = run.bold.or(Some(heading_role));
            run.italic = run
                .italic
                .or(Some(data.role == RichTextRole::Blockquote));
        }
    }

    surface.draw_text(
        &runs,
        rect,
        &TextOptions {
            font_size,
            color,
            font_face,
            bold: heading_role,
            italic: data.role == RichTextRole::Blockquote,
            align: data.align,
            valign: VAlign::Top,
            line_spacing: line_spacing(data.line_height.as_deref()),
            char_spacing: letter_spacing_pt(data.letter_spacing.as_deref()),
            shadow: data.text_shadow,
            ..Default::default()
        },
    );
}

const MAX_ITEMS_PER_LIST_GROUP: usize = 8;

fn list_item(surface: &mut dyn Surface, data: &ListData, rect: &InchRect, theme: &Theme) {
    let token = data.size.as_deref().unwrap_or("base");
    let font_size = resolve_font_size(theme, token).min(14.0);
    if data.items.is_empty() {
        return;
    }

    // Group entries so very long lists stay a handful of text boxes.
    let groups: Vec<&[String]> = data.items.chunks(MAX_ITEMS_PER_LIST_GROUP).collect();
    let group_height = rect.h / groups.len() as f64;

    for (group_index, group) in groups.iter().enumerate() {
        let mut content = String::new();
        for (index, entry) in group.iter().enumerate() {
            let global_index = group_index * MAX_ITEMS_PER_LIST_GROUP + index;
            let marker = match data.style {
                ListStyle::Numbered => format!("{}.", global_index + 1),
                ListStyle::Checklist => "✓".to_string(),
                ListStyle::Bullet => "•".to_string(),
            };
            content.push_str(&format!("{marker} {entry}\n"));
        }

        surface.draw_text(
            &[TextRun::plain(content.trim_end())],
            &InchRect::new(
                rect.x,
                rect.y + group_index as f64 * group_height,
                rect.w,
                group_height,
            ),
            &TextOptions {
                font_size,
                color: theme.colors.foreground.clone(),
                font_face: theme.typography.font_family.body.clone(),
                valign: VAlign::Top,
                ..Default::default()
            },
        );
    }
}

fn quote_item(surface: &mut dyn Surface, data: &QuoteData, rect: &InchRect, theme: &Theme) {
    let font_size = if data.variant == QuoteVariant::Large { 24.0 } else { 18.0 };
    let align = if data.align == Align::Center { Align::Center } else { Align::Left };

    if data.variant != QuoteVariant::Minimal {
        surface.draw_text(
            &[TextRun::plain("\u{201C}")],
            &InchRect::new(rect.x + 0.05, rect.y + 0.05, 0.3, 0.3),
            &TextOptions {
                font_size: font_size + 4.0,
                color: theme.colors.primary.clone(),
                font_face: theme.typography.font_family.heading.clone(),
                valign: VAlign::Top,
                ..Default::default()
            },
        );
    }

    let body_height = rect.h - if data.author.is_some() { 0.8 } else { 0.2 };
    surface.draw_text(
        &[TextRun::plain(data.text.clone())],
        &InchRect::new(rect.x + 0.1, rect.y + 0.1, rect.w - 0.2, body_height.max(0.2)),
        &TextOptions {
            font_size,
            color: theme.colors.foreground.clone(),
            font_face: theme.typography.font_family.body.clone(),
            italic: data.variant != QuoteVariant::Minimal,
            align,
            ..Default::default()
        },
    );

    if let Some(author) = &data.author {
        let mut attribution = format!("— {author}");
        if let Some(role) = &data.role {
            attribution.push_str(&format!(", {role}"));
        }
        if let Some(company) = &data.company {
            attribution.push_str(&format!(", {company}"));
        }
        surface.draw_text(
            &[TextRun::plain(attribution)],
            &InchRect::new(rect.x + 0.1, rect.y + rect.h - 0.6, rect.w - 0.2, 0.4),
            &TextOptions {
                font_size: (font_size - 4.0).max(10.0),
                color: theme.colors.muted.clone(),
                font_face: theme.typography.font_family.body.clone(),
                align: if align == Align::Center { Align::Center } else { Align::Right },
                valign: VAlign::Top,
                ..Default::default()
            },
        );
    }
}

fn code_item(surface: &mut dyn Surface, data: &CodeData, rect: &InchRect, theme: &Theme) {
    let token = data.size.as_deref().unwrap_or("base");
    let font_size = resolve_font_size(theme, token).min(12.0);
    let dark = data.theme.as_deref() == Some("dark");

    surface.draw_rect(
        rect,
        &ShapeStyle::filled(if dark { "#1f2937" } else { "#f8fafc" })
            .with_line(Stroke::new(theme.colors.border.clone(), 1.0)),
    );
    surface.draw_text(
        &[TextRun::plain(data.code.clone())],
        &rect.inset(0.1, 0.1),
        &TextOptions {
            font_size,
            color: (if dark { "#f9fafb" } else { "#1e293b" }).to_string(),
            font_face: theme.typography.font_family.mono.clone(),
            valign: VAlign::Top,
            ..Default::default()
        },
    );
}

fn note_item(surface: &mut dyn Surface, data: &NoteData, rect: &InchRect, theme: &Theme) {
    let token = data.size.as_deref().unwrap_or("base");
    let font_size = resolve_font_size(theme, token).min(14.0);
    let accent = data.severity.accent_hex();

    let label = data
        .title
        .clone()
        .unwrap_or_else(|| data.severity.label().to_string());
    let content = format!("{}: {}", label.to_uppercase(), data.content);

    surface.draw_text(
        &[TextRun::plain(content)],
        &InchRect::new(rect.x + 0.15, rect.y + 0.1, rect.w - 0.3, rect.h - 0.2),
        &TextOptions {
            font_size,
            // Dark text for contrast on the tinted background.
            color: "#1f2937".to_string(),
            font_face: theme.typography.font_family.body.clone(),
            valign: VAlign::Top,
            fill: Some(accent.to_string()),
            fill_alpha: Some(0.08),
            line: Some(Stroke::new(accent, 1.0)),
            ..Default::default()
        },
    );
}

fn header_item(surface: &mut dyn Surface, data: &HeaderData, rect: &InchRect, theme: &Theme) {
    let title_height = 0.6;
    let subtitle_height = 0.35;
    let line_gap = 0.2;

    if !data.title.is_empty() {
        surface.draw_text(
            &[TextRun::plain(data.title.clone())],
            &InchRect::new(rect.x + 0.3, rect.y + 0.1, rect.w - 0.6, title_height),
            &TextOptions {
                font_size: 32.0,
                color: theme.colors.primary.clone(),
                font_face: theme.typography.font_family.heading.clone(),
                bold: true,
                valign: VAlign::Top,
                ..Default::default()
            },
        );
    }

    if let Some(subtitle) = &data.subtitle {
        surface.draw_text(
            &[TextRun::plain(subtitle.clone())],
            &InchRect::new(
                rect.x + 0.3,
                rect.y + title_height + 0.08,
                rect.w - 0.6,
                subtitle_height,
            ),
            &TextOptions {
                font_size: 20.0,
                color: theme.colors.foreground.clone(),
                font_face: theme.typography.font_family.body.clone(),
                valign: VAlign::Top,
                ..Default::default()
            },
        );
    }

    if data.show_divider != Some(false) {
        let line_y = if data.subtitle.is_some() {
            rect.y + title_height + subtitle_height + line_gap
        } else {
            rect.y + title_height + line_gap
        };
        surface.draw_line(
            &InchRect::new(rect.x + 0.3, line_y, rect.w - 0.6, 0.0),
            &Stroke::new(theme.colors.primary.clone(), 3.0),
        );
    }
}

fn kpi_card_item(surface: &mut dyn Surface, data: &KpiCardData, rect: &InchRect, theme: &Theme) {
    kpi_panel(surface, &data.metric, &data.label, rect, theme);
}

/// Shared panel of the KPI and metric cards: background, large value, label.
fn kpi_panel(
    surface: &mut dyn Surface,
    metric: &TextContent,
    label: &str,
    rect: &InchRect,
    theme: &Theme,
) {
    surface.draw_rect(
        rect,
        &ShapeStyle::filled(theme.colors.muted.clone())
            .with_line(Stroke::new(theme.colors.border.clone(), 1.0)),
    );

    // Mono numerals keep multi-card rows visually aligned.
    let number_font = theme.typography.font_family.mono.clone();
    let mut runs = content_to_runs(metric);
    if let TextContent::Rich(_) = metric {
        for run in &mut runs {
            run.bold = run.bold.or(Some(true));
        }
    }
    surface.draw_text(
        &runs,
        &InchRect::new(rect.x + 0.15, rect.y + 0.15, rect.w - 0.3, rect.h * 0.65),
        &TextOptions {
            font_size: 36.0,
            color: theme.colors.primary.clone(),
            font_face: number_font,
            bold: true,
            align: Align::Center,
            valign: VAlign::Bottom,
            ..Default::default()
        },
    );

    surface.draw_text(
        &[TextRun::plain(label)],
        &InchRect::new(
            rect.x + 0.15,
            rect.y + rect.h * 0.65,
            rect.w - 0.3,
            (rect.h * 0.35 - 0.15).max(0.1),
        ),
        &TextOptions {
            font_size: 16.0,
            color: theme.colors.foreground.clone(),
            font_face: theme.typography.font_family.body.clone(),
            bold: true,
            align: Align::Center,
            valign: VAlign::Top,
            ..Default::default()
        },
    );
}

fn metric_card_item(surface: &mut dyn Surface, data: &MetricCardData, rect: &InchRect, theme: &Theme) {
    let value = if data.unit.is_empty() {
        format_number(data.value)
    } else {
        format!("{} {}", format_number(data.value), data.unit)
    };
    kpi_panel(surface, &TextContent::Plain(value), &data.label, rect, theme);

    if let Some(change) = data.change {
        let badge = if change > 0.0 {
            format!("+{}", format_number(change))
        } else {
            format_number(change)
        };
        let color = if change > 0.0 {
            "#00AA00"
        } else if change < 0.0 {
            "#AA0000"
        } else {
            "#6b7280"
        };
        surface.draw_text(
            &[TextRun::plain(badge)],
            &InchRect::new(rect.x + rect.w - 1.0, rect.y + 0.1, 0.8, 0.3),
            &TextOptions {
                font_size: 12.0,
                color: color.to_string(),
                font_face: theme.typography.font_family.mono.clone(),
                align: Align::Right,
                valign: VAlign::Top,
                ..Default::default()
            },
        );
    }
}

fn chart_item(surface: &mut dyn Surface, data: &ChartData, rect: &InchRect, theme: &Theme) {
    if surface.caps().charts && !data.data.is_empty() {
        surface.draw_chart(
            data,
            rect,
            &ChartStyle {
                series_color: theme.colors.primary.clone(),
                label_color: theme.colors.foreground.clone(),
            },
        );
        return;
    }

    // Placeholder panel with the same geometry so slide layout never breaks.
    placeholder_panel(surface, "Chart", 16.0, rect, theme);
}

fn table_item(surface: &mut dyn Surface, data: &TableData, rect: &InchRect, theme: &Theme) {
    if surface.caps().tables && !data.headers.is_empty() {
        let mut rows: Vec<Vec<TableCell>> = Vec::with_capacity(data.rows.len() + 1);
        rows.push(
            data.headers
                .iter()
                .map(|text| TableCell {
                    text: text.clone(),
                    bold: true,
                    color: theme.colors.foreground.clone(),
                    fill: theme.colors.primary.clone(),
                    font_face: theme.typography.font_family.heading.clone(),
                    font_size: 16.0,
                    align: Align::Center,
                })
                .collect(),
        );
        for (index, row) in data.rows.iter().enumerate() {
            let fill = if index % 2 == 0 {
                theme.colors.background.clone()
            } else {
                theme.colors.muted.clone()
            };
            rows.push(
                row.iter()
                    .map(|text| TableCell {
                        text: text.clone(),
                        bold: false,
                        color: theme.colors.foreground.clone(),
                        fill: fill.clone(),
                        font_face: theme.typography.font_family.body.clone(),
                        font_size: 14.0,
                        align: Align::Center,
                    })
                    .collect(),
            );
        }
        surface.draw_table(&rows, rect, &Stroke::new(theme.colors.border.clone(), 1.0));
        return;
    }

    placeholder_panel(surface, "Table", 14.0, rect, theme);
}

fn photo_card_item(
    surface: &mut dyn Surface,
    data: &PhotoCardData,
    rect: &InchRect,
    ctx: &RenderContext<'_>,
) {
    let theme = ctx.theme;
    let mut added = false;
    if surface.caps().images {
        if let Some(path) = resolve_image_path(&data.src, ctx.assets_base) {
            added = surface.draw_image(&path, rect);
        }
    }

    if !added {
        let label = if data.alt.is_empty() { "Image" } else { data.alt.as_str() };
        placeholder_panel(surface, label, 14.0, rect, theme);
    }

    // Caption overlays the bottom edge whether or not the image resolved.
    if let Some(caption) = &data.caption {
        surface.draw_text(
            &[TextRun::plain(caption.clone())],
            &InchRect::new(rect.x + 0.05, rect.y + rect.h - 0.3, rect.w - 0.1, 0.25),
            &TextOptions {
                font_size: 12.0,
                color: theme.colors.foreground.clone(),
                font_face: theme.typography.font_family.body.clone(),
                align: Align::Center,
                valign: VAlign::Bottom,
                ..Default::default()
            },
        );
    }
}

/// Probes candidate locations for an image source in priority order:
/// assets-base-relative, absolute, working-directory-relative, then the
/// crate's bundled `public/` directory. First existing path wins.
pub fn resolve_image_path(src: &str, assets_base: Option<&Path>) -> Option<PathBuf> {
    if src.is_empty() {
        return None;
    }
    let src_path = Path::new(src);
    let trimmed = src.trim_start_matches('/');
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(base) = assets_base {
        if src_path.is_absolute() {
            candidates.push(src_path.to_path_buf());
        } else {
            candidates.push(base.join(src));
        }
    }
    if src_path.is_absolute() {
        candidates.push(src_path.to_path_buf());
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(trimmed));
    }
    candidates.push(Path::new("public").join(trimmed));

    candidates.into_iter().find(|candidate| candidate.exists())
}

fn timeline_item(surface: &mut dyn Surface, data: &TimelineData, rect: &InchRect, theme: &Theme) {
    let top = rect.y + rect.h * 0.4;

    surface.draw_line(
        &InchRect::new(rect.x + 0.1, top, rect.w - 0.2, 0.0),
        &Stroke::new(theme.colors.border.clone(), 2.0),
    );

    // Always plot at least three markers; missing events become blanks.
    let count = data.events.len().max(3);
    for index in 0..count {
        let ratio = if count == 1 {
            0.5
        } else {
            index as f64 / (count - 1) as f64
        };
        let cx = rect.x + 0.1 + ratio * (rect.w - 0.2);

        surface.draw_ellipse(
            &InchRect::new(cx - 0.06, top - 0.06, 0.12, 0.12),
            &ShapeStyle::filled(theme.colors.primary.clone())
                .with_line(Stroke::new(theme.colors.primary.clone(), 1.0)),
        );

        let event = data.events.get(index);
        let label = match event {
            Some(event) => match (&event.date, &event.title) {
                (Some(date), Some(title)) => format!("{date} — {title}"),
                (None, Some(title)) => title.clone(),
                (Some(date), None) => date.clone(),
                (None, None) => "Milestone".to_string(),
            },
            None => "Milestone".to_string(),
        };
        surface.draw_text(
            &[TextRun::plain(label)],
            &InchRect::new(
                (cx - 0.8).max(rect.x),
                top + 0.12,
                1.6,
                (rect.h - (top - rect.y) - 0.2).max(0.2),
            ),
            &TextOptions {
                font_size: 10.0,
                color: theme.colors.foreground.clone(),
                font_face: theme.typography.font_family.body.clone(),
                align: Align::Center,
                valign: VAlign::Top,
                ..Default::default()
            },
        );
    }
}

fn button_item(surface: &mut dyn Surface, data: &ButtonData, rect: &InchRect, theme: &Theme) {
    surface.draw_rect(
        rect,
        &ShapeStyle::filled(theme.colors.primary.clone())
            .with_line(Stroke::new(theme.colors.primary.clone(), 2.0)),
    );

    let mut runs = if data.text.is_empty() {
        vec![TextRun::plain("Click Here")]
    } else {
        content_to_runs(&data.text)
    };
    if let TextContent::Rich(_) = &data.text {
        for run in &mut runs {
            run.bold = run.bold.or(Some(true));
        }
    }
    surface.draw_text(
        &runs,
        rect,
        &TextOptions {
            font_size: 16.0,
            color: theme.colors.background.clone(),
            font_face: theme.typography.font_family.body.clone(),
            bold: true,
            align: Align::Center,
            ..Default::default()
        },
    );
}

fn testimonial_item(
    surface: &mut dyn Surface,
    data: &TestimonialData,
    rect: &InchRect,
    theme: &Theme,
) {
    surface.draw_text(
        &[TextRun::plain("\u{201C}")],
        &InchRect::new(rect.x + 0.1, rect.y + 0.1, 0.3, 0.3),
        &TextOptions {
            font_size: 24.0,
            color: theme.colors.primary.clone(),
            font_face: theme.typography.font_family.heading.clone(),
            bold: true,
            valign: VAlign::Top,
            ..Default::default()
        },
    );

    let mut runs = if data.quote.is_empty() {
        vec![TextRun::plain("This is a great product!")]
    } else {
        content_to_runs(&data.quote)
    };
    if let TextContent::Rich(_) = &data.quote {
        for run in &mut runs {
            // Testimonials default to italic.
            run.italic = run.italic.or(Some(true));
        }
    }
    surface.draw_text(
        &runs,
        &InchRect::new(rect.x + 0.1, rect.y + 0.4, rect.w - 0.2, rect.h * 0.6),
        &TextOptions {
            font_size: 14.0,
            color: theme.colors.foreground.clone(),
            font_face: theme.typography.font_family.body.clone(),
            italic: true,
            valign: VAlign::Top,
            ..Default::default()
        },
    );

    let author = data.author.as_deref().unwrap_or("Anonymous");
    surface.draw_text(
        &[TextRun::plain(format!("— {author}"))],
        &InchRect::new(rect.x + 0.1, rect.y + rect.h - 0.4, rect.w - 0.2, 0.3),
        &TextOptions {
            font_size: 12.0,
            color: theme.colors.primary.clone(),
            font_face: theme.typography.font_family.body.clone(),
            align: Align::Right,
            valign: VAlign::Bottom,
            ..Default::default()
        },
    );
}

fn unknown_item(surface: &mut dyn Surface, tag: &str, rect: &InchRect, theme: &Theme) {
    placeholder_panel(surface, &format!("Unknown item type: {tag}"), 14.0, rect, theme);
}

/// Muted panel with a centered label, used by every capability fallback.
fn placeholder_panel(
    surface: &mut dyn Surface,
    label: &str,
    font_size: f64,
    rect: &InchRect,
    theme: &Theme,
) {
    surface.draw_rect(
        rect,
        &ShapeStyle::filled(theme.colors.muted.clone())
            .with_line(Stroke::new(theme.colors.border.clone(), 1.0)),
    );
    surface.draw_text(
        &[TextRun::plain(label)],
        rect,
        &TextOptions {
            font_size,
            color: theme.colors.foreground.clone(),
            font_face: theme.typography.font_family.body.clone(),
            align: Align::Center,
            ..Default::default()
        },
    );
}
