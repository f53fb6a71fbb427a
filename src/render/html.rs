//! Screen render target: a self-contained HTML document using CSS grid.
//!
//! Unlike the presentation surface, the screen target keeps grid units as
//! grid units: each item becomes a cell spanning `w` columns and `h` rows of
//! a CSS grid whose template is derived from the layout's grid parameters
//! (column count, px row height, px margins). The same composition pass
//! (header policy, override merge, overlap offset) feeds both targets.
//!
//! Capabilities of this surface: charts render natively as inline SVG and
//! tables as real `<table>` markup; images render as placeholder panels with
//! alt text (the interactive preview never embeds files from disk).

use std::fmt::Write;

use crate::compose::{compose_slide, ComposedSlide};
use crate::errors::Result;
use crate::models::{
    Align, ButtonVariant, ChartData, ChartKind, DeckItem, ItemKind, LayoutTemplate, ListStyle,
    QuoteVariant, RichTextRole, SlideConfig, TextContent, Theme, TitleSlideInfo,
};
use crate::render::text::{
    format_number, resolve_font_size, rich_text_color, rich_text_font_size, validate_color,
};

/// One slide request paired with its resolved layout, ready for the screen
/// renderer.
pub struct HtmlSlide<'a> {
    pub layout_name: &'a str,
    pub layout: &'a LayoutTemplate,
    pub config: &'a SlideConfig,
}

/// Renders the whole deck as one HTML document: title slide, content slides,
/// closing slide.
pub fn render_document<'a>(
    theme: &Theme,
    title_slide: &TitleSlideInfo,
    slides: impl IntoIterator<Item = HtmlSlide<'a>>,
) -> Result<String> {
    let mut out = String::new();
    let title = title_slide.title.as_deref().unwrap_or("Marketing Presentation");

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape_html(title))?;
    write_styles(&mut out, theme)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;

    write_title_slide(&mut out, theme, title_slide)?;
    for slide in slides {
        let composed = compose_slide(slide.layout_name, slide.layout, slide.config);
        write_content_slide(&mut out, theme, slide.layout, &composed, slide.config)?;
    }
    write_closing_slide(&mut out)?;

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

fn write_styles(out: &mut String, theme: &Theme) -> Result<()> {
    let colors = &theme.colors;
    let fonts = &theme.typography.font_family;
    writeln!(out, "<style>")?;
    writeln!(
        out,
        ":root {{ --primary: {}; --secondary: {}; --accent: {}; --background: {}; --foreground: {}; --muted: {}; --border: {}; }}",
        colors.primary, colors.secondary, colors.accent, colors.background, colors.foreground,
        colors.muted, colors.border
    )?;
    writeln!(
        out,
        "body {{ margin: 0; padding: 24px; background: {}; color: var(--foreground); font-family: '{}', sans-serif; }}",
        if theme.gradients.background.is_empty() {
            colors.background.clone()
        } else {
            theme.gradients.background.clone()
        },
        fonts.body
    )?;
    writeln!(
        out,
        ".slide {{ width: min(1280px, 96vw); margin: 0 auto 32px; padding: 24px; box-sizing: border-box; background: var(--background); border: 1px solid var(--border); border-radius: 12px; overflow: hidden; }}"
    )?;
    writeln!(
        out,
        ".slide h1, .slide h2, .slide h3 {{ font-family: '{}', sans-serif; margin: 0; }}",
        fonts.heading
    )?;
    writeln!(
        out,
        ".grid {{ display: grid; }} .grid > .item {{ border: 1px solid color-mix(in srgb, var(--border) 40%, transparent); border-radius: 8px; padding: 12px; box-sizing: border-box; overflow: hidden; display: flex; flex-direction: column; justify-content: center; }}"
    )?;
    writeln!(
        out,
        ".hero {{ text-align: center; padding: 96px 24px; }} .hero h1 {{ color: var(--primary); font-size: 40pt; }} .hero p {{ font-size: 18pt; }}"
    )?;
    writeln!(
        out,
        ".slide-header h2 {{ color: var(--primary); font-size: 24pt; }} .slide-header p {{ margin: 4px 0 0; font-size: 14pt; }} .slide-header hr {{ border: none; border-top: 3px solid var(--primary); margin: 12px 0 0; width: 100%; }}"
    )?;
    writeln!(
        out,
        ".title-only {{ text-align: center; color: var(--primary); font-size: 26pt; margin-bottom: 16px; }}"
    )?;
    writeln!(
        out,
        ".panel {{ background: var(--muted); border: 1px solid var(--border); border-radius: 8px; display: flex; align-items: center; justify-content: center; width: 100%; height: 100%; box-sizing: border-box; }}"
    )?;
    writeln!(
        out,
        ".kpi-metric {{ font-family: '{}', monospace; font-size: 26pt; font-weight: 700; color: var(--primary); text-align: center; }} .kpi-label {{ font-size: 12pt; font-weight: 600; text-align: center; opacity: 0.85; }}",
        fonts.mono
    )?;
    writeln!(
        out,
        ".badge {{ display: inline-block; padding: 2px 8px; border-radius: 999px; font-size: 9pt; font-weight: 600; }} .badge.up {{ background: #dcfce7; color: #15803d; }} .badge.down {{ background: #fee2e2; color: #b91c1c; }} .badge.flat {{ background: #f3f4f6; color: #4b5563; }}"
    )?;
    writeln!(
        out,
        "table {{ border-collapse: collapse; width: 100%; }} th {{ background: var(--primary); color: var(--background); padding: 6px 10px; }} td {{ border: 1px solid var(--border); padding: 6px 10px; text-align: center; }} tr:nth-child(even) td {{ background: var(--muted); }}"
    )?;
    writeln!(
        out,
        "pre {{ margin: 0; padding: 12px; border-radius: 8px; overflow: auto; font-family: '{}', monospace; }} pre.dark {{ background: #1f2937; color: #f9fafb; }} pre.light {{ background: #f8fafc; color: #1e293b; }}",
        fonts.mono
    )?;
    writeln!(
        out,
        ".timeline {{ display: flex; justify-content: space-between; border-top: 2px solid var(--border); padding-top: 12px; width: 100%; }} .timeline .event {{ text-align: center; font-size: 10pt; flex: 1; }} .timeline .dot {{ width: 12px; height: 12px; border-radius: 50%; background: var(--primary); margin: -19px auto 8px; }}"
    )?;
    writeln!(
        out,
        ".notes {{ font-size: 10pt; opacity: 0.7; margin-top: 12px; border-top: 1px dashed var(--border); padding-top: 8px; }}"
    )?;
    writeln!(out, "</style>")?;
    Ok(())
}

fn write_title_slide(out: &mut String, theme: &Theme, info: &TitleSlideInfo) -> Result<()> {
    let title = info.title.as_deref().unwrap_or("Marketing Presentation");
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

    writeln!(out, "<section class=\"slide hero\">")?;
    writeln!(out, "<h1>{}</h1>", escape_html(title))?;
    writeln!(
        out,
        "<p style=\"color: {}\">{}</p>",
        theme.colors.foreground,
        escape_html(&subtitle)
    )?;
    writeln!(out, "</section>")?;
    Ok(())
}

fn write_closing_slide(out: &mut String) -> Result<()> {
    writeln!(out, "<section class=\"slide hero\">")?;
    writeln!(out, "<h1>Thank You</h1>")?;
    writeln!(out, "<p>Questions?</p>")?;
    writeln!(out, "</section>")?;
    Ok(())
}

fn write_content_slide(
    out: &mut String,
    theme: &Theme,
    layout: &LayoutTemplate,
    composed: &ComposedSlide,
    config: &SlideConfig,
) -> Result<()> {
    writeln!(out, "<section class=\"slide\">")?;
    if let Some(title) = &composed.title_block {
        writeln!(out, "<h2 class=\"title-only\">{}</h2>", escape_html(title))?;
    }

    let grid = &layout.grid;
    writeln!(
        out,
        "<div class=\"grid\" style=\"grid-template-columns: repeat({}, 1fr); grid-auto-rows: {}px; gap: {}px {}px;\">",
        grid.cols as u32, grid.row_height, grid.margin[1], grid.margin[0]
    )?;
    if let Some(header) = &composed.header {
        write_item(out, header, theme)?;
    }
    for item in &composed.items {
        write_item(out, item, theme)?;
    }
    writeln!(out, "</div>")?;

    if let Some(notes) = &config.notes {
        writeln!(out, "<aside class=\"notes\">{}</aside>", escape_html(notes))?;
    }
    writeln!(out, "</section>")?;
    Ok(())
}

fn write_item(out: &mut String, item: &DeckItem, theme: &Theme) -> Result<()> {
    write!(
        out,
        "<div class=\"item item-{}\" style=\"grid-column: {} / span {}; grid-row: {} / span {};\">",
        escape_html(item.kind.tag()),
        item.rect.x as u32 + 1,
        item.rect.w as u32,
        item.rect.y as u32 + 1,
        item.rect.h as u32
    )?;

    match &item.kind {
        ItemKind::Text(data) => {
            let size = resolve_font_size(theme, &data.size);
            let color = validate_color(data.color.as_deref())
                .unwrap_or_else(|| theme.colors.foreground.clone());
            let weight = match data.weight.as_deref() {
                Some("bold") | Some("extrabold") => "700",
                Some("semibold") => "600",
                Some("medium") => "500",
                Some("light") => "300",
                _ => "400",
            };
            write!(
                out,
                "<div style=\"font-size: {size}pt; color: {color}; text-align: {}; font-weight: {weight};\">",
                data.align.as_css()
            )?;
            write_text_content(out, &data.text)?;
            write!(out, "</div>")?;
        }
        ItemKind::RichText(data) => {
            let token = data.size.as_deref().unwrap_or("base");
            let size = rich_text_font_size(theme, token, data.role);
            let color = rich_text_color(theme, data.variant);
            let style = format!(
                "font-size: {size}pt; color: {color}; text-align: {};",
                data.align.as_css()
            );
            match data.role {
                RichTextRole::Header => write!(out, "<h2 style=\"{style}\">")?,
                RichTextRole::Subheader => write!(out, "<h3 style=\"{style}\">")?,
                RichTextRole::Blockquote => {
                    write!(out, "<blockquote style=\"{style} font-style: italic;\">")?
                }
                _ => write!(out, "<p style=\"{style} margin: 0;\">")?,
            }
            write_text_content(out, &data.content)?;
            match data.role {
                RichTextRole::Header => write!(out, "</h2>")?,
                RichTextRole::Subheader => write!(out, "</h3>")?,
                RichTextRole::Blockquote => write!(out, "</blockquote>")?,
                _ => write!(out, "</p>")?,
            }
        }
        ItemKind::List(data) => {
            let tag = if data.style == ListStyle::Numbered { "ol" } else { "ul" };
            let marker = match data.style {
                ListStyle::Checklist => " style=\"list-style: none; padding-left: 0;\"",
                _ => "",
            };
            write!(out, "<{tag}{marker}>")?;
            for entry in &data.items {
                if data.style == ListStyle::Checklist {
                    write!(out, "<li>✓ {}</li>", escape_html(entry))?;
                } else {
                    write!(out, "<li>{}</li>", escape_html(entry))?;
                }
            }
            write!(out, "</{tag}>")?;
        }
        ItemKind::Quote(data) => {
            let align = if data.align == Align::Center { "center" } else { "left" };
            write!(
                out,
                "<blockquote style=\"text-align: {align}; font-style: {}; margin: 0;\">{}</blockquote>",
                if data.variant == QuoteVariant::Minimal { "normal" } else { "italic" },
                escape_html(&data.text)
            )?;
            if let Some(author) = &data.author {
                let mut attribution = author.clone();
                if let Some(role) = &data.role {
                    attribution.push_str(&format!(", {role}"));
                }
                if let Some(company) = &data.company {
                    attribution.push_str(&format!(", {company}"));
                }
                write!(
                    out,
                    "<cite style=\"display: block; text-align: right; color: var(--primary); font-size: 10pt;\">— {}</cite>",
                    escape_html(&attribution)
                )?;
            }
        }
        ItemKind::Code(data) => {
            let class = if data.theme.as_deref() == Some("dark") { "dark" } else { "light" };
            write!(out, "<pre class=\"{class}\"><code>{}</code></pre>", escape_html(&data.code))?;
        }
        ItemKind::Note(data) => {
            let accent = data.severity.accent_hex();
            let label = data
                .title
                .clone()
                .unwrap_or_else(|| data.severity.label().to_string());
            write!(
                out,
                "<div style=\"background: {accent}14; border: 1px solid {accent}; border-radius: 8px; padding: 10px; color: #1f2937;\"><strong>{}:</strong> {}</div>",
                escape_html(&label.to_uppercase()),
                escape_html(&data.content)
            )?;
        }
        ItemKind::Header(data) => {
            write!(out, "<div class=\"slide-header\">")?;
            write!(out, "<h2>{}</h2>", escape_html(&data.title))?;
            if let Some(subtitle) = &data.subtitle {
                write!(out, "<p>{}</p>", escape_html(subtitle))?;
            }
            if data.show_divider != Some(false) {
                write!(out, "<hr>")?;
            }
            write!(out, "</div>")?;
        }
        ItemKind::KpiCard(data) => {
            write!(out, "<div class=\"kpi-metric\">")?;
            write_text_content(out, &data.metric)?;
            write!(out, "</div><div class=\"kpi-label\">{}</div>", escape_html(&data.label))?;
        }
        ItemKind::MetricCard(data) => {
            write!(
                out,
                "<div class=\"kpi-metric\">{}<span style=\"font-size: 13pt; opacity: 0.8;\"> {}</span></div>",
                format_number(data.value),
                escape_html(&data.unit)
            )?;
            write!(out, "<div class=\"kpi-label\">{}", escape_html(&data.label))?;
            if let Some(change) = data.change {
                let class = if change > 0.0 { "up" } else if change < 0.0 { "down" } else { "flat" };
                let sign = if change > 0.0 { "+" } else { "" };
                let suffix = data
                    .change_label
                    .as_deref()
                    .map(|label| format!(" {label}"))
                    .unwrap_or_default();
                write!(
                    out,
                    " <span class=\"badge {class}\">{sign}{}{}</span>",
                    format_number(change),
                    escape_html(&suffix)
                )?;
            }
            write!(out, "</div>")?;
        }
        ItemKind::Chart(data) => {
            // Native capability of this surface: inline SVG.
            if data.data.is_empty() {
                write!(out, "<div class=\"panel\">Chart: {:?}</div>", data.kind)?;
            } else {
                write_chart_svg(out, data, theme)?;
            }
        }
        ItemKind::Table(data) => {
            write!(out, "<table><thead><tr>")?;
            for header in &data.headers {
                write!(out, "<th>{}</th>", escape_html(header))?;
            }
            write!(out, "</tr></thead><tbody>")?;
            for row in &data.rows {
                write!(out, "<tr>")?;
                for cell in row {
                    write!(out, "<td>{}</td>", escape_html(cell))?;
                }
                write!(out, "</tr>")?;
            }
            write!(out, "</tbody></table>")?;
        }
        ItemKind::PhotoCard(data) => {
            // The preview never embeds files from disk: placeholder with alt.
            let alt = if data.alt.is_empty() { "Image Placeholder" } else { data.alt.as_str() };
            write!(out, "<div class=\"panel\">{}</div>", escape_html(alt))?;
            if let Some(caption) = &data.caption {
                write!(
                    out,
                    "<div style=\"text-align: center; font-size: 9pt; margin-top: 4px;\">{}</div>",
                    escape_html(caption)
                )?;
            }
        }
        ItemKind::Testimonial(data) => {
            write!(out, "<blockquote style=\"font-style: italic; margin: 0;\">\u{201C}")?;
            write_text_content(out, &data.quote)?;
            write!(out, "\u{201D}</blockquote>")?;
            let author = data.author.as_deref().unwrap_or("Anonymous");
            write!(
                out,
                "<cite style=\"display: block; text-align: right; color: var(--primary);\">— {}</cite>",
                escape_html(author)
            )?;
        }
        ItemKind::Timeline(data) => {
            let count = data.events.len().max(3);
            write!(out, "<div class=\"timeline\">")?;
            for index in 0..count {
                write!(out, "<div class=\"event\"><div class=\"dot\"></div>")?;
                match data.events.get(index) {
                    Some(event) => {
                        if let Some(date) = &event.date {
                            write!(out, "<strong>{}</strong><br>", escape_html(date))?;
                        }
                        write!(
                            out,
                            "{}",
                            escape_html(event.title.as_deref().unwrap_or("Milestone"))
                        )?;
                    }
                    None => write!(out, "Milestone")?,
                }
                write!(out, "</div>")?;
            }
            write!(out, "</div>")?;
        }
        ItemKind::Button(data) => {
            let (background, color, border) = match data.variant {
                ButtonVariant::Primary => ("var(--primary)", "var(--background)", "var(--primary)"),
                ButtonVariant::Secondary => {
                    ("var(--secondary)", "var(--background)", "var(--secondary)")
                }
                ButtonVariant::Outline => ("transparent", "var(--foreground)", "var(--border)"),
            };
            write!(
                out,
                "<div style=\"text-align: center;\"><span style=\"display: inline-block; padding: 10px 24px; border-radius: 8px; background: {background}; color: {color}; border: 2px solid {border}; font-weight: 600;\">",
            )?;
            write_text_content(out, &data.text)?;
            write!(out, "</span></div>")?;
        }
        ItemKind::Unknown { tag, .. } => {
            write!(
                out,
                "<div class=\"panel\">Unknown item type: {}</div>",
                escape_html(tag)
            )?;
        }
    }

    writeln!(out, "</div>")?;
    Ok(())
}

/// Writes a text payload, honoring per-segment formatting overrides.
fn write_text_content(out: &mut String, content: &TextContent) -> Result<()> {
    match content {
        TextContent::Plain(text) => write!(out, "{}", escape_html(text))?,
        TextContent::Rich(segments) => {
            for segment in segments {
                let formatting = segment.formatting.clone().unwrap_or_default();
                let mut style = String::new();
                if let Some(color) = validate_color(formatting.color.as_deref()) {
                    write!(style, "color: {color};")?;
                }
                if let Some(size) = formatting.font_size {
                    write!(style, "font-size: {size}pt;")?;
                }
                if formatting.bold == Some(true) {
                    write!(style, "font-weight: 700;")?;
                }
                if formatting.italic == Some(true) {
                    write!(style, "font-style: italic;")?;
                }
                if formatting.underline == Some(true) {
                    write!(style, "text-decoration: underline;")?;
                }
                if style.is_empty() {
                    write!(out, "{}", escape_html(&segment.text))?;
                } else {
                    write!(out, "<span style=\"{style}\">{}</span>", escape_html(&segment.text))?;
                }
            }
        }
    }
    Ok(())
}

const CHART_WIDTH: f64 = 400.0;
const CHART_HEIGHT: f64 = 240.0;

/// Inline single-series SVG chart: bar, line, area, or donut pie.
fn write_chart_svg(out: &mut String, chart: &ChartData, theme: &Theme) -> Result<()> {
    let max = chart
        .data
        .iter()
        .map(|point| point.value)
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);
    let count = chart.data.len();
    let primary = &theme.colors.primary;
    let label_color = &theme.colors.foreground;

    write!(
        out,
        "<svg viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" style=\"width: 100%; height: 100%;\" role=\"img\">"
    )?;

    match chart.kind {
        ChartKind::Bar => {
            let slot = CHART_WIDTH / count as f64;
            for (index, point) in chart.data.iter().enumerate() {
                let height = (point.value / max) * 190.0;
                let x = index as f64 * slot + slot * 0.15;
                write!(
                    out,
                    "<rect x=\"{x:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{height:.1}\" fill=\"{primary}\" rx=\"3\"/>",
                    215.0 - height,
                    slot * 0.7
                )?;
                write!(
                    out,
                    "<text x=\"{:.1}\" y=\"232\" text-anchor=\"middle\" font-size=\"11\" fill=\"{label_color}\">{}</text>",
                    index as f64 * slot + slot / 2.0,
                    escape_html(&point.name)
                )?;
            }
        }
        ChartKind::Line | ChartKind::Area => {
            let step = if count > 1 {
                (CHART_WIDTH - 40.0) / (count - 1) as f64
            } else {
                0.0
            };
            let points: Vec<String> = chart
                .data
                .iter()
                .enumerate()
                .map(|(index, point)| {
                    format!(
                        "{:.1},{:.1}",
                        20.0 + index as f64 * step,
                        215.0 - (point.value / max) * 190.0
                    )
                })
                .collect();
            if chart.kind == ChartKind::Area {
                write!(
                    out,
                    "<polygon points=\"20,215 {} {:.1},215\" fill=\"{primary}\" opacity=\"0.25\"/>",
                    points.join(" "),
                    20.0 + (count.saturating_sub(1)) as f64 * step
                )?;
            }
            write!(
                out,
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{primary}\" stroke-width=\"3\"/>",
                points.join(" ")
            )?;
            for (index, point) in chart.data.iter().enumerate() {
                write!(
                    out,
                    "<text x=\"{:.1}\" y=\"232\" text-anchor=\"middle\" font-size=\"11\" fill=\"{label_color}\">{}</text>",
                    20.0 + index as f64 * step,
                    escape_html(&point.name)
                )?;
            }
        }
        ChartKind::Pie => {
            let total: f64 = chart.data.iter().map(|point| point.value).sum();
            let total = total.max(f64::EPSILON);
            let radius = 80.0;
            let circumference = std::f64::consts::TAU * radius;
            let mut offset = 0.0;
            for (index, point) in chart.data.iter().enumerate() {
                let fraction = point.value / total;
                let opacity = (1.0 - index as f64 * 0.18).max(0.25);
                write!(
                    out,
                    "<circle cx=\"200\" cy=\"110\" r=\"{radius}\" fill=\"none\" stroke=\"{primary}\" stroke-opacity=\"{opacity:.2}\" stroke-width=\"42\" stroke-dasharray=\"{:.1} {circumference:.1}\" stroke-dashoffset=\"{:.1}\" transform=\"rotate(-90 200 110)\"/>",
                    fraction * circumference,
                    -offset
                )?;
                offset += fraction * circumference;
            }
            let legend: Vec<String> = chart
                .data
                .iter()
                .map(|point| format!("{} ({})", point.name, format_number(point.value)))
                .collect();
            write!(
                out,
                "<text x=\"200\" y=\"232\" text-anchor=\"middle\" font-size=\"11\" fill=\"{label_color}\">{}</text>",
                escape_html(&legend.join(" · "))
            )?;
        }
    }

    write!(out, "</svg>")?;
    Ok(())
}

/// Escapes special characters for HTML text and attribute content.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemOverride;
    use crate::registry::registry;
    use serde_json::json;

    #[test]
    fn document_contains_all_three_slide_sections() {
        let registry = registry();
        let theme = registry.theme("metallic-earth").unwrap();
        let layout = registry.layout("data-grid-dashboard").unwrap();
        let config = SlideConfig::new("data-grid-dashboard");
        let html = render_document(
            theme,
            &TitleSlideInfo::default(),
            [HtmlSlide {
                layout_name: "data-grid-dashboard",
                layout,
                config: &config,
            }],
        )
        .unwrap();

        assert_eq!(html.matches("<section class=\"slide").count(), 3);
        assert!(html.contains("Key Performance Indicators"));
        assert!(html.contains("Thank You"));
    }

    #[test]
    fn kpi_override_shows_in_markup() {
        let registry = registry();
        let theme = registry.theme("corporate-blue").unwrap();
        let layout = registry.layout("data-grid-dashboard").unwrap();
        let config = SlideConfig::new("data-grid-dashboard").with_overrides(vec![
            ItemOverride::data("kpi1", json!({ "label": "Pipeline <Q1>" })),
        ]);
        let html = render_document(
            theme,
            &TitleSlideInfo::default(),
            [HtmlSlide {
                layout_name: "data-grid-dashboard",
                layout,
                config: &config,
            }],
        )
        .unwrap();

        assert!(html.contains("Pipeline &lt;Q1&gt;"));
        assert!(!html.contains("Pipeline <Q1>"));
    }

    #[test]
    fn chart_layout_renders_inline_svg() {
        let registry = registry();
        let theme = registry.theme("metallic-earth").unwrap();
        let layout = registry.layout("chart-showcase").unwrap();
        let config = SlideConfig::new("chart-showcase");
        let html = render_document(
            theme,
            &TitleSlideInfo::default(),
            [HtmlSlide {
                layout_name: "chart-showcase",
                layout,
                config: &config,
            }],
        )
        .unwrap();

        assert!(html.contains("<svg"));
        assert!(html.contains("<rect"));
    }
}
