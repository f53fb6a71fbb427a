//! Content generator: turns a loosely structured deck request into slide
//! declarations the assembler consumes.
//!
//! This sits outside the rendering core: it only produces [`SlideConfig`]
//! values (layout names plus item overrides). Malformed briefs surface as
//! [`DeckError::Validation`] carrying the blocking errors and any warnings,
//! so the HTTP boundary can answer 400 instead of 500.

pub mod request;

use serde_json::{json, Value};

use crate::errors::{DeckError, Result};
use crate::models::{ItemOverride, SlideConfig, TitleSlideInfo};
use crate::render::text::format_number;

pub use request::{normalize_deck_request, DeckRequest, NormalizedRequest, SectionFocus};
use request::{Chart, Metric, Section, Testimonial, Validation};

/// The generator's output: slide declarations plus the theme and title-slide
/// descriptor the brief implied, and every warning collected along the way.
#[derive(Debug, Clone)]
pub struct GeneratedDeck {
    pub theme: Option<String>,
    pub title_slide: Option<TitleSlideInfo>,
    pub assets_base_path: Option<String>,
    pub slides: Vec<SlideConfig>,
    pub warnings: Vec<String>,
}

/// Generates slide declarations from a content brief.
pub fn generate_deck_from_request(input: DeckRequest) -> Result<GeneratedDeck> {
    let Validation {
        normalized,
        warnings,
        errors,
    } = normalize_deck_request(input);
    if !errors.is_empty() {
        return Err(DeckError::Validation { errors, warnings });
    }

    let mut slides = vec![hero_slide(&normalized)];

    for section in &normalized.sections {
        if section.focus == SectionFocus::Hero {
            continue;
        }
        slides.extend(section_slides(section, &normalized));
    }

    let has_cta = normalized
        .sections
        .iter()
        .any(|section| section.focus == SectionFocus::Cta);
    if !has_cta && !normalized.takeaways.is_empty() {
        slides.push(takeaways_slide(&normalized));
    }

    Ok(GeneratedDeck {
        theme: normalized.theme.clone(),
        title_slide: Some(build_title_slide(&normalized)),
        assets_base_path: normalized.assets_base_path.clone(),
        slides,
        warnings,
    })
}

/// Pulls a deck request out of an export payload, if it carries one.
///
/// Returns `None` when the payload already names explicit slides, or when it
/// holds neither a `deckRequest` object nor any recognizable brief fields;
/// those payloads route directly to the assembler instead.
pub fn extract_deck_request_from_payload(payload: &Value) -> Option<DeckRequest> {
    let object = payload.as_object()?;

    if object
        .get("slides")
        .and_then(Value::as_array)
        .is_some_and(|slides| !slides.is_empty())
    {
        return None;
    }

    let mut candidate = match object.get("deckRequest") {
        Some(deck_request) if deck_request.is_object() => deck_request.clone(),
        _ => {
            const BRIEF_KEYS: [&str; 13] = [
                "topic",
                "subtitle",
                "audience",
                "tone",
                "goals",
                "keyMessages",
                "takeaways",
                "context",
                "sections",
                "metrics",
                "timeline",
                "testimonials",
                "callToAction",
            ];
            if !BRIEF_KEYS.iter().any(|key| object.contains_key(*key)) {
                return None;
            }
            let mut fields = serde_json::Map::new();
            for key in BRIEF_KEYS {
                if let Some(value) = object.get(key) {
                    fields.insert(key.to_string(), value.clone());
                }
            }
            Value::Object(fields)
        }
    };

    // Sibling fields fill gaps the embedded request left open.
    if let Some(request_object) = candidate.as_object_mut() {
        for key in ["theme", "titleSlide", "assetsBasePath"] {
            if !request_object.contains_key(key) {
                if let Some(value) = object.get(key) {
                    request_object.insert(key.to_string(), value.clone());
                }
            }
        }
    }

    match serde_json::from_value::<DeckRequest>(candidate) {
        Ok(request) => Some(request),
        Err(e) => {
            log::warn!("Deck request payload did not deserialize: {e}");
            None
        }
    }
}

fn build_title_slide(request: &NormalizedRequest) -> TitleSlideInfo {
    let existing = request.title_slide.clone().unwrap_or_default();
    TitleSlideInfo {
        title: existing.title.clone().or_else(|| Some(request.topic.clone())),
        subtitle: existing
            .subtitle
            .clone()
            .or_else(|| request.subtitle.clone())
            .or_else(|| build_subtitle(request)),
        author: existing.author.clone(),
        company: existing
            .company
            .clone()
            .or_else(|| request.audience.as_ref().map(|audience| format!("For {audience}"))),
        date: existing.date.clone(),
        logo: existing.logo,
    }
}

fn build_subtitle(request: &NormalizedRequest) -> Option<String> {
    if let Some(subtitle) = &request.subtitle {
        return Some(subtitle.clone());
    }
    if let Some(audience) = &request.audience {
        return Some(format!("Prepared for {audience}"));
    }
    request
        .goals
        .first()
        .or_else(|| request.key_messages.first())
        .cloned()
}

fn hero_slide(request: &NormalizedRequest) -> SlideConfig {
    let subtitle = build_subtitle(request);
    let supporting = if request.goals.is_empty() {
        request
            .key_messages
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(" • ")
    } else {
        request.goals.join(" • ")
    };

    let subtitle_text = subtitle
        .clone()
        .or_else(|| (!supporting.is_empty()).then(|| supporting.clone()))
        .unwrap_or_else(|| "Prepared Presentation".to_string());

    SlideConfig {
        layout: "bold-minimalist-hero".to_string(),
        title: Some(request.topic.clone()),
        subtitle,
        description: (!supporting.is_empty())
            .then(|| supporting.clone())
            .or_else(|| request.context_paragraphs.first().cloned()),
        items: vec![
            ItemOverride::data(
                "title",
                json!({ "content": request.topic, "type": "header", "size": "5xl", "align": "center" }),
            ),
            ItemOverride::data(
                "subtitle",
                json!({ "content": subtitle_text, "type": "subheader", "size": "xl", "align": "center", "variant": "muted" }),
            ),
        ],
        notes: (!supporting.is_empty()).then_some(supporting),
    }
}

fn section_slides(section: &Section, request: &NormalizedRequest) -> Vec<SlideConfig> {
    match section.focus {
        SectionFocus::Metrics => metric_slides(section),
        SectionFocus::Chart => chart_slides(section),
        SectionFocus::Timeline => timeline_slides(section),
        SectionFocus::Testimonials => testimonial_slides(section),
        SectionFocus::Cta => cta_slide(section, request),
        SectionFocus::Comparison => comparison_slides(section),
        SectionFocus::Product => product_slides(section),
        _ => narrative_slides(section),
    }
}

fn kpi_override(metric: Option<&Metric>) -> Value {
    match metric {
        Some(metric) => {
            let label = match metric.change {
                Some(change) => {
                    let sign = if change > 0.0 { "+" } else { "" };
                    let suffix = metric
                        .change_label
                        .as_deref()
                        .map(|label| format!(" {label}"))
                        .unwrap_or_default();
                    format!("{} ({sign}{}{suffix})", metric.label, format_number(change))
                }
                None => metric.label.clone(),
            };
            json!({ "metric": metric.value, "label": label, "icon": "bar-chart-3" })
        }
        None => json!({ "metric": "—", "label": "—", "icon": "bar-chart-3" }),
    }
}

fn metric_slides(section: &Section) -> Vec<SlideConfig> {
    if section.metrics.is_empty() {
        return Vec::new();
    }

    section
        .metrics
        .chunks(4)
        .enumerate()
        .map(|(index, chunk)| SlideConfig {
            layout: "data-grid-dashboard".to_string(),
            title: Some(if index == 0 {
                section.title.clone()
            } else {
                format!("{} (cont.)", section.title)
            }),
            subtitle: section.narrative.clone(),
            description: (!section.bullets.is_empty())
                .then(|| section.bullets.join(" • "))
                .or_else(|| section.narrative.clone()),
            items: (0..4)
                .map(|slot| {
                    ItemOverride::data(format!("kpi{}", slot + 1), kpi_override(chunk.get(slot)))
                })
                .collect(),
            notes: section.narrative.clone(),
        })
        .collect()
}

fn chart_slides(section: &Section) -> Vec<SlideConfig> {
    let Some(chart) = &section.chart else {
        return Vec::new();
    };

    let legend_lines = chart_legend(chart);
    let points = single_series_points(chart);

    vec![SlideConfig {
        layout: "chart-showcase".to_string(),
        title: Some(section.title.clone()),
        subtitle: section.narrative.clone(),
        description: (!legend_lines.is_empty())
            .then(|| legend_lines.join(" • "))
            .or_else(|| (!section.bullets.is_empty()).then(|| section.bullets.join(" • "))),
        items: vec![
            ItemOverride::data(
                "chart",
                json!({
                    "type": chart.kind,
                    "label": chart.series.first().map(|series| series.name.clone()).unwrap_or_else(|| "Series".to_string()),
                    "data": points,
                }),
            ),
            ItemOverride::data(
                "legend",
                json!({
                    "content": if legend_lines.is_empty() {
                        section.narrative.clone().unwrap_or_else(|| "Key insights from the data.".to_string())
                    } else {
                        legend_lines.join("\n")
                    },
                    "type": "paragraph",
                    "size": "sm",
                    "align": "left",
                }),
            ),
        ],
        notes: section.narrative.clone(),
    }]
}

/// Collapses the first series into the single-series `{name, value}` pairs
/// the chart item consumes.
fn single_series_points(chart: &Chart) -> Vec<Value> {
    let Some(primary) = chart.series.first() else {
        return chart
            .categories
            .iter()
            .map(|name| json!({ "name": name, "value": 0.0 }))
            .collect();
    };
    chart
        .categories
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let value = primary
                .values
                .get(index)
                .copied()
                .flatten()
                .filter(|value| value.is_finite())
                .unwrap_or(0.0);
            json!({ "name": name, "value": value })
        })
        .collect()
}

fn chart_legend(chart: &Chart) -> Vec<String> {
    let mut lines: Vec<String> = chart
        .series
        .iter()
        .map(|series| format!("{}: {}", series.name, describe_trend(&series.values)))
        .collect();
    if let Some(summary) = &chart.summary {
        lines.push(summary.clone());
    }
    lines
}

fn describe_trend(values: &[Option<f64>]) -> String {
    let numeric: Vec<f64> = values
        .iter()
        .filter_map(|value| value.filter(|v| v.is_finite()))
        .collect();
    if numeric.len() < 2 {
        return "Stable performance".to_string();
    }
    let first = numeric[0];
    let last = numeric[numeric.len() - 1];
    let diff = last - first;
    let direction = if diff > 0.0 {
        "increase"
    } else if diff < 0.0 {
        "decrease"
    } else {
        "stable"
    };
    if first != 0.0 {
        let percent = (diff / first.abs()) * 100.0;
        format!(
            "{direction} ({}{:.1}%)",
            if percent >= 0.0 { "+" } else { "" },
            percent
        )
    } else {
        format!("{direction} ({diff:.1})")
    }
}

fn timeline_slides(section: &Section) -> Vec<SlideConfig> {
    if section.timeline.is_empty() {
        return Vec::new();
    }
    let events: Vec<Value> = section
        .timeline
        .iter()
        .map(|event| {
            json!({
                "date": event.date.clone().unwrap_or_default(),
                "title": event.title,
                "description": event.description.clone().unwrap_or_default(),
            })
        })
        .collect();

    vec![SlideConfig {
        layout: "timeline-roadmap".to_string(),
        title: Some(section.title.clone()),
        subtitle: section.narrative.clone(),
        description: (!section.bullets.is_empty())
            .then(|| section.bullets.join(" • "))
            .or_else(|| section.narrative.clone()),
        items: vec![ItemOverride::data("timeline", json!({ "events": events }))],
        notes: section.narrative.clone(),
    }]
}

fn testimonial_override(testimonial: Option<&Testimonial>) -> Value {
    match testimonial {
        Some(testimonial) => json!({
            "quote": testimonial.quote,
            "author": testimonial.author.clone().unwrap_or_else(|| "Anonymous".to_string()),
            "role": testimonial.role,
            "company": testimonial.company,
        }),
        None => json!({
            "quote": "Customer feedback placeholder.",
            "author": "Client Name",
        }),
    }
}

fn testimonial_slides(section: &Section) -> Vec<SlideConfig> {
    if section.testimonials.is_empty() {
        return Vec::new();
    }

    section
        .testimonials
        .chunks(2)
        .enumerate()
        .map(|(index, pair)| SlideConfig {
            layout: "testimonial-gallery".to_string(),
            title: Some(if index == 0 {
                section.title.clone()
            } else {
                format!("{} (cont.)", section.title)
            }),
            subtitle: section.narrative.clone(),
            description: (!section.bullets.is_empty()).then(|| section.bullets.join(" • ")),
            items: vec![
                ItemOverride::data("testimonial1", testimonial_override(pair.first())),
                ItemOverride::data("testimonial2", testimonial_override(pair.get(1))),
            ],
            notes: None,
        })
        .collect()
}

fn cta_slide(section: &Section, request: &NormalizedRequest) -> Vec<SlideConfig> {
    let headline = section
        .call_to_action
        .as_ref()
        .and_then(|cta| cta.headline.clone())
        .unwrap_or_else(|| section.title.clone());
    let subheadline = section
        .call_to_action
        .as_ref()
        .and_then(|cta| cta.subheadline.clone())
        .or_else(|| section.narrative.clone())
        .or_else(|| request.takeaways.first().cloned())
        .or_else(|| build_subtitle(request));
    let button_label = section
        .call_to_action
        .as_ref()
        .and_then(|cta| cta.button_label.clone())
        .unwrap_or_else(|| "Get Started".to_string());
    let url = section.call_to_action.as_ref().and_then(|cta| cta.url.clone());

    vec![SlideConfig {
        layout: "call-to-action".to_string(),
        title: Some(if section.title.is_empty() {
            "Next Steps".to_string()
        } else {
            section.title.clone()
        }),
        subtitle: subheadline,
        description: section.narrative.clone(),
        items: vec![
            ItemOverride::data(
                "cta-text",
                json!({ "content": headline, "type": "header", "size": "4xl", "align": "center" }),
            ),
            ItemOverride::data(
                "cta-button",
                json!({ "text": button_label, "variant": "primary", "href": url }),
            ),
        ],
        notes: None,
    }]
}

fn comparison_slides(section: &Section) -> Vec<SlideConfig> {
    let Some(table) = &section.table else {
        return narrative_slides(section);
    };
    vec![SlideConfig {
        layout: "comparison-table".to_string(),
        title: Some(section.title.clone()),
        subtitle: section.narrative.clone(),
        description: (!section.bullets.is_empty()).then(|| section.bullets.join(" • ")),
        items: vec![ItemOverride::data(
            "table",
            json!({ "headers": table.headers, "rows": table.rows }),
        )],
        notes: None,
    }]
}

fn product_slides(section: &Section) -> Vec<SlideConfig> {
    let Some(src) = section.image.as_ref().and_then(|image| image.src.clone()) else {
        return narrative_slides(section);
    };
    let image = section.image.as_ref().expect("image checked above");

    vec![SlideConfig {
        layout: "photo-narrative-flow".to_string(),
        title: Some(section.title.clone()),
        subtitle: section.narrative.clone(),
        description: (!section.bullets.is_empty()).then(|| section.bullets.join(" • ")),
        items: vec![
            ItemOverride::data(
                "image1",
                json!({
                    "src": src,
                    "alt": image.alt.clone().unwrap_or_else(|| section.title.clone()),
                    "caption": image.caption,
                }),
            ),
            ItemOverride::data(
                "text1",
                json!({ "content": narrative_content(section), "type": "paragraph", "size": "lg", "align": "left" }),
            ),
        ],
        notes: None,
    }]
}

fn narrative_slides(section: &Section) -> Vec<SlideConfig> {
    let content = narrative_content(section);
    vec![SlideConfig {
        layout: "content-slide".to_string(),
        title: Some(section.title.clone()),
        subtitle: section
            .narrative
            .clone()
            .or_else(|| (!section.bullets.is_empty()).then(|| section.bullets.join(" • "))),
        description: section.narrative.clone(),
        items: vec![ItemOverride::data(
            "content",
            json!({
                "content": if content.is_empty() { section.title.clone() } else { content },
                "type": "paragraph",
                "size": "base",
                "align": "left",
            }),
        )],
        notes: section.raw_context.clone(),
    }]
}

fn narrative_content(section: &Section) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(narrative) = &section.narrative {
        parts.push(narrative.clone());
    }
    if !section.bullets.is_empty() {
        parts.push(
            section
                .bullets
                .iter()
                .map(|bullet| format!("• {bullet}"))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    if parts.is_empty() && !section.metrics.is_empty() {
        parts.push(
            section
                .metrics
                .iter()
                .map(|metric| format!("{}: {}", metric.label, metric.value))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    parts.join("\n\n")
}

fn takeaways_slide(request: &NormalizedRequest) -> SlideConfig {
    let content = request
        .takeaways
        .iter()
        .map(|takeaway| format!("• {takeaway}"))
        .collect::<Vec<_>>()
        .join("\n");
    SlideConfig {
        layout: "content-slide".to_string(),
        title: Some("Key Takeaways".to_string()),
        subtitle: build_subtitle(request),
        description: Some(request.takeaways.join(" • ")),
        items: vec![ItemOverride::data(
            "content",
            json!({
                "content": if content.is_empty() { "Summaries of the most important outcomes.".to_string() } else { content },
                "type": "paragraph",
                "size": "lg",
                "align": "left",
            }),
        )],
        notes: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_brief_fails_with_structured_errors() {
        let error = generate_deck_from_request(DeckRequest::default()).unwrap_err();
        match error {
            DeckError::Validation { errors, .. } => {
                assert!(errors.iter().any(|e| e.contains("Topic")));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn metrics_brief_generates_hero_plus_dashboard() {
        let request: DeckRequest = serde_json::from_value(json!({
            "topic": "Q4 Business Review",
            "audience": "Board",
            "metrics": [
                { "label": "Revenue", "value": 2500000, "change": 18 },
                { "label": "Users", "value": "150k" }
            ],
            "takeaways": ["Momentum is strong"]
        }))
        .unwrap();

        let deck = generate_deck_from_request(request).unwrap();
        assert_eq!(deck.slides[0].layout, "bold-minimalist-hero");
        assert_eq!(deck.slides[1].layout, "data-grid-dashboard");
        // Four KPI slots are always filled, padded with blanks.
        assert_eq!(deck.slides[1].items.len(), 4);
        // No CTA section, so takeaways close the deck.
        assert_eq!(deck.slides.last().unwrap().layout, "content-slide");
        let title_slide = deck.title_slide.unwrap();
        assert_eq!(title_slide.title.as_deref(), Some("Q4 Business Review"));
        assert_eq!(title_slide.company.as_deref(), Some("For Board"));
    }

    #[test]
    fn five_metrics_chunk_into_two_dashboard_slides() {
        let request: DeckRequest = serde_json::from_value(json!({
            "topic": "Metrics",
            "sections": [ { "title": "KPIs", "metrics": [
                { "label": "A", "value": 1 }, { "label": "B", "value": 2 },
                { "label": "C", "value": 3 }, { "label": "D", "value": 4 },
                { "label": "E", "value": 5 }
            ] } ]
        }))
        .unwrap();

        let deck = generate_deck_from_request(request).unwrap();
        let dashboards: Vec<_> = deck
            .slides
            .iter()
            .filter(|slide| slide.layout == "data-grid-dashboard")
            .collect();
        assert_eq!(dashboards.len(), 2);
        assert_eq!(dashboards[1].title.as_deref(), Some("KPIs (cont.)"));
    }

    #[test]
    fn payload_extraction_prefers_explicit_slides() {
        let with_slides = json!({ "slides": [ { "layout": "content-slide" } ], "topic": "X" });
        assert!(extract_deck_request_from_payload(&with_slides).is_none());

        let nested = json!({ "deckRequest": { "topic": "Launch" }, "theme": "tech-purple" });
        let request = extract_deck_request_from_payload(&nested).unwrap();
        assert_eq!(request.topic.as_deref(), Some("Launch"));
        assert_eq!(request.theme.as_deref(), Some("tech-purple"));

        let flat = json!({ "topic": "Launch", "goals": ["Grow"] });
        assert!(extract_deck_request_from_payload(&flat).is_some());

        let unrelated = json!({ "layout": "content-slide", "theme": "metallic-earth" });
        assert!(extract_deck_request_from_payload(&unrelated).is_none());
    }

    #[test]
    fn chart_section_flattens_first_series() {
        let request: DeckRequest = serde_json::from_value(json!({
            "topic": "Trends",
            "sections": [ {
                "title": "Revenue Trend",
                "chart": {
                    "type": "line",
                    "categories": ["Q1", "Q2", "Q3"],
                    "series": [ { "name": "Revenue", "values": [100, null, 180] } ]
                }
            } ]
        }))
        .unwrap();

        let deck = generate_deck_from_request(request).unwrap();
        let chart_slide = deck
            .slides
            .iter()
            .find(|slide| slide.layout == "chart-showcase")
            .unwrap();
        let chart_data = chart_slide.items[0].data.as_ref().unwrap();
        assert_eq!(chart_data["data"][1]["value"], 0.0);
        assert_eq!(chart_data["type"], "line");
        let legend = chart_slide.items[1].data.as_ref().unwrap();
        assert!(legend["content"].as_str().unwrap().contains("increase"));
    }
}
