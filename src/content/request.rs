//! Deck request normalization: turns a loosely structured content brief into
//! a validated, fully-defaulted request the slide generator can consume.
//!
//! Input shapes are deliberately forgiving (single strings where lists are
//! expected, missing titles, half-filled charts). Normalization collects
//! human-readable warnings for recoverable gaps and blocking errors for
//! unusable briefs; the caller turns non-empty errors into a validation
//! error so HTTP surfaces can answer 400 instead of 500.

use serde::Deserialize;
use serde_json::Value;

use crate::models::TitleSlideInfo;

/// A value that may arrive as one string or a list of strings. Single
/// strings are split on newlines, semicolons, and commas.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<Value>),
}

impl StringOrList {
    fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::One(text) => text
                .split(['\n', '\r', ';', ','])
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect(),
            StringOrList::Many(values) => values
                .into_iter()
                .map(|value| match value {
                    Value::String(text) => text,
                    other => other.to_string(),
                })
                .collect(),
        }
    }
}

/// A metric value: free-form text or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricInput {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<MetricValue>,
    #[serde(default)]
    pub change: Option<f64>,
    #[serde(default)]
    pub change_label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestimonialInput {
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEventInput {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartSeriesInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub values: Vec<Option<f64>>,
    #[serde(default, rename = "colorHex")]
    pub color_hex: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartInput {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub series: Vec<ChartSeriesInput>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableInput {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToActionInput {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub subheadline: Option<String>,
    #[serde(default)]
    pub button_label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageInput {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// What a section is about; drives layout selection in the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionFocus {
    Hero,
    Overview,
    Metrics,
    Chart,
    Narrative,
    Product,
    Comparison,
    Timeline,
    Testimonials,
    Cta,
    #[default]
    Custom,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub focus: Option<SectionFocus>,
    #[serde(default)]
    pub narrative: Option<String>,
    #[serde(default)]
    pub bullets: Option<StringOrList>,
    #[serde(default)]
    pub metrics: Vec<MetricInput>,
    #[serde(default)]
    pub chart: Option<ChartInput>,
    #[serde(default)]
    pub table: Option<TableInput>,
    #[serde(default)]
    pub testimonials: Vec<TestimonialInput>,
    #[serde(default)]
    pub timeline: Vec<TimelineEventInput>,
    #[serde(default)]
    pub call_to_action: Option<CallToActionInput>,
    #[serde(default)]
    pub image: Option<ImageInput>,
    #[serde(default)]
    pub layout_hint: Option<String>,
    #[serde(default)]
    pub raw_context: Option<String>,
}

/// The loosely structured content brief accepted at the generator boundary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub goals: Option<StringOrList>,
    #[serde(default)]
    pub key_messages: Option<StringOrList>,
    #[serde(default)]
    pub takeaways: Option<StringOrList>,
    #[serde(default)]
    pub context: Option<StringOrList>,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
    #[serde(default)]
    pub metrics: Vec<MetricInput>,
    #[serde(default)]
    pub timeline: Vec<TimelineEventInput>,
    #[serde(default)]
    pub testimonials: Vec<TestimonialInput>,
    #[serde(default)]
    pub call_to_action: Option<CallToActionInput>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub title_slide: Option<TitleSlideInfo>,
    #[serde(default)]
    pub assets_base_path: Option<String>,
}

// --- Normalized shapes ---

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub change: Option<f64>,
    pub change_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Testimonial {
    pub quote: String,
    pub author: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    pub date: Option<String>,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub focus: SectionFocus,
    pub narrative: Option<String>,
    pub bullets: Vec<String>,
    pub metrics: Vec<Metric>,
    pub chart: Option<Chart>,
    pub table: Option<Table>,
    pub testimonials: Vec<Testimonial>,
    pub timeline: Vec<TimelineEvent>,
    pub call_to_action: Option<CallToActionInput>,
    pub image: Option<ImageInput>,
    pub raw_context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NormalizedRequest {
    pub topic: String,
    pub subtitle: Option<String>,
    pub audience: Option<String>,
    pub goals: Vec<String>,
    pub key_messages: Vec<String>,
    pub takeaways: Vec<String>,
    pub context_paragraphs: Vec<String>,
    pub sections: Vec<Section>,
    pub theme: Option<String>,
    pub title_slide: Option<TitleSlideInfo>,
    pub assets_base_path: Option<String>,
}

/// Outcome of normalization: the defaulted request plus everything worth
/// telling a human about.
pub struct Validation {
    pub normalized: NormalizedRequest,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

pub fn normalize_deck_request(input: DeckRequest) -> Validation {
    let mut warnings: Vec<String> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    let topic = safe_string(input.topic.as_deref());
    if topic.is_none() {
        errors.push("Topic is required.".to_string());
    }

    let goals = unique_strings(list(input.goals));
    let key_messages = unique_strings(list(input.key_messages));
    let takeaways = unique_strings(list(input.takeaways));
    let context_paragraphs = normalize_context(input.context);

    let fallback_narrative = (!context_paragraphs.is_empty())
        .then(|| context_paragraphs.join("\n\n"));
    let sections = build_sections(
        input.sections,
        input.metrics,
        input.timeline,
        input.testimonials,
        input.call_to_action,
        fallback_narrative,
        &mut warnings,
    );

    if sections.is_empty() {
        warnings.push("No sections provided; generator will synthesize defaults.".to_string());
    }

    Validation {
        normalized: NormalizedRequest {
            topic: topic.unwrap_or_else(|| "Untitled Presentation".to_string()),
            subtitle: safe_string(input.subtitle.as_deref()),
            audience: safe_string(input.audience.as_deref()),
            goals,
            key_messages,
            takeaways,
            context_paragraphs,
            sections,
            theme: safe_string(input.theme.as_deref()),
            title_slide: input.title_slide,
            assets_base_path: safe_string(input.assets_base_path.as_deref()),
        },
        warnings,
        errors,
    }
}

fn build_sections(
    inputs: Vec<SectionInput>,
    fallback_metrics: Vec<MetricInput>,
    fallback_timeline: Vec<TimelineEventInput>,
    fallback_testimonials: Vec<TestimonialInput>,
    fallback_cta: Option<CallToActionInput>,
    fallback_narrative: Option<String>,
    warnings: &mut Vec<String>,
) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for (index, section) in inputs.into_iter().enumerate() {
        let focus = section.focus.unwrap_or_else(|| infer_focus(&section));
        let title = safe_string(section.title.as_deref())
            .unwrap_or_else(|| default_title(focus, index));
        let is_cta = focus == SectionFocus::Cta;
        sections.push(Section {
            id: section
                .id
                .clone()
                .unwrap_or_else(|| section_id(&title, focus, index)),
            title,
            focus,
            narrative: safe_multiline(section.narrative.as_deref()),
            bullets: unique_strings(section.bullets.map(StringOrList::into_vec).unwrap_or_default()),
            metrics: normalize_metrics(section.metrics),
            chart: section.chart.and_then(|chart| normalize_chart(chart, warnings)),
            table: section.table.and_then(|table| normalize_table(table, warnings)),
            testimonials: normalize_testimonials(section.testimonials),
            timeline: normalize_timeline(section.timeline),
            call_to_action: section
                .call_to_action
                .or_else(|| is_cta.then(|| fallback_cta.clone()).flatten()),
            image: section.image,
            raw_context: safe_multiline(section.raw_context.as_deref()),
        });
    }

    // Top-level data fills in sections the brief did not spell out.
    if !sections.iter().any(|s| s.focus == SectionFocus::Metrics) && !fallback_metrics.is_empty() {
        sections.push(Section {
            id: section_id("Key Metrics", SectionFocus::Metrics, sections.len()),
            title: "Key Metrics".to_string(),
            focus: SectionFocus::Metrics,
            narrative: fallback_narrative.clone(),
            bullets: Vec::new(),
            metrics: normalize_metrics(fallback_metrics),
            chart: None,
            table: None,
            testimonials: Vec::new(),
            timeline: Vec::new(),
            call_to_action: None,
            image: None,
            raw_context: None,
        });
    }

    if !sections.iter().any(|s| s.focus == SectionFocus::Timeline) && !fallback_timeline.is_empty()
    {
        sections.push(Section {
            id: section_id("Roadmap", SectionFocus::Timeline, sections.len()),
            title: "Roadmap".to_string(),
            focus: SectionFocus::Timeline,
            narrative: None,
            bullets: Vec::new(),
            metrics: Vec::new(),
            chart: None,
            table: None,
            testimonials: Vec::new(),
            timeline: normalize_timeline(fallback_timeline),
            call_to_action: None,
            image: None,
            raw_context: None,
        });
    }

    if !sections
        .iter()
        .any(|s| s.focus == SectionFocus::Testimonials)
        && !fallback_testimonials.is_empty()
    {
        sections.push(Section {
            id: section_id("Testimonials", SectionFocus::Testimonials, sections.len()),
            title: "Testimonials".to_string(),
            focus: SectionFocus::Testimonials,
            narrative: None,
            bullets: Vec::new(),
            metrics: Vec::new(),
            chart: None,
            table: None,
            testimonials: normalize_testimonials(fallback_testimonials),
            timeline: Vec::new(),
            call_to_action: None,
            image: None,
            raw_context: None,
        });
    }

    if !sections.iter().any(|s| s.focus == SectionFocus::Cta) {
        if let Some(cta) = fallback_cta {
            sections.push(Section {
                id: section_id("Call to Action", SectionFocus::Cta, sections.len()),
                title: safe_string(cta.headline.as_deref())
                    .unwrap_or_else(|| "Next Steps".to_string()),
                focus: SectionFocus::Cta,
                narrative: safe_multiline(cta.subheadline.as_deref()),
                bullets: Vec::new(),
                metrics: Vec::new(),
                chart: None,
                table: None,
                testimonials: Vec::new(),
                timeline: Vec::new(),
                call_to_action: Some(cta),
                image: None,
                raw_context: None,
            });
        }
    }

    if sections.is_empty() {
        if let Some(narrative) = fallback_narrative {
            sections.push(Section {
                id: section_id("Overview", SectionFocus::Overview, 0),
                title: "Overview".to_string(),
                focus: SectionFocus::Overview,
                narrative: Some(narrative),
                bullets: Vec::new(),
                metrics: Vec::new(),
                chart: None,
                table: None,
                testimonials: Vec::new(),
                timeline: Vec::new(),
                call_to_action: None,
                image: None,
                raw_context: None,
            });
        }
    }

    sections
}

fn normalize_metrics(metrics: Vec<MetricInput>) -> Vec<Metric> {
    metrics
        .into_iter()
        .filter_map(|metric| {
            let label = safe_string(metric.label.as_deref())?;
            let value = match metric.value? {
                MetricValue::Number(number) => crate::render::text::format_number(number),
                MetricValue::Text(text) => {
                    let trimmed = text.trim().to_string();
                    if trimmed.is_empty() {
                        "—".to_string()
                    } else {
                        trimmed
                    }
                }
            };
            Some(Metric {
                label,
                value,
                change: metric.change,
                change_label: safe_string(metric.change_label.as_deref()),
            })
        })
        .collect()
}

fn normalize_testimonials(testimonials: Vec<TestimonialInput>) -> Vec<Testimonial> {
    testimonials
        .into_iter()
        .filter_map(|testimonial| {
            let quote = safe_multiline(testimonial.quote.as_deref())?;
            Some(Testimonial {
                quote,
                author: safe_string(testimonial.author.as_deref()),
                role: safe_string(testimonial.role.as_deref()),
                company: safe_string(testimonial.company.as_deref()),
            })
        })
        .collect()
}

fn normalize_timeline(events: Vec<TimelineEventInput>) -> Vec<TimelineEvent> {
    events
        .into_iter()
        .filter_map(|event| {
            let title = safe_string(event.title.as_deref())?;
            Some(TimelineEvent {
                date: safe_string(event.date.as_deref()),
                title,
                description: safe_multiline(event.description.as_deref()),
            })
        })
        .collect()
}

fn normalize_chart(chart: ChartInput, warnings: &mut Vec<String>) -> Option<Chart> {
    let categories = unique_strings(
        chart
            .categories
            .iter()
            .filter_map(|category| safe_string(Some(category.as_str())))
            .collect(),
    );
    let series: Vec<ChartSeries> = chart
        .series
        .into_iter()
        .map(|series| ChartSeries {
            name: safe_string(series.name.as_deref()).unwrap_or_else(|| "Series".to_string()),
            values: series.values,
        })
        .filter(|series| {
            series
                .values
                .iter()
                .any(|value| value.is_some_and(f64::is_finite))
        })
        .collect();

    if categories.is_empty() || series.is_empty() {
        warnings.push("Chart data lacks categories or values; skipping chart.".to_string());
        return None;
    }

    Some(Chart {
        kind: chart.kind.unwrap_or_else(|| "bar".to_string()),
        categories,
        series,
        summary: safe_multiline(chart.summary.as_deref()),
    })
}

fn normalize_table(table: TableInput, warnings: &mut Vec<String>) -> Option<Table> {
    let headers: Vec<String> = table
        .headers
        .iter()
        .filter_map(|header| safe_string(Some(header.as_str())))
        .collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .into_iter()
        .map(|row| {
            row.iter()
                .filter_map(|cell| safe_string(Some(cell.as_str())))
                .collect::<Vec<_>>()
        })
        .filter(|row: &Vec<String>| row.len() == headers.len())
        .collect();

    if headers.is_empty() || rows.is_empty() {
        warnings.push("Table data lacks headers or rows; skipping table.".to_string());
        return None;
    }

    Some(Table { headers, rows })
}

fn infer_focus(section: &SectionInput) -> SectionFocus {
    if !section.metrics.is_empty() {
        SectionFocus::Metrics
    } else if !section.timeline.is_empty() {
        SectionFocus::Timeline
    } else if !section.testimonials.is_empty() {
        SectionFocus::Testimonials
    } else if section.call_to_action.is_some() {
        SectionFocus::Cta
    } else if section.chart.is_some() {
        SectionFocus::Chart
    } else if section.table.is_some() {
        SectionFocus::Comparison
    } else if section.bullets.is_some() {
        SectionFocus::Overview
    } else if section.narrative.is_some() {
        SectionFocus::Narrative
    } else {
        SectionFocus::Custom
    }
}

fn default_title(focus: SectionFocus, index: usize) -> String {
    match focus {
        SectionFocus::Hero => "Introduction".to_string(),
        SectionFocus::Overview => "Overview".to_string(),
        SectionFocus::Metrics => "Key Metrics".to_string(),
        SectionFocus::Chart => "Data Insights".to_string(),
        SectionFocus::Product => "Product Highlights".to_string(),
        SectionFocus::Comparison => "Competitive Comparison".to_string(),
        SectionFocus::Timeline => "Roadmap".to_string(),
        SectionFocus::Testimonials => "Testimonials".to_string(),
        SectionFocus::Cta => "Next Steps".to_string(),
        _ => format!("Section {}", index + 1),
    }
}

fn normalize_context(context: Option<StringOrList>) -> Vec<String> {
    match context {
        None => Vec::new(),
        Some(StringOrList::Many(values)) => unique_strings(
            values
                .into_iter()
                .filter_map(|value| match value {
                    Value::String(text) => safe_multiline(Some(text.as_str())),
                    _ => None,
                })
                .collect(),
        ),
        Some(StringOrList::One(text)) => {
            let cleaned = match safe_multiline(Some(text.as_str())) {
                Some(cleaned) => cleaned,
                None => return Vec::new(),
            };
            unique_strings(
                cleaned
                    .split("\n\n")
                    .map(|paragraph| {
                        paragraph
                            .split_whitespace()
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .filter(|paragraph| !paragraph.is_empty())
                    .collect(),
            )
        }
    }
}

fn list(value: Option<StringOrList>) -> Vec<String> {
    value.map(StringOrList::into_vec).unwrap_or_default()
}

fn safe_string(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn safe_multiline(value: Option<&str>) -> Option<String> {
    let cleaned = value?.replace("\r\n", "\n");
    let trimmed = cleaned.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Case-insensitive order-preserving dedup.
fn unique_strings(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::new();
    for value in values {
        let trimmed = value.trim().to_string();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            unique.push(trimmed);
        }
    }
    unique
}

fn section_id(title: &str, focus: SectionFocus, index: usize) -> String {
    let slug = slugify(title);
    if !slug.is_empty() {
        return slug;
    }
    format!("{focus:?}-{index}").to_lowercase()
}

fn slugify(value: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = true;
    for character in value.to_lowercase().chars() {
        if character.is_ascii_alphanumeric() {
            slug.push(character);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_topic_is_a_blocking_error() {
        let result = normalize_deck_request(DeckRequest::default());
        assert!(result.errors.iter().any(|error| error.contains("Topic")));
        assert_eq!(result.normalized.topic, "Untitled Presentation");
    }

    #[test]
    fn string_lists_coerce_and_dedup() {
        let request: DeckRequest = serde_json::from_str(
            r#"{ "topic": "Launch", "goals": "Grow; Retain, Grow" }"#,
        )
        .unwrap();
        let result = normalize_deck_request(request);
        assert_eq!(result.normalized.goals, vec!["Grow", "Retain"]);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn top_level_metrics_become_a_section() {
        let request: DeckRequest = serde_json::from_str(
            r#"{ "topic": "Q4", "metrics": [ { "label": "Revenue", "value": 2500000 } ] }"#,
        )
        .unwrap();
        let result = normalize_deck_request(request);
        let section = &result.normalized.sections[0];
        assert_eq!(section.focus, SectionFocus::Metrics);
        assert_eq!(section.metrics[0].value, "2.5M");
    }

    #[test]
    fn incomplete_chart_warns_and_is_skipped() {
        let request: DeckRequest = serde_json::from_str(
            r#"{ "topic": "Data", "sections": [ { "title": "Trends", "chart": { "categories": [], "series": [] } } ] }"#,
        )
        .unwrap();
        let result = normalize_deck_request(request);
        assert!(result.warnings.iter().any(|warning| warning.contains("Chart")));
        assert!(result.normalized.sections[0].chart.is_none());
    }

    #[test]
    fn focus_is_inferred_from_payload_shape() {
        let request: DeckRequest = serde_json::from_str(
            r#"{ "topic": "T", "sections": [
                { "timeline": [ { "title": "Kickoff" } ] },
                { "table": { "headers": ["A"], "rows": [["1"]] } }
            ] }"#,
        )
        .unwrap();
        let result = normalize_deck_request(request);
        assert_eq!(result.normalized.sections[0].focus, SectionFocus::Timeline);
        assert_eq!(result.normalized.sections[1].focus, SectionFocus::Comparison);
        assert_eq!(result.normalized.sections[1].title, "Competitive Comparison");
    }

    #[test]
    fn context_splits_into_paragraphs() {
        let request: DeckRequest = serde_json::from_str(
            r#"{ "topic": "T", "context": "First paragraph\nstill first.\n\nSecond   paragraph." }"#,
        )
        .unwrap();
        let result = normalize_deck_request(request);
        assert_eq!(
            result.normalized.context_paragraphs,
            vec!["First paragraph still first.", "Second paragraph."]
        );
    }
}
