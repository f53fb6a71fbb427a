//! Deck assembly: title slide, composed content slides, closing slide, and
//! artifact output for both render targets.
//!
//! Two operating modes exist on purpose and are not unified:
//!
//! * **Strict** ([`DeckAssembler::new`]): unknown theme or layout names are
//!   hard errors raised at resolution time, before any rendering work, so a
//!   partial artifact is never produced. Used by the CLI single-layout path
//!   and the HTTP endpoint.
//! * **Lenient** ([`DeckAssembler::lenient`]): the legacy batch path where
//!   unknown layouts are skipped with a warning and an unknown theme falls
//!   back to the registry default. Used by the CLI multi-slide batch path.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::compose::{compose_slide, GridMapping};
use crate::errors::{DeckError, Result};
use crate::models::{LayoutTemplate, SlideConfig, Theme, TitleSlideInfo};
use crate::pptx::PptxWriter;
use crate::registry::registry;
use crate::render::html::{self, HtmlSlide};
use crate::render::slide::{
    render_closing_slide, render_content_slide, render_title_slide, RenderContext,
};
use crate::render::Surface;

/// An export request: theme, content, and optional customizations.
/// Exactly one of `layout` (one-slide shorthand) or `slides` must be
/// meaningfully provided.
#[derive(Debug, Clone, Default)]
pub struct DeckOptions {
    pub theme: String,
    pub layout: Option<String>,
    pub slides: Vec<SlideConfig>,
    pub title_slide: Option<TitleSlideInfo>,
    pub assets_base_path: Option<PathBuf>,
}

struct ResolvedSlide {
    layout_name: String,
    layout: &'static LayoutTemplate,
    config: SlideConfig,
}

/// Assembles one deck per export request. Registries are shared read-only;
/// all per-slide state is recomputed per slide, so concurrent assemblers
/// never interact.
pub struct DeckAssembler {
    theme: &'static Theme,
    slides: Vec<ResolvedSlide>,
    title_slide: TitleSlideInfo,
    assets_base: Option<PathBuf>,
}

impl DeckAssembler {
    /// Strict construction: resolves the theme and every layout up front and
    /// fails fast on the first unknown name.
    pub fn new(options: DeckOptions) -> Result<Self> {
        let theme = registry().theme(&options.theme)?;
        let configs = slide_configs(&options)?;

        let mut slides = Vec::with_capacity(configs.len());
        for config in configs {
            let layout = registry().layout(&config.layout)?;
            slides.push(ResolvedSlide {
                layout_name: config.layout.clone(),
                layout,
                config,
            });
        }

        Ok(Self {
            theme,
            slides,
            title_slide: options.title_slide.unwrap_or_default(),
            assets_base: options.assets_base_path,
        })
    }

    /// Legacy batch construction: warns and skips slides whose layout is
    /// unknown, and substitutes the default theme for unknown theme names.
    pub fn lenient(options: DeckOptions) -> Result<Self> {
        let theme = registry().theme_or_default(&options.theme);
        let configs = slide_configs(&options)?;

        let slides = configs
            .into_iter()
            .filter_map(|config| {
                registry()
                    .layout_lenient(&config.layout)
                    .map(|layout| ResolvedSlide {
                        layout_name: config.layout.clone(),
                        layout,
                        config,
                    })
            })
            .collect();

        Ok(Self {
            theme,
            slides,
            title_slide: options.title_slide.unwrap_or_default(),
            assets_base: options.assets_base_path,
        })
    }

    /// Total slides in the artifact, including the title and closing slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len() + 2
    }

    /// Renders the whole deck onto a presentation surface.
    pub fn render_to(&self, surface: &mut dyn Surface) {
        info!("Starting deck generation ({} content slides)", self.slides.len());
        render_title_slide(surface, self.theme, &self.title_slide);

        let ctx = RenderContext {
            theme: self.theme,
            assets_base: self.assets_base.as_deref(),
        };
        for (index, slide) in self.slides.iter().enumerate() {
            debug!("Slide {}: {}", index + 1, slide.layout_name);
            let composed = compose_slide(&slide.layout_name, slide.layout, &slide.config);
            let mapping = GridMapping::new(&slide.layout.grid);
            render_content_slide(surface, &composed, &mapping, &ctx);
        }

        render_closing_slide(surface, self.theme);
        info!("Deck generation complete");
    }

    /// Writes the binary presentation artifact, creating the output
    /// directory first.
    pub fn write_pptx(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = PptxWriter::new();
        self.render_to(&mut writer);
        writer.save(path)?;
        info!("Wrote {} slides to {}", writer.slide_count(), path.display());
        Ok(())
    }

    /// Renders the interactive screen preview document.
    pub fn render_html(&self) -> Result<String> {
        html::render_document(
            self.theme,
            &self.title_slide,
            self.slides.iter().map(|slide| HtmlSlide {
                layout_name: &slide.layout_name,
                layout: slide.layout,
                config: &slide.config,
            }),
        )
    }
}

/// Expands the request into its slide list: explicit slides win, a single
/// layout name is shorthand for a one-slide deck.
fn slide_configs(options: &DeckOptions) -> Result<Vec<SlideConfig>> {
    if !options.slides.is_empty() {
        if options.layout.is_some() {
            warn!("Both layout and slides provided; using slides");
        }
        return Ok(options.slides.clone());
    }
    if let Some(layout) = &options.layout {
        return Ok(vec![SlideConfig::new(layout.clone())]);
    }
    Err(DeckError::InvalidRequest(
        "either a layout name or a slide list is required".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemOverride;
    use serde_json::json;

    fn options(theme: &str, layouts: &[&str]) -> DeckOptions {
        DeckOptions {
            theme: theme.to_string(),
            slides: layouts
                .iter()
                .map(|layout| SlideConfig::new(*layout))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn strict_mode_rejects_unknown_theme_before_rendering() {
        let result = DeckAssembler::new(options("no-such-theme", &["data-grid-dashboard"]));
        assert!(matches!(result, Err(DeckError::ThemeNotFound(_))));
    }

    #[test]
    fn strict_mode_rejects_unknown_layout() {
        let result = DeckAssembler::new(options("metallic-earth", &["no-such-layout"]));
        assert!(matches!(result, Err(DeckError::LayoutNotFound(_))));
    }

    #[test]
    fn lenient_mode_skips_unknown_layouts_and_keeps_the_rest() {
        let assembler = DeckAssembler::lenient(options(
            "metallic-earth",
            &["data-grid-dashboard", "no-such-layout", "chart-showcase"],
        ))
        .unwrap();
        // Two content slides survive, plus title and closing.
        assert_eq!(assembler.slide_count(), 4);
    }

    #[test]
    fn single_layout_is_one_slide_shorthand() {
        let assembler = DeckAssembler::new(DeckOptions {
            theme: "metallic-earth".to_string(),
            layout: Some("data-grid-dashboard".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(assembler.slide_count(), 3);
    }

    #[test]
    fn missing_layout_and_slides_is_an_invalid_request() {
        let result = DeckAssembler::new(DeckOptions {
            theme: "metallic-earth".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(DeckError::InvalidRequest(_))));
    }

    #[test]
    fn dashboard_deck_renders_three_slides_with_offset_kpis() {
        let assembler = DeckAssembler::new(DeckOptions {
            theme: "metallic-earth".to_string(),
            layout: Some("data-grid-dashboard".to_string()),
            ..Default::default()
        })
        .unwrap();

        let mut writer = PptxWriter::new();
        assembler.render_to(&mut writer);
        assert_eq!(writer.slide_count(), 3);
    }

    #[test]
    fn per_slide_overrides_stay_per_slide() {
        let mut first = SlideConfig::new("data-grid-dashboard");
        first.items = vec![ItemOverride::data("kpi1", json!({ "label": "Custom Label 1" }))];
        let mut second = SlideConfig::new("data-grid-dashboard");
        second.items = vec![ItemOverride::data("kpi1", json!({ "label": "Custom Label 2" }))];

        let assembler = DeckAssembler::new(DeckOptions {
            theme: "corporate-blue".to_string(),
            slides: vec![first, second],
            ..Default::default()
        })
        .unwrap();

        let html = assembler.render_html().unwrap();
        assert!(html.contains("Custom Label 1"));
        assert!(html.contains("Custom Label 2"));
        // The base metric value from the template appears on both slides.
        assert_eq!(html.matches("24%").count(), 2);
    }
}
