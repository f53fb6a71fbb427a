//! Command-line surface: generate decks, render previews, list registries,
//! and run the export server.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;

use crate::assemble::{DeckAssembler, DeckOptions};
use crate::models::{SlideConfig, TitleSlideInfo};
use crate::registry::registry;
use crate::server;

#[derive(Parser)]
#[command(name = "deckgrid")]
#[command(version, about = "Grid-based marketing deck generator")]
#[command(long_about = "Generate marketing decks from declarative layout templates.\n\n\
    Examples:\n  \
    deckgrid generate --layout data-grid-dashboard --theme metallic-earth\n  \
    deckgrid generate --slides \"bold-minimalist-hero,data-grid-dashboard\" -t tech-purple\n  \
    deckgrid preview -l chart-showcase -o review.html\n  \
    deckgrid list-layouts")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a PPTX deck from layout templates
    Generate {
        /// Single layout template
        #[arg(short, long)]
        layout: Option<String>,

        /// Multiple layouts: "layout1,layout2,layout3"
        #[arg(long)]
        slides: Option<String>,

        /// Visual theme
        #[arg(short, long, default_value = "metallic-earth")]
        theme: String,

        /// Output filename (relative paths land under output/)
        #[arg(short, long, default_value = "deck.pptx")]
        output: PathBuf,

        /// JSON file with custom slides, theme, and title-slide data
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Render the interactive HTML preview of a deck
    Preview {
        /// Single layout template
        #[arg(short, long)]
        layout: Option<String>,

        /// Multiple layouts: "layout1,layout2,layout3"
        #[arg(long)]
        slides: Option<String>,

        /// Visual theme
        #[arg(short, long, default_value = "metallic-earth")]
        theme: String,

        /// Output filename (relative paths land under output/)
        #[arg(short, long, default_value = "deck.html")]
        output: PathBuf,

        /// JSON file with custom slides, theme, and title-slide data
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List available layouts
    ListLayouts,

    /// List available themes
    ListThemes,

    /// Run the HTTP export server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

/// Optional `--input` JSON: overrides for theme, slides, and title slide.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InputFile {
    theme: Option<String>,
    #[serde(default)]
    slides: Vec<SlideConfig>,
    title_slide: Option<TitleSlideInfo>,
    assets_base_path: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Generate {
                layout,
                slides,
                theme,
                output,
                input,
            } => {
                let (assembler, batch) = build_assembler(layout, slides, theme, input)?;
                let output = resolve_output_path(&output);
                println!(
                    "Generating {} slide deck -> {}",
                    assembler.slide_count(),
                    output.display()
                );
                if batch {
                    log::debug!("Batch mode: unknown layouts were skipped, not fatal");
                }
                assembler
                    .write_pptx(&output)
                    .with_context(|| format!("writing {}", output.display()))?;
                println!("Deck generated successfully: {}", output.display());
                Ok(())
            }
            Commands::Preview {
                layout,
                slides,
                theme,
                output,
                input,
            } => {
                let (assembler, _) = build_assembler(layout, slides, theme, input)?;
                let output = resolve_output_path(&output);
                let html = assembler.render_html()?;
                if let Some(parent) = output.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                std::fs::write(&output, html)
                    .with_context(|| format!("writing {}", output.display()))?;
                println!("Preview written: {}", output.display());
                Ok(())
            }
            Commands::ListLayouts => {
                println!("Available Layouts");
                println!("=================");
                for (key, description) in registry().layout_names() {
                    println!("  {key}: {description}");
                }
                Ok(())
            }
            Commands::ListThemes => {
                println!("Available Themes");
                println!("================");
                for (key, name) in registry().theme_names() {
                    println!("  {key}: {name}");
                }
                Ok(())
            }
            Commands::Serve { port } => {
                actix_web::rt::System::new().block_on(server::run(port))?;
                Ok(())
            }
        }
    }
}

/// Resolves CLI flags and the optional input file into an assembler.
/// Returns the assembler plus whether the legacy batch (lenient) path was
/// taken: multi-slide requests tolerate unknown layouts, a single explicit
/// layout does not.
fn build_assembler(
    layout: Option<String>,
    slides_arg: Option<String>,
    theme: String,
    input: Option<PathBuf>,
) -> anyhow::Result<(DeckAssembler, bool)> {
    let input_data: InputFile = match &input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading input file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing input file {}", path.display()))?
        }
        None => InputFile::default(),
    };

    let mut slides: Vec<SlideConfig> = input_data.slides;
    if slides.is_empty() {
        if let Some(list) = &slides_arg {
            slides = list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(SlideConfig::new)
                .collect();
        }
    }

    // The input file's theme wins over the CLI default.
    let theme = input_data.theme.unwrap_or(theme);
    let batch = !slides.is_empty();
    let layout = if batch {
        None
    } else {
        Some(layout.unwrap_or_else(|| "data-grid-dashboard".to_string()))
    };

    let options = DeckOptions {
        theme,
        layout,
        slides,
        title_slide: input_data.title_slide,
        assets_base_path: input_data.assets_base_path,
    };

    let assembler = if batch {
        // Legacy batch path: warn-and-skip on unknown layouts.
        DeckAssembler::lenient(options)?
    } else {
        DeckAssembler::new(options)?
    };
    Ok((assembler, batch))
}

/// Rewrites relative output paths to live under `output/` unless they are
/// absolute or already so-prefixed.
pub fn resolve_output_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.starts_with("output") {
        return path.to_path_buf();
    }
    Path::new("output").join(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_outputs_are_rewritten_under_output() {
        assert_eq!(
            resolve_output_path(Path::new("deck.pptx")),
            PathBuf::from("output/deck.pptx")
        );
        assert_eq!(
            resolve_output_path(Path::new("output/deck.pptx")),
            PathBuf::from("output/deck.pptx")
        );
        assert_eq!(
            resolve_output_path(Path::new("/tmp/deck.pptx")),
            PathBuf::from("/tmp/deck.pptx")
        );
    }

    #[test]
    fn batch_flag_takes_the_lenient_path() {
        let (assembler, batch) = build_assembler(
            None,
            Some("data-grid-dashboard,no-such-layout".to_string()),
            "metallic-earth".to_string(),
            None,
        )
        .unwrap();
        assert!(batch);
        // The unknown layout was skipped: title + one content + closing.
        assert_eq!(assembler.slide_count(), 3);
    }

    #[test]
    fn single_unknown_layout_is_fatal() {
        let result = build_assembler(
            Some("no-such-layout".to_string()),
            None,
            "metallic-earth".to_string(),
            None,
        );
        assert!(result.is_err());
    }
}
