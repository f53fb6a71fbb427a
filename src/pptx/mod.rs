//! Presentation-file writer: a [`Surface`] implementation that encodes draw
//! operations as an OOXML (`.pptx`) archive.
//!
//! PPTX files are ZIP archives of XML parts. This writer emits the minimal
//! part set PowerPoint requires (content types, relationships, presentation,
//! one master/layout/theme, one part per slide, embedded media) and encodes
//! shapes as DrawingML. It does not emit native chart parts; its
//! [`SurfaceCaps`] advertise `charts: false`, which routes chart items
//! through the renderer's placeholder fallback.

mod parts;

use std::fs::File;
use std::io::Write as IoWrite;
use std::path::Path;

use log::warn;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::compose::InchRect;
use crate::errors::Result;
use crate::render::{ShapeStyle, Stroke, Surface, SurfaceCaps, TableCell, TextOptions, TextRun};

const EMU_PER_INCH: f64 = 914_400.0;
const EMU_PER_PT: f64 = 12_700.0;

/// Slide size in EMU: 10 × 5.625 in (16:9).
const SLIDE_CX: i64 = 9_144_000;
const SLIDE_CY: i64 = 5_143_500;

fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Normalizes `#RRGGBB` / `#RGB` / bare hex into the uppercase six-digit form
/// DrawingML expects.
fn hex(color: &str) -> String {
    let stripped = color.trim_start_matches('#');
    let expanded = if stripped.len() == 3 {
        stripped
            .chars()
            .flat_map(|c| [c, c])
            .collect::<String>()
    } else {
        stripped.to_string()
    };
    expanded.to_uppercase()
}

/// Escapes XML text content.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

struct MediaFile {
    name: String,
    bytes: Vec<u8>,
}

struct SlideContent {
    background: String,
    shapes: String,
    /// Relationship targets of embedded images, in rel-id order (rId2...).
    image_rels: Vec<String>,
    next_shape_id: u32,
}

impl SlideContent {
    fn new(background: &str) -> Self {
        Self {
            background: hex(background),
            shapes: String::new(),
            // Shape id 1 is the group; content starts at 2.
            next_shape_id: 2,
            image_rels: Vec::new(),
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_shape_id;
        self.next_shape_id += 1;
        id
    }
}

/// Builds a deck slide by slide and packages it as a `.pptx` archive.
pub struct PptxWriter {
    slides: Vec<SlideContent>,
    media: Vec<MediaFile>,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PptxWriter {
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            media: Vec::new(),
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn current(&mut self) -> &mut SlideContent {
        if self.slides.is_empty() {
            // Drawing before begin_slide is a renderer bug; keep the output
            // well-formed anyway.
            warn!("Draw operation before begin_slide; opening an implicit slide");
            self.slides.push(SlideContent::new("#FFFFFF"));
        }
        self.slides
            .last_mut()
            .expect("slides is non-empty after push")
    }

    fn fill_xml(fill: &Option<String>, alpha: &Option<f64>) -> String {
        match fill {
            Some(color) => {
                let alpha_xml = alpha
                    .map(|a| format!("<a:alpha val=\"{}\"/>", (a * 100_000.0).round() as i64))
                    .unwrap_or_default();
                format!(
                    "<a:solidFill><a:srgbClr val=\"{}\">{}</a:srgbClr></a:solidFill>",
                    hex(color),
                    alpha_xml
                )
            }
            None => "<a:noFill/>".to_string(),
        }
    }

    fn line_xml(line: &Option<Stroke>) -> String {
        match line {
            Some(stroke) => format!(
                "<a:ln w=\"{}\"><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill></a:ln>",
                (stroke.width_pt * EMU_PER_PT).round() as i64,
                hex(&stroke.color)
            ),
            None => String::new(),
        }
    }

    fn xfrm(rect: &InchRect) -> String {
        format!(
            "<a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>",
            emu(rect.x),
            emu(rect.y),
            emu(rect.w.max(0.0)),
            emu(rect.h.max(0.0))
        )
    }

    fn shape(&mut self, preset: &str, rect: &InchRect, style: &ShapeStyle) {
        let id = self.current().next_id();
        let xml = format!(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Shape {id}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\
             <p:spPr>{xfrm}<a:prstGeom prst=\"{preset}\"><a:avLst/></a:prstGeom>{fill}{line}</p:spPr>\
             <p:txBody><a:bodyPr/><a:p><a:endParaRPr lang=\"en-US\"/></a:p></p:txBody></p:sp>",
            xfrm = Self::xfrm(rect),
            fill = Self::fill_xml(&style.fill, &style.fill_alpha),
            line = Self::line_xml(&style.line),
        );
        self.current().shapes.push_str(&xml);
    }

    /// Splits box runs into paragraphs on embedded newlines.
    fn paragraphs(runs: &[TextRun]) -> Vec<Vec<(&TextRun, &str)>> {
        let mut paragraphs: Vec<Vec<(&TextRun, &str)>> = vec![Vec::new()];
        for run in runs {
            for (index, piece) in run.text.split('\n').enumerate() {
                if index > 0 {
                    paragraphs.push(Vec::new());
                }
                if !piece.is_empty() {
                    paragraphs
                        .last_mut()
                        .expect("paragraphs starts non-empty")
                        .push((run, piece));
                }
            }
        }
        paragraphs
    }

    fn run_properties(run: &TextRun, options: &TextOptions) -> String {
        let size_pt = run.font_size.unwrap_or(options.font_size);
        let bold = run.bold.unwrap_or(options.bold);
        let italic = run.italic.unwrap_or(options.italic);
        let underline = run.underline.unwrap_or(options.underline);
        let color = run.color.as_deref().unwrap_or(&options.color);

        let mut attrs = format!("lang=\"en-US\" sz=\"{}\"", (size_pt * 100.0).round() as i64);
        if bold {
            attrs.push_str(" b=\"1\"");
        }
        if italic {
            attrs.push_str(" i=\"1\"");
        }
        if underline {
            attrs.push_str(" u=\"sng\"");
        }
        if let Some(spacing) = options.char_spacing {
            attrs.push_str(&format!(" spc=\"{}\"", (spacing * 100.0).round() as i64));
        }

        format!(
            "<a:rPr {attrs}><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill><a:latin typeface=\"{}\"/></a:rPr>",
            hex(color),
            escape_xml(&options.font_face)
        )
    }
}

impl Surface for PptxWriter {
    fn caps(&self) -> SurfaceCaps {
        SurfaceCaps {
            charts: false,
            tables: true,
            images: true,
        }
    }

    fn begin_slide(&mut self, background: &str) {
        self.slides.push(SlideContent::new(background));
    }

    fn draw_rect(&mut self, rect: &InchRect, style: &ShapeStyle) {
        self.shape("rect", rect, style);
    }

    fn draw_ellipse(&mut self, rect: &InchRect, style: &ShapeStyle) {
        self.shape("ellipse", rect, style);
    }

    fn draw_line(&mut self, rect: &InchRect, stroke: &Stroke) {
        let id = self.current().next_id();
        let xml = format!(
            "<p:cxnSp><p:nvCxnSpPr><p:cNvPr id=\"{id}\" name=\"Line {id}\"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr>\
             <p:spPr><a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"0\"/></a:xfrm>\
             <a:prstGeom prst=\"line\"><a:avLst/></a:prstGeom>{}</p:spPr></p:cxnSp>",
            emu(rect.x),
            emu(rect.y),
            emu(rect.w.max(0.0)),
            Self::line_xml(&Some(stroke.clone())),
        );
        self.current().shapes.push_str(&xml);
    }

    fn draw_text(&mut self, runs: &[TextRun], rect: &InchRect, options: &TextOptions) {
        let id = self.current().next_id();

        let mut body = String::new();
        body.push_str(&format!(
            "<a:bodyPr wrap=\"square\" anchor=\"{}\"/>",
            options.valign.as_drawingml()
        ));

        let line_spacing_xml = options
            .line_spacing
            .map(|mult| {
                format!(
                    "<a:lnSpc><a:spcPct val=\"{}\"/></a:lnSpc>",
                    (mult * 100_000.0).round() as i64
                )
            })
            .unwrap_or_default();

        for paragraph in Self::paragraphs(runs) {
            body.push_str(&format!(
                "<a:p><a:pPr algn=\"{}\">{}</a:pPr>",
                options.align.as_drawingml(),
                line_spacing_xml
            ));
            for (run, piece) in paragraph {
                body.push_str(&format!(
                    "<a:r>{}<a:t>{}</a:t></a:r>",
                    Self::run_properties(run, options),
                    escape_xml(piece)
                ));
            }
            body.push_str("</a:p>");
        }

        let xml = format!(
            "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"TextBox {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
             <p:spPr>{xfrm}<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>{fill}{line}</p:spPr>\
             <p:txBody>{body}</p:txBody></p:sp>",
            xfrm = Self::xfrm(rect),
            fill = Self::fill_xml(&options.fill, &options.fill_alpha),
            line = Self::line_xml(&options.line),
        );
        self.current().shapes.push_str(&xml);
    }

    fn draw_image(&mut self, path: &Path, rect: &InchRect) -> bool {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Could not read image '{}': {e}", path.display());
                return false;
            }
        };
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !matches!(extension.as_str(), "png" | "jpg" | "jpeg" | "gif") {
            warn!(
                "Unsupported image extension '{extension}' for '{}'",
                path.display()
            );
            return false;
        }

        let media_name = format!("image{}.{extension}", self.media.len() + 1);
        self.media.push(MediaFile {
            name: media_name.clone(),
            bytes,
        });

        let slide = self.current();
        // rId1 is the slide layout; images follow.
        let rel_id = format!("rId{}", slide.image_rels.len() + 2);
        slide.image_rels.push(format!("../media/{media_name}"));

        let id = slide.next_id();
        let xml = format!(
            "<p:pic><p:nvPicPr><p:cNvPr id=\"{id}\" name=\"Picture {id}\"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>\
             <p:blipFill><a:blip r:embed=\"{rel_id}\"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>\
             <p:spPr>{}<a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr></p:pic>",
            Self::xfrm(rect),
        );
        self.current().shapes.push_str(&xml);
        true
    }

    fn draw_table(&mut self, rows: &[Vec<TableCell>], rect: &InchRect, border: &Stroke) {
        if rows.is_empty() {
            return;
        }
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return;
        }

        let id = self.current().next_id();
        let col_width = emu(rect.w) / columns as i64;
        let row_height = emu(rect.h) / rows.len() as i64;
        let border_xml = |side: &str| {
            format!(
                "<a:{side} w=\"{}\"><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill></a:{side}>",
                (border.width_pt * EMU_PER_PT).round() as i64,
                hex(&border.color)
            )
        };

        let mut grid = String::new();
        for _ in 0..columns {
            grid.push_str(&format!("<a:gridCol w=\"{col_width}\"/>"));
        }

        let mut body = String::new();
        for row in rows {
            body.push_str(&format!("<a:tr h=\"{row_height}\">"));
            for column in 0..columns {
                match row.get(column) {
                    Some(cell) => {
                        let mut attrs =
                            format!("lang=\"en-US\" sz=\"{}\"", (cell.font_size * 100.0) as i64);
                        if cell.bold {
                            attrs.push_str(" b=\"1\"");
                        }
                        body.push_str(&format!(
                            "<a:tc><a:txBody><a:bodyPr/><a:p><a:pPr algn=\"{}\"/>\
                             <a:r><a:rPr {attrs}><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>\
                             <a:latin typeface=\"{}\"/></a:rPr><a:t>{}</a:t></a:r></a:p></a:txBody>\
                             <a:tcPr>{}{}{}{}<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill></a:tcPr></a:tc>",
                            cell.align.as_drawingml(),
                            hex(&cell.color),
                            escape_xml(&cell.font_face),
                            escape_xml(&cell.text),
                            border_xml("lnL"),
                            border_xml("lnR"),
                            border_xml("lnT"),
                            border_xml("lnB"),
                            hex(&cell.fill),
                        ));
                    }
                    None => body.push_str(
                        "<a:tc><a:txBody><a:bodyPr/><a:p/></a:txBody><a:tcPr/></a:tc>",
                    ),
                }
            }
            body.push_str("</a:tr>");
        }

        let xml = format!(
            "<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id=\"{id}\" name=\"Table {id}\"/>\
             <p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>\
             <p:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></p:xfrm>\
             <a:graphic><a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/table\">\
             <a:tbl><a:tblPr firstRow=\"1\" bandRow=\"1\"/><a:tblGrid>{grid}</a:tblGrid>{body}</a:tbl>\
             </a:graphicData></a:graphic></p:graphicFrame>",
            emu(rect.x),
            emu(rect.y),
            emu(rect.w),
            emu(rect.h),
        );
        self.current().shapes.push_str(&xml);
    }
}

impl PptxWriter {
    /// Packages all slides into a `.pptx` archive at `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let slide_count = self.slides.len();

        let mut write_part = |name: &str, content: &str| -> Result<()> {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
            Ok(())
        };

        write_part("[Content_Types].xml", &parts::content_types(slide_count))?;
        write_part("_rels/.rels", parts::ROOT_RELS)?;
        write_part("docProps/app.xml", &parts::app_xml(slide_count))?;
        write_part("docProps/core.xml", &parts::core_xml())?;
        write_part("ppt/presentation.xml", &parts::presentation_xml(slide_count))?;
        write_part(
            "ppt/_rels/presentation.xml.rels",
            &parts::presentation_rels(slide_count),
        )?;
        write_part("ppt/slideMasters/slideMaster1.xml", parts::SLIDE_MASTER)?;
        write_part(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            parts::SLIDE_MASTER_RELS,
        )?;
        write_part("ppt/slideLayouts/slideLayout1.xml", parts::SLIDE_LAYOUT)?;
        write_part(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            parts::SLIDE_LAYOUT_RELS,
        )?;
        write_part("ppt/theme/theme1.xml", parts::THEME)?;

        for (index, slide) in self.slides.iter().enumerate() {
            let number = index + 1;
            write_part(
                &format!("ppt/slides/slide{number}.xml"),
                &parts::slide_xml(&slide.background, &slide.shapes),
            )?;
            write_part(
                &format!("ppt/slides/_rels/slide{number}.xml.rels"),
                &parts::slide_rels(&slide.image_rels),
            )?;
        }

        for media in &self.media {
            zip.start_file(format!("ppt/media/{}", media.name), options)?;
            zip.write_all(&media.bytes)?;
        }

        zip.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Align;

    #[test]
    fn hex_normalization() {
        assert_eq!(hex("#a67c52"), "A67C52");
        assert_eq!(hex("#abc"), "AABBCC");
        assert_eq!(hex("FFFFFF"), "FFFFFF");
    }

    #[test]
    fn paragraph_split_on_newlines() {
        let runs = vec![TextRun::plain("one\ntwo"), TextRun::plain(" more")];
        let paragraphs = PptxWriter::paragraphs(&runs);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].len(), 1);
        assert_eq!(paragraphs[1].len(), 2);
        assert_eq!(paragraphs[1][0].1, "two");
    }

    #[test]
    fn text_ops_emit_runs_with_overrides() {
        let mut writer = PptxWriter::new();
        writer.begin_slide("#FFFFFF");
        writer.draw_text(
            &[
                TextRun::plain("plain "),
                TextRun {
                    text: "loud".to_string(),
                    bold: Some(true),
                    color: Some("#FF0000".to_string()),
                    ..Default::default()
                },
            ],
            &InchRect::new(1.0, 1.0, 4.0, 1.0),
            &TextOptions {
                font_size: 18.0,
                align: Align::Center,
                ..Default::default()
            },
        );

        let shapes = &writer.slides[0].shapes;
        assert!(shapes.contains("algn=\"ctr\""));
        assert!(shapes.contains("sz=\"1800\""));
        assert!(shapes.contains("b=\"1\""));
        assert!(shapes.contains("FF0000"));
    }

    #[test]
    fn writes_a_zip_with_one_part_per_slide() {
        let mut writer = PptxWriter::new();
        writer.begin_slide("#F7F3EC");
        writer.begin_slide("#F7F3EC");

        let path = std::env::temp_dir().join("deckgrid-writer-test.pptx");
        writer.save(&path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"ppt/slides/slide1.xml".to_string()));
        assert!(names.contains(&"ppt/slides/slide2.xml".to_string()));
        assert!(names.contains(&"[Content_Types].xml".to_string()));
        std::fs::remove_file(&path).ok();
    }
}
