//! # PDF Report Builder
//!
//! Composes the rendered blocks of every answered prompt, grouped by
//! section, into one paginated PDF document. Building is deterministic for
//! identical input (the generation date is part of the input) and never
//! fails on content: a block that cannot be laid out degrades to a fixed
//! placeholder paragraph so the rest of the document still builds.

use chrono::NaiveDate;
use printpdf::{
    BuiltinFont, Color, FontId, Layer, LayerInternalId, LinePoint, Mm, Op, PaintMode, ParsedFont,
    PdfDocument, PdfPage, PdfSaveOptions, Point, Polygon, PolygonRing, Pt, Rgb, TextItem,
    TextMatrix, TextRenderingMode, WindingOrder,
};
use promptdeck::render::{RenderBlock, BULLET_PREFIX};
use thiserror::Error;
use tracing::warn;

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to parse built-in font: {0}")]
    Font(String),
    #[error("Paragraph produced no renderable lines")]
    EmptyParagraph,
    #[error("Table has no columns")]
    EmptyTable,
}

// --- Data Structures ---

/// One answered prompt, ready for layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub section: String,
    pub number: String,
    pub title: String,
    pub blocks: Vec<RenderBlock>,
}

/// The assembled report: answered prompts in global order.
///
/// `generated_on` is an input rather than read from the clock, so the same
/// report value always serializes to the same document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub generated_on: NaiveDate,
    pub entries: Vec<ReportEntry>,
}

// --- Layout Constants ---

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const USABLE_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const TITLE_SIZE_PT: f32 = 18.0;
const SECTION_SIZE_PT: f32 = 16.0;
const PROMPT_SIZE_PT: f32 = 14.0;
const BODY_SIZE_PT: f32 = 10.0;
const TABLE_SIZE_PT: f32 = 8.0;

const BODY_LEADING_MM: f32 = 4.9;
const PARAGRAPH_GAP_MM: f32 = 2.8;
const BULLET_INDENT_MM: f32 = 5.0;
const TABLE_ROW_HEIGHT_MM: f32 = 7.0;
const CELL_PADDING_MM: f32 = 1.5;

const PT_TO_MM: f32 = 0.352_778;
/// Average Helvetica advance as a fraction of the font size; good enough
/// for wrapping and truncation against a fixed column grid.
const AVG_CHAR_WIDTH_EM: f32 = 0.5;

/// Substituted for a block that fails to lay out.
const PLACEHOLDER_TEXT: &str = "Error formatting content";

// --- Public API ---

/// Serializes the report into PDF bytes.
pub fn build_report(report: &Report) -> Result<Vec<u8>, ReportError> {
    let mut writer = PageWriter::new(&report.title)?;

    writer.title_block(&report.title, report.generated_on);

    let mut current_section: Option<&str> = None;
    for entry in &report.entries {
        if current_section != Some(entry.section.as_str()) {
            writer.section_heading(&entry.section);
            current_section = Some(entry.section.as_str());
        }

        let heading = if entry.number.is_empty() {
            entry.title.clone()
        } else {
            format!("{}. {}", entry.number, entry.title)
        };
        writer.prompt_heading(&heading);

        for block in &entry.blocks {
            let laid_out = match block {
                RenderBlock::Text(paragraphs) => writer.text_block(paragraphs),
                RenderBlock::Table(rows) => writer.table(rows),
            };
            if let Err(err) = laid_out {
                warn!("Block layout failed, inserting placeholder: {err}");
                writer.placeholder();
            }
        }
        writer.spacer(5.3);
    }

    Ok(writer.finish())
}

// --- Layout Engine ---

/// Accumulates ops for the current page and tracks the vertical cursor;
/// content that would cross the bottom margin starts a new page.
struct PageWriter {
    doc: PdfDocument,
    layer: LayerInternalId,
    body_font: FontId,
    bold_font: FontId,
    ops: Vec<Op>,
    y_mm: f32,
}

impl PageWriter {
    fn new(document_title: &str) -> Result<Self, ReportError> {
        let mut doc = PdfDocument::new(document_title);
        let layer = doc.add_layer(&Layer::new("Content"));
        let body_font = load_builtin(&mut doc, BuiltinFont::Helvetica)?;
        let bold_font = load_builtin(&mut doc, BuiltinFont::HelveticaBold)?;

        let mut writer = Self {
            doc,
            layer,
            body_font,
            bold_font,
            ops: Vec::new(),
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        };
        writer.open_page();
        Ok(writer)
    }

    fn open_page(&mut self) {
        self.ops.push(Op::BeginLayer {
            layer_id: self.layer.clone(),
        });
        self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn close_page(&mut self) {
        self.ops.push(Op::EndLayer {
            layer_id: self.layer.clone(),
        });
        let ops = std::mem::take(&mut self.ops);
        self.doc
            .pages
            .push(PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops));
    }

    fn new_page(&mut self) {
        self.close_page();
        self.open_page();
    }

    /// Starts a new page when `needed_mm` of vertical room is not left.
    fn ensure_room(&mut self, needed_mm: f32) {
        if self.y_mm - needed_mm < MARGIN_MM {
            self.new_page();
        }
    }

    fn spacer(&mut self, height_mm: f32) {
        self.y_mm -= height_mm;
    }

    fn write_line(&mut self, text: &str, font: &FontId, size_pt: f32, x_mm: f32) {
        self.ops.push(Op::SetFontSize {
            size: Pt(size_pt),
            font: font.clone(),
        });
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Mm(x_mm).into(), Mm(self.y_mm).into()),
        });
        self.ops.push(Op::SetTextRenderingMode {
            mode: TextRenderingMode::Fill,
        });
        self.ops.push(Op::WriteText {
            items: vec![TextItem::Text(text.to_string())],
            font: font.clone(),
        });
        self.ops.push(Op::EndTextSection);
    }

    fn set_fill(&mut self, color: Color) {
        self.ops.push(Op::SetFillColor { col: color });
    }

    /// Draws an axis-aligned rectangle; `y_top_mm` is the top edge.
    fn rect(&mut self, x_mm: f32, y_top_mm: f32, width_mm: f32, height_mm: f32, mode: PaintMode) {
        let corners = [
            (x_mm, y_top_mm),
            (x_mm + width_mm, y_top_mm),
            (x_mm + width_mm, y_top_mm - height_mm),
            (x_mm, y_top_mm - height_mm),
        ];
        let points = corners
            .iter()
            .map(|&(x, y)| LinePoint {
                p: Point::new(Mm(x), Mm(y)),
                bezier: false,
            })
            .collect();
        self.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing { points }],
                mode,
                winding_order: WindingOrder::NonZero,
            },
        });
    }

    // --- Blocks ---

    fn title_block(&mut self, title: &str, generated_on: NaiveDate) {
        let text = format!("{title} - {}", generated_on.format("%Y-%m-%d"));
        let width = text_width_mm(&text, TITLE_SIZE_PT);
        let x = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM);

        let font = self.bold_font.clone();
        self.spacer(8.0);
        self.set_fill(rgb(0.0, 0.0, 0.0));
        self.write_line(&text, &font, TITLE_SIZE_PT, x);
        self.spacer(7.0 + pt_to_mm(TITLE_SIZE_PT));
    }

    fn section_heading(&mut self, name: &str) {
        let font = self.bold_font.clone();
        self.ensure_room(16.0);
        self.spacer(3.5 + pt_to_mm(SECTION_SIZE_PT));
        self.set_fill(rgb(0.0, 0.0, 0.8));
        self.write_line(name, &font, SECTION_SIZE_PT, MARGIN_MM);
        self.set_fill(rgb(0.0, 0.0, 0.0));
        self.spacer(4.2);
    }

    fn prompt_heading(&mut self, heading: &str) {
        let font = self.bold_font.clone();
        self.ensure_room(12.0);
        self.spacer(pt_to_mm(PROMPT_SIZE_PT));
        self.set_fill(rgb(0.0, 0.0, 0.55));
        self.write_line(heading, &font, PROMPT_SIZE_PT, MARGIN_MM);
        self.set_fill(rgb(0.0, 0.0, 0.0));
        self.spacer(3.5);
    }

    /// Lays out one Text block: each paragraph visually separated, bullet
    /// paragraphs indented distinctly from prose.
    fn text_block(&mut self, paragraphs: &[String]) -> Result<(), ReportError> {
        for paragraph in paragraphs {
            self.paragraph(paragraph)?;
        }
        Ok(())
    }

    fn paragraph(&mut self, paragraph: &str) -> Result<(), ReportError> {
        let is_bullet = paragraph.starts_with(BULLET_PREFIX);
        let indent = if is_bullet { BULLET_INDENT_MM } else { 0.0 };
        let width = USABLE_WIDTH_MM - indent;

        let lines = wrap_text(paragraph, BODY_SIZE_PT, width);
        if lines.is_empty() {
            return Err(ReportError::EmptyParagraph);
        }

        let font = self.body_font.clone();
        for line in lines {
            self.ensure_room(BODY_LEADING_MM);
            self.spacer(BODY_LEADING_MM);
            self.write_line(&line, &font, BODY_SIZE_PT, MARGIN_MM + indent);
        }
        self.spacer(PARAGRAPH_GAP_MM);
        Ok(())
    }

    fn placeholder(&mut self) {
        let font = self.body_font.clone();
        self.ensure_room(BODY_LEADING_MM);
        self.spacer(BODY_LEADING_MM);
        self.write_line(PLACEHOLDER_TEXT, &font, BODY_SIZE_PT, MARGIN_MM);
        self.spacer(PARAGRAPH_GAP_MM);
    }

    /// Lays out a Table block as a bordered grid. The header row is bold on
    /// a shaded background and repeats after a page break.
    fn table(&mut self, rows: &[Vec<String>]) -> Result<(), ReportError> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(ReportError::EmptyTable);
        }
        let col_width = USABLE_WIDTH_MM / columns as f32;
        let header = &rows[0];

        self.ensure_room(TABLE_ROW_HEIGHT_MM * 2.0);
        self.table_row(header, col_width, true);
        for row in &rows[1..] {
            if self.y_mm - TABLE_ROW_HEIGHT_MM < MARGIN_MM {
                self.new_page();
                self.table_row(header, col_width, true);
            }
            self.table_row(row, col_width, false);
        }
        self.spacer(4.2);
        Ok(())
    }

    fn table_row(&mut self, cells: &[String], col_width: f32, is_header: bool) {
        let y_top = self.y_mm;

        if is_header {
            self.set_fill(rgb(0.83, 0.83, 0.83));
            self.rect(
                MARGIN_MM,
                y_top,
                USABLE_WIDTH_MM,
                TABLE_ROW_HEIGHT_MM,
                PaintMode::Fill,
            );
            self.set_fill(rgb(0.0, 0.0, 0.0));
        }

        self.ops.push(Op::SetOutlineColor {
            col: rgb(0.5, 0.5, 0.5),
        });
        self.ops.push(Op::SetOutlineThickness { pt: Pt(0.5) });

        let font = if is_header {
            self.bold_font.clone()
        } else {
            self.body_font.clone()
        };
        let baseline = y_top - TABLE_ROW_HEIGHT_MM + 2.2;

        for (column, cell) in cells.iter().enumerate() {
            let x = MARGIN_MM + column as f32 * col_width;
            self.rect(x, y_top, col_width, TABLE_ROW_HEIGHT_MM, PaintMode::Stroke);

            let text = truncate_to_width(cell, TABLE_SIZE_PT, col_width - 2.0 * CELL_PADDING_MM);
            self.y_mm = baseline;
            self.write_line(&text, &font, TABLE_SIZE_PT, x + CELL_PADDING_MM);
        }

        self.y_mm = y_top - TABLE_ROW_HEIGHT_MM;
    }

    fn finish(mut self) -> Vec<u8> {
        self.close_page();

        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!("PDF serialization produced {} warnings", warnings.len());
        }
        bytes
    }
}

// --- Helpers ---

fn load_builtin(doc: &mut PdfDocument, font: BuiltinFont) -> Result<FontId, ReportError> {
    let font_bytes = font.get_subset_font().bytes;
    let parsed = ParsedFont::from_bytes(&font_bytes, 0, &mut Vec::new())
        .ok_or_else(|| ReportError::Font(format!("{font:?}")))?;
    Ok(doc.add_font(&parsed))
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

fn pt_to_mm(pt: f32) -> f32 {
    pt * PT_TO_MM
}

fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * PT_TO_MM * AVG_CHAR_WIDTH_EM
}

/// Greedy word wrap against the average-advance width model. Logical lines
/// (bullet items) keep their own physical lines.
fn wrap_text(text: &str, size_pt: f32, width_mm: f32) -> Vec<String> {
    let char_width = size_pt * PT_TO_MM * AVG_CHAR_WIDTH_EM;
    let max_chars = ((width_mm / char_width).floor() as usize).max(1);

    let mut lines = Vec::new();
    for logical in text.split('\n') {
        let logical = logical.trim_end();
        if logical.is_empty() {
            continue;
        }
        if logical.chars().count() <= max_chars {
            lines.push(logical.to_string());
            continue;
        }

        let mut current = String::new();
        let mut count = 0usize;
        for word in logical.split_whitespace() {
            let word_len = word.chars().count();
            if count > 0 && count + 1 + word_len > max_chars {
                lines.push(std::mem::take(&mut current));
                count = 0;
            }
            if count > 0 {
                current.push(' ');
                count += 1;
            }
            current.push_str(word);
            count += word_len;

            // An unbreakable word longer than the line is hard-split.
            while count > max_chars {
                let head: String = current.chars().take(max_chars).collect();
                let tail: String = current.chars().skip(max_chars).collect();
                lines.push(head);
                current = tail;
                count = current.chars().count();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Truncates cell text to the column width, marking the cut with `...`.
fn truncate_to_width(text: &str, size_pt: f32, width_mm: f32) -> String {
    let char_width = size_pt * PT_TO_MM * AVG_CHAR_WIDTH_EM;
    let max_chars = ((width_mm / char_width).floor() as usize).max(1);
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
