//! PDF rendering engine.
//!
//! Layout positions are threaded explicitly: every block-render call takes a
//! [`PageCursor`] and returns the cursor for the next block. The engine itself
//! holds only the document and its fonts.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::io::Cursor as ByteReader;

use super::layout::{Block, Table};
use super::ReportError;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 15.0;
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

pub const TITLE_SIZE: f32 = 20.0;
pub const SUB_HEADING_SIZE: f32 = 14.0;
pub const BODY_SIZE: f32 = 12.0;
pub const TABLE_SIZE: f32 = 10.0;

/// Column profile of rendered tables, in layout units.
pub const TABLE_COLUMN_UNITS: [f32; 6] = [150.0, 100.0, 100.0, 120.0, 120.0, 120.0];
pub const TABLE_ROW_HEIGHT_MM: f32 = 7.0;
const TABLE_CELL_PADDING_MM: f32 = 1.5;
const HEADER_SHADE: f32 = 0.85;

const BULLET_INDENT_MM: f32 = 5.0;
const BULLET_TEXT_INDENT_MM: f32 = 9.0;
const PT_TO_MM: f32 = 0.3528;
const LINE_SPACING: f32 = 1.4;
const BLOCK_GAP_MM: f32 = 1.5;

/// Heading size for a markdown level: 2 points smaller per level.
pub fn heading_size(level: u8) -> f32 {
    TITLE_SIZE - 2.0 * f32::from(level.clamp(1, 6))
}

/// Width of a table column in millimetres.
pub fn column_width_mm(index: usize) -> f32 {
    let total: f32 = TABLE_COLUMN_UNITS.iter().sum();
    TABLE_COLUMN_UNITS[index % TABLE_COLUMN_UNITS.len()] * CONTENT_WIDTH_MM / total
}

/// Approximate rendered width of `text` (Helvetica-like metrics).
pub fn text_width_mm(text: &str, size: f32) -> f32 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.5 } else { 1.0 })
        .sum::<f32>()
        * size
        * PT_TO_MM
}

fn line_height_mm(size: f32) -> f32 {
    size * PT_TO_MM * LINE_SPACING
}

/// Greedy word wrap against the estimated text width.
pub fn wrap_text(text: &str, size: f32, max_width_mm: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width_mm(&candidate, size) <= max_width_mm || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncate `text` so that it fits inside `max_width_mm`.
pub fn clip_text(text: &str, size: f32, max_width_mm: f32) -> String {
    let mut clipped = String::new();
    for c in text.chars() {
        clipped.push(c);
        if text_width_mm(&clipped, size) > max_width_mm {
            clipped.pop();
            break;
        }
    }
    clipped
}

/// Where the next block starts: page, layer, and the top edge (mm from the page bottom).
#[derive(Debug, Clone, Copy)]
pub struct PageCursor {
    pub page: PdfPageIndex,
    pub layer: PdfLayerIndex,
    pub y: f32,
}

pub enum FontSource<'a> {
    Builtin,
    /// TrueType bytes used for both regular and bold text.
    External(&'a [u8]),
}

pub struct PdfRenderEngine {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    builtin: bool,
}

impl PdfRenderEngine {
    pub fn new(title: &str, font: FontSource<'_>) -> Result<(Self, PageCursor), ReportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

        let (regular, bold, builtin) = match font {
            FontSource::Builtin => (
                doc.add_builtin_font(BuiltinFont::Helvetica)
                    .map_err(|e| ReportError::Font(format!("{:?}", e)))?,
                doc.add_builtin_font(BuiltinFont::HelveticaBold)
                    .map_err(|e| ReportError::Font(format!("{:?}", e)))?,
                true,
            ),
            FontSource::External(bytes) => {
                let font = doc
                    .add_external_font(ByteReader::new(bytes))
                    .map_err(|e| ReportError::Font(format!("{:?}", e)))?;
                (font.clone(), font, false)
            }
        };

        let cursor = PageCursor {
            page,
            layer,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        };

        Ok((
            Self {
                doc,
                regular,
                bold,
                builtin,
            },
            cursor,
        ))
    }

    fn layer(&self, cursor: &PageCursor) -> PdfLayerReference {
        self.doc.get_page(cursor.page).get_layer(cursor.layer)
    }

    /// Start a new page when less than `needed_mm` remains above the bottom margin.
    fn ensure_space(&self, cursor: PageCursor, needed_mm: f32) -> PageCursor {
        if cursor.y - needed_mm >= MARGIN_MM {
            return cursor;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        PageCursor {
            page,
            layer,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    /// Built-in fonts only cover Latin-1; anything else is replaced.
    fn printable(&self, text: &str) -> String {
        if !self.builtin {
            return text.to_string();
        }
        text.chars()
            .map(|c| if (c as u32) < 0x100 { c } else { '?' })
            .collect()
    }

    fn write_line(
        &self,
        cursor: PageCursor,
        x: f32,
        text: &str,
        size: f32,
        bold: bool,
    ) -> PageCursor {
        let height = line_height_mm(size);
        let cursor = self.ensure_space(cursor, height);
        let font = if bold { &self.bold } else { &self.regular };
        let baseline = cursor.y - size * PT_TO_MM;
        self.layer(&cursor)
            .use_text(self.printable(text), size, Mm(x), Mm(baseline), font);
        PageCursor {
            y: cursor.y - height,
            ..cursor
        }
    }

    fn write_wrapped(
        &self,
        mut cursor: PageCursor,
        x: f32,
        text: &str,
        size: f32,
        bold: bool,
    ) -> PageCursor {
        let width = MARGIN_MM + CONTENT_WIDTH_MM - x;
        let lines = wrap_text(text, size, width);
        if lines.is_empty() {
            return PageCursor {
                y: cursor.y - line_height_mm(size),
                ..cursor
            };
        }
        for line in lines {
            cursor = self.write_line(cursor, x, &line, size, bold);
        }
        cursor
    }

    fn fill_rect(&self, cursor: &PageCursor, x: f32, y: f32, w: f32, h: f32, shade: f32) {
        let layer = self.layer(cursor);
        let ring = vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x), Mm(y + h)), false),
        ];
        layer.set_fill_color(Color::Greyscale(Greyscale::new(shade, None)));
        layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
        layer.set_fill_color(Color::Greyscale(Greyscale::new(0.0, None)));
    }

    pub fn title(&self, cursor: PageCursor, text: &str) -> PageCursor {
        let width = text_width_mm(text, TITLE_SIZE).min(CONTENT_WIDTH_MM);
        let x = MARGIN_MM + (CONTENT_WIDTH_MM - width) / 2.0;
        let cursor = self.write_line(cursor, x, text, TITLE_SIZE, true);
        PageCursor {
            y: cursor.y - 2.0 * BLOCK_GAP_MM,
            ..cursor
        }
    }

    pub fn heading(&self, cursor: PageCursor, level: u8, text: &str) -> PageCursor {
        let cursor = PageCursor {
            y: cursor.y - BLOCK_GAP_MM,
            ..cursor
        };
        let cursor = self.write_wrapped(cursor, MARGIN_MM, text, heading_size(level), true);
        PageCursor {
            y: cursor.y - BLOCK_GAP_MM,
            ..cursor
        }
    }

    pub fn sub_heading(&self, cursor: PageCursor, text: &str) -> PageCursor {
        let cursor = self.write_wrapped(cursor, MARGIN_MM, text, SUB_HEADING_SIZE, true);
        PageCursor {
            y: cursor.y - BLOCK_GAP_MM / 2.0,
            ..cursor
        }
    }

    pub fn bullet(&self, cursor: PageCursor, text: &str) -> PageCursor {
        let cursor = self.ensure_space(cursor, line_height_mm(BODY_SIZE));
        let marker = 1.2;
        let marker_y = cursor.y - BODY_SIZE * PT_TO_MM * 0.6;
        self.fill_rect(
            &cursor,
            MARGIN_MM + BULLET_INDENT_MM,
            marker_y,
            marker,
            marker,
            0.0,
        );
        self.write_wrapped(
            cursor,
            MARGIN_MM + BULLET_TEXT_INDENT_MM,
            text,
            BODY_SIZE,
            false,
        )
    }

    pub fn paragraph(&self, cursor: PageCursor, text: &str) -> PageCursor {
        self.write_wrapped(cursor, MARGIN_MM, text, BODY_SIZE, false)
    }

    /// Render a table: shaded bold header band, plain data bands.
    ///
    /// Cells are placed by position on the fixed column profile; a row with more
    /// than six cells continues on the next band.
    pub fn table(&self, cursor: PageCursor, table: &Table) -> PageCursor {
        let mut cursor = PageCursor {
            y: cursor.y - BLOCK_GAP_MM,
            ..cursor
        };
        cursor = self.table_row(cursor, &table.header, true);
        for row in &table.rows {
            cursor = self.table_row(cursor, row, false);
        }
        PageCursor {
            y: cursor.y - BLOCK_GAP_MM,
            ..cursor
        }
    }

    fn table_row(&self, mut cursor: PageCursor, cells: &[String], header: bool) -> PageCursor {
        let columns = TABLE_COLUMN_UNITS.len();
        let bands = cells.len().div_ceil(columns).max(1);

        for band in 0..bands {
            cursor = self.ensure_space(cursor, TABLE_ROW_HEIGHT_MM);
            let bottom = cursor.y - TABLE_ROW_HEIGHT_MM;
            if header {
                self.fill_rect(
                    &cursor,
                    MARGIN_MM,
                    bottom,
                    CONTENT_WIDTH_MM,
                    TABLE_ROW_HEIGHT_MM,
                    HEADER_SHADE,
                );
            }

            let font = if header { &self.bold } else { &self.regular };
            let baseline = bottom + (TABLE_ROW_HEIGHT_MM - TABLE_SIZE * PT_TO_MM) / 2.0;
            let mut x = MARGIN_MM;
            let band_cells = cells.iter().skip(band * columns).take(columns);
            for (column, cell) in band_cells.enumerate() {
                let width = column_width_mm(column);
                let text = clip_text(cell, TABLE_SIZE, width - 2.0 * TABLE_CELL_PADDING_MM);
                self.layer(&cursor).use_text(
                    self.printable(&text),
                    TABLE_SIZE,
                    Mm(x + TABLE_CELL_PADDING_MM),
                    Mm(baseline),
                    font,
                );
                x += width;
            }

            cursor = PageCursor {
                y: bottom,
                ..cursor
            };
        }
        cursor
    }

    pub fn block(&self, cursor: PageCursor, block: &Block) -> PageCursor {
        match block {
            Block::Heading { level, text } => self.heading(cursor, *level, text),
            Block::SubHeading(text) => self.sub_heading(cursor, text),
            Block::Bullet(text) => self.bullet(cursor, text),
            Block::Table(table) => self.table(cursor, table),
            Block::Paragraph(text) => self.paragraph(cursor, text),
        }
    }

    pub fn finish(self) -> Result<Vec<u8>, ReportError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| ReportError::Pdf(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_sizes_shrink_by_two() {
        assert_eq!(heading_size(1), 18.0);
        assert_eq!(heading_size(2), 16.0);
        assert_eq!(heading_size(6), 8.0);
    }

    #[test]
    fn test_column_profile_fills_content_width() {
        let total: f32 = (0..6).map(column_width_mm).sum();
        assert!((total - CONTENT_WIDTH_MM).abs() < 0.01);
        assert!(column_width_mm(0) > column_width_mm(1));
        // Overflow cells reuse the positional widths.
        assert_eq!(column_width_mm(6), column_width_mm(0));
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = "Apply farmyard manure two weeks before sowing and irrigate lightly";
        let lines = wrap_text(text, BODY_SIZE, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, BODY_SIZE) <= 60.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_keeps_overlong_word() {
        let word = "a".repeat(200);
        assert_eq!(wrap_text(&word, BODY_SIZE, 20.0), vec![word]);
    }

    #[test]
    fn test_clip_text() {
        let clipped = clip_text("Recommended fertilizer schedule", TABLE_SIZE, 20.0);
        assert!(text_width_mm(&clipped, TABLE_SIZE) <= 20.0);
        assert!("Recommended fertilizer schedule".starts_with(&clipped));
        assert_eq!(clip_text("Rice", TABLE_SIZE, 50.0), "Rice");
    }

    #[test]
    fn test_cursor_advances_and_breaks_pages() {
        let (engine, start) = PdfRenderEngine::new("Test", FontSource::Builtin).unwrap();
        let next = engine.paragraph(start, "One line");
        assert!(next.y < start.y);

        let mut cursor = next;
        for _ in 0..200 {
            cursor = engine.paragraph(cursor, "Filler paragraph");
        }
        assert!(cursor.y >= MARGIN_MM);
        assert_ne!(cursor.page, start.page);

        let bytes = engine.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
