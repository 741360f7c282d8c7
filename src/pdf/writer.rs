//! Minimal streaming PDF 1.4 writer.
//!
//! Emits each object to the sink as soon as it is complete: header and
//! font up front, one content-stream/page pair per finished page, then
//! page tree, catalog, info dictionary and cross-reference table on
//! `finish`. Content streams are uncompressed; all text uses Helvetica
//! with WinAnsi encoding.

use std::io::Write;

use crate::error::{ReportError, Result};
use crate::pdf::font::{encode_win_ansi, escape_pdf_string, text_width};

/// A4 page size in points
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;

/// Baseline-to-baseline distance as a multiple of the font size
pub const LINE_FACTOR: f64 = 1.15;

const CATALOG_OBJ: u32 = 1;
const PAGES_OBJ: u32 = 2;
const FONT_OBJ: u32 = 3;
const INFO_OBJ: u32 = 4;
const FIRST_DYNAMIC_OBJ: u32 = 5;

/// Incremental writer for a single PDF document
#[derive(Debug)]
pub struct DocumentWriter<'a, W: Write> {
    sink: &'a mut W,
    written: u64,
    offsets: Vec<(u32, u64)>,
    page_objs: Vec<u32>,
    next_obj: u32,
    creation_date: String,
}

impl<'a, W: Write> DocumentWriter<'a, W> {
    /// Start a new document, emitting the header and font object.
    ///
    /// `creation_date` is a PDF date string (`D:YYYYMMDDHHmmSS...`) for
    /// the Info dictionary.
    pub fn new(sink: &'a mut W, creation_date: &str) -> Result<Self> {
        let mut writer = Self {
            sink,
            written: 0,
            offsets: Vec::new(),
            page_objs: Vec::new(),
            next_obj: FIRST_DYNAMIC_OBJ,
            creation_date: creation_date.to_string(),
        };

        // Binary comment line marks the file as non-ASCII for transports
        writer.emit(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n")?;

        writer.begin_obj(FONT_OBJ)?;
        writer.emit(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
              /Encoding /WinAnsiEncoding >>\nendobj\n",
        )?;

        Ok(writer)
    }

    /// Emit one page: its content stream object followed by its page object
    pub fn write_page(&mut self, content: &[u8]) -> Result<()> {
        let content_obj = self.next_obj;
        let page_obj = self.next_obj + 1;
        self.next_obj += 2;

        self.begin_obj(content_obj)?;
        self.emit(format!("<< /Length {} >>\nstream\n", content.len()).as_bytes())?;
        self.emit(content)?;
        self.emit(b"\nendstream\nendobj\n")?;

        self.begin_obj(page_obj)?;
        self.emit(
            format!(
                "<< /Type /Page /Parent {PAGES_OBJ} 0 R \
                 /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 {FONT_OBJ} 0 R >> >> \
                 /Contents {content_obj} 0 R >>\nendobj\n"
            )
            .as_bytes(),
        )?;

        self.page_objs.push(page_obj);
        Ok(())
    }

    /// Number of pages emitted so far
    pub fn page_count(&self) -> usize {
        self.page_objs.len()
    }

    /// Close the document: page tree, catalog, info, xref and trailer
    pub fn finish(mut self) -> Result<()> {
        let kids: Vec<String> = self.page_objs.iter().map(|n| format!("{n} 0 R")).collect();
        let count = self.page_objs.len();

        self.begin_obj(PAGES_OBJ)?;
        self.emit(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {count} >>\nendobj\n",
                kids.join(" ")
            )
            .as_bytes(),
        )?;

        self.begin_obj(CATALOG_OBJ)?;
        self.emit(format!("<< /Type /Catalog /Pages {PAGES_OBJ} 0 R >>\nendobj\n").as_bytes())?;

        self.begin_obj(INFO_OBJ)?;
        self.emit(
            format!(
                "<< /Producer (relatorio) /CreationDate ({}) >>\nendobj\n",
                self.creation_date
            )
            .as_bytes(),
        )?;

        // Cross-reference table, entries ordered by object number
        let xref_offset = self.written;
        self.offsets.sort_by_key(|&(num, _)| num);
        let size = self.next_obj;

        self.emit(format!("xref\n0 {size}\n").as_bytes())?;
        self.emit(b"0000000000 65535 f \n")?;
        let entries: Vec<String> = self
            .offsets
            .iter()
            .map(|&(_, off)| format!("{off:010} 00000 n \n"))
            .collect();
        self.emit(entries.concat().as_bytes())?;

        self.emit(
            format!(
                "trailer\n<< /Size {size} /Root {CATALOG_OBJ} 0 R /Info {INFO_OBJ} 0 R >>\n\
                 startxref\n{xref_offset}\n%%EOF\n"
            )
            .as_bytes(),
        )?;

        self.sink.flush().map_err(ReportError::Render)
    }

    fn begin_obj(&mut self, num: u32) -> Result<()> {
        self.offsets.push((num, self.written));
        self.emit(format!("{num} 0 obj\n").as_bytes())
    }

    fn emit(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_all(bytes).map_err(ReportError::Render)?;
        self.written += bytes.len() as u64;
        Ok(())
    }
}

/// Content-stream builder for one page.
///
/// Tracks a top-down cursor inside the page margins and serializes text
/// and underline operators. Comparable in spirit to a receipt builder:
/// the caller describes lines, the builder produces operator bytes.
pub struct PageContent {
    ops: Vec<u8>,
    cursor: f64,
    margin: f64,
}

impl PageContent {
    pub fn new(margin: f64) -> Self {
        Self {
            ops: Vec::new(),
            cursor: margin,
            margin,
        }
    }

    /// Whether one more line at `size` fits above the bottom margin
    pub fn fits(&self, size: f64) -> bool {
        self.cursor + size * LINE_FACTOR <= PAGE_HEIGHT - self.margin
    }

    /// Left-aligned text line
    pub fn text_line(&mut self, text: &str, size: f64) -> &mut Self {
        self.place_text(text, size, self.margin);
        self.advance(size, 1.0)
    }

    /// Horizontally centered text line
    pub fn text_line_centered(&mut self, text: &str, size: f64) -> &mut Self {
        let encoded = encode_win_ansi(text);
        let x = (PAGE_WIDTH - text_width(&encoded, size)) / 2.0;
        self.place_encoded(&encoded, size, x.max(self.margin));
        self.advance(size, 1.0)
    }

    /// Left-aligned text line with an underline spanning the text width
    pub fn text_line_underlined(&mut self, text: &str, size: f64) -> &mut Self {
        let encoded = encode_win_ansi(text);
        let width = text_width(&encoded, size);
        let baseline = self.baseline(size);
        self.place_encoded(&encoded, size, self.margin);

        let y = baseline - 2.0;
        self.ops.extend_from_slice(
            format!(
                "0.5 w {:.2} {:.2} m {:.2} {:.2} l S\n",
                self.margin,
                y,
                self.margin + width,
                y
            )
            .as_bytes(),
        );
        self.advance(size, 1.0)
    }

    /// Advance the cursor by `lines` blank lines at `size`
    pub fn move_down(&mut self, size: f64, lines: f64) -> &mut Self {
        self.advance(size, lines)
    }

    pub fn finish(self) -> Vec<u8> {
        self.ops
    }

    fn place_text(&mut self, text: &str, size: f64, x: f64) {
        let encoded = encode_win_ansi(text);
        self.place_encoded(&encoded, size, x);
    }

    fn place_encoded(&mut self, encoded: &[u8], size: f64, x: f64) {
        let baseline = self.baseline(size);
        self.ops.extend_from_slice(
            format!("BT\n/F1 {size} Tf\n1 0 0 1 {x:.2} {baseline:.2} Tm\n(").as_bytes(),
        );
        self.ops.extend_from_slice(&escape_pdf_string(encoded));
        self.ops.extend_from_slice(b") Tj\nET\n");
    }

    fn baseline(&self, size: f64) -> f64 {
        PAGE_HEIGHT - self.cursor - size
    }

    fn advance(&mut self, size: f64, lines: f64) -> &mut Self {
        self.cursor += size * LINE_FACTOR * lines;
        self
    }
}
