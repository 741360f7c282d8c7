use chrono::{DateTime, Utc};
use std::io::Write;

use crate::billing::ReportResult;
use crate::error::Result;
use crate::pdf::{DocumentWriter, PageContent};
use crate::report::layout::{
    self, BODY_SIZE, COLUMN_HEADER, PAGE_MARGIN, TITLE_SIZE, TOTAL_SIZE,
};

/// Renders an aggregated [`ReportResult`] as a paginated PDF.
///
/// The document layout is fixed: centered title, underlined column
/// header, one row per line item in input order, and an emphasized total
/// line. Pages break automatically; the caller only supplies a sink.
/// Output is streamed — completed pages reach the sink before rendering
/// finishes, so a failure late in rendering can leave partial bytes with
/// the transport. Callers must treat any error as a failed document
/// regardless of bytes already flushed.
pub struct ReportRenderer {
    creation_date: DateTime<Utc>,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self {
            creation_date: Utc::now(),
        }
    }

    /// Pin the document creation date, making output reproducible for
    /// identical input
    pub fn with_creation_date(creation_date: DateTime<Utc>) -> Self {
        Self { creation_date }
    }

    /// Stream the report into `sink`
    pub fn render<W: Write>(&self, result: &ReportResult, sink: &mut W) -> Result<()> {
        let date = self.creation_date.format("D:%Y%m%d%H%M%SZ").to_string();
        let mut doc = DocumentWriter::new(sink, &date)?;
        let mut page = PageContent::new(PAGE_MARGIN);

        page.text_line_centered(&layout::title(result.project_id), TITLE_SIZE);
        page.move_down(TITLE_SIZE, 1.0);

        page.text_line_underlined(COLUMN_HEADER, BODY_SIZE);
        page.move_down(BODY_SIZE, 0.5);

        for item in &result.line_items {
            if !page.fits(BODY_SIZE) {
                Self::flush_page(&mut doc, &mut page)?;
            }
            page.text_line(&layout::row(item), BODY_SIZE);
        }

        page.move_down(BODY_SIZE, 1.0);
        if !page.fits(TOTAL_SIZE) {
            Self::flush_page(&mut doc, &mut page)?;
        }
        page.text_line(&layout::total_line(result.total), TOTAL_SIZE);

        doc.write_page(&page.finish())?;
        doc.finish()
    }

    /// Render into an in-memory buffer
    pub fn render_to_vec(&self, result: &ReportResult) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.render(result, &mut buf)?;
        Ok(buf)
    }

    fn flush_page<W: Write>(doc: &mut DocumentWriter<W>, page: &mut PageContent) -> Result<()> {
        let full = std::mem::replace(page, PageContent::new(PAGE_MARGIN));
        doc.write_page(&full.finish())
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}
