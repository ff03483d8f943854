//! Document renderer - turns an advisory into a downloadable PDF report.
//!
//! - `layout` - classifies advisory lines into blocks (pure, no PDF types)
//! - `engine` - draws blocks onto A4 pages with an explicit page cursor

pub mod engine;
pub mod layout;

pub use engine::{FontSource, PageCursor, PdfRenderEngine};
pub use layout::{layout_advisory, Block, LayoutMachine, Table, TableState, Transition};

use thiserror::Error;

use crate::generation::AdvisoryResult;

pub const REPORT_TITLE: &str = "Farm Advisory Report";
pub const REPORT_FILENAME: &str = "farm_advisory_report.pdf";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to load report font: {0}")]
    Font(String),
    #[error("failed to write PDF: {0}")]
    Pdf(String),
    #[error("report rendering was interrupted: {0}")]
    Join(String),
}

#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// Blocks for an advisory.
///
/// Structured results are dumped as pretty-printed JSON, one paragraph per
/// line, without classification.
pub fn advisory_blocks(advisory: &AdvisoryResult) -> Vec<Block> {
    match advisory {
        AdvisoryResult::Text(text) => layout_advisory(text),
        AdvisoryResult::Structured(value) => serde_json::to_string_pretty(value)
            .unwrap_or_else(|_| value.to_string())
            .lines()
            .map(|line| Block::Paragraph(line.to_string()))
            .collect(),
    }
}

pub fn render_advisory_report(
    advisory: &AdvisoryResult,
    font: FontSource<'_>,
) -> Result<GeneratedDocument, ReportError> {
    let blocks = advisory_blocks(advisory);
    let (engine, cursor) = PdfRenderEngine::new(REPORT_TITLE, font)?;

    let mut cursor = engine.title(cursor, REPORT_TITLE);
    for block in &blocks {
        cursor = engine.block(cursor, block);
    }

    let pdf = engine.finish()?;
    log::info!("Rendered advisory report: {} blocks, {} bytes", blocks.len(), pdf.len());

    Ok(GeneratedDocument {
        filename: REPORT_FILENAME.to_string(),
        pdf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_advisory_is_not_classified() {
        let advisory = AdvisoryResult::Structured(json!({ "summary": "- not a bullet" }));
        let blocks = advisory_blocks(&advisory);
        assert!(blocks.iter().all(|b| matches!(b, Block::Paragraph(_))));
        assert_eq!(blocks.first(), Some(&Block::Paragraph("{".to_string())));
        assert!(blocks.contains(&Block::Paragraph("  \"summary\": \"- not a bullet\"".to_string())));
    }

    #[test]
    fn test_prose_after_table_is_absorbed_once_normalized() {
        // Cleanup drops the blank line that would close the table.
        let raw = "| Crop | Cost |\n| Rice | 100 |\n\nPrices rise after harvest.\n- Sell in March";
        let advisory = crate::generation::normalize_reply(raw);
        assert_eq!(
            advisory.as_text(),
            Some("| Crop | Cost |\n| Rice | 100 |\nPrices rise after harvest.\nSell in March")
        );

        let blocks = advisory_blocks(&advisory);
        assert_eq!(
            blocks,
            vec![Block::Table(Table {
                header: vec!["Crop".to_string(), "Cost".to_string()],
                rows: vec![
                    vec!["Rice".to_string(), "100".to_string()],
                    Vec::new(),
                    Vec::new(),
                ],
            })]
        );
    }

    #[test]
    fn test_render_text_advisory() {
        let advisory = AdvisoryResult::Text(
            "# Advisory\nSoil Health:\n- Add compost\n| Crop | Cost |\n| Rice | 100 |\n\nDone."
                .to_string(),
        );
        let document = render_advisory_report(&advisory, FontSource::Builtin).unwrap();
        assert_eq!(document.filename, "farm_advisory_report.pdf");
        assert!(document.pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_wide_table_and_non_latin_text() {
        let advisory = AdvisoryResult::Text(
            "| 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 |\n| a |\nफसल सलाह".to_string(),
        );
        let document = render_advisory_report(&advisory, FontSource::Builtin).unwrap();
        assert!(!document.pdf.is_empty());
    }
}
