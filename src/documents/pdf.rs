// PDF text extraction via lopdf, one page at a time

use super::{DocumentText, TextExtractable};
use crate::types::{AppError, AppResult};
use lopdf::Document;
use tracing::debug;

pub struct PdfExtractor;

impl TextExtractable for PdfExtractor {
    fn extract_text(&self, filename: &str, data: &[u8]) -> AppResult<DocumentText> {
        let doc = Document::load_mem(data)
            .map_err(|e| AppError::decode(filename, format!("invalid PDF ({})", e)))?;

        let pages = doc.get_pages();
        let mut text = String::new();

        // Every page ends with a newline, even when nothing could be read from
        // it, so page order stays visible in the output.
        for page_number in pages.keys() {
            match doc.extract_text(&[*page_number]) {
                // lopdf ends a page's text at its last ET with a line break.
                Ok(page_text) => text.push_str(page_text.strip_suffix('\n').unwrap_or(&page_text)),
                Err(e) => debug!("{}: no text on page {} ({})", filename, page_number, e),
            }
            text.push('\n');
        }

        debug!("{}: extracted {} pages", filename, pages.len());
        Ok(text)
    }
}
