use super::{DocumentText, TextExtractable};
use crate::types::{AppError, AppResult};

pub struct PlainTextExtractor;

impl TextExtractable for PlainTextExtractor {
    fn extract_text(&self, filename: &str, data: &[u8]) -> AppResult<DocumentText> {
        std::str::from_utf8(data)
            .map(str::to_string)
            .map_err(|e| AppError::decode(filename, format!("not valid UTF-8 text ({})", e)))
    }
}
