//! Document ingestion
//!
//! Turns uploaded bytes into plain text and keeps the extracted texts for the
//! lifetime of a session:
//! - [`DocumentKind`] - closed set of supported formats, resolved once per file
//! - [`TextExtractable`] - one extractor per format (`pdf`, `docx`, `text`)
//! - [`DocumentStore`] - append-only, upload-ordered collection of texts

pub mod docx;
pub mod pdf;
pub mod store;
pub mod text;

pub use store::DocumentStore;

use crate::types::AppResult;
use bytes::Bytes;
use tracing::debug;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Extracted plain text of one document. May be empty, never absent.
pub type DocumentText = String;

/// A file handed over by a front-end, consumed by extraction.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            data: data.into(),
        }
    }

    /// MIME type the file is treated as.
    ///
    /// Browsers send `application/octet-stream` (or nothing) for types they
    /// don't know; in that case the type is guessed from the file name.
    pub fn declared_type(&self) -> String {
        match self.content_type.as_deref().map(str::trim) {
            Some(ct) if !ct.is_empty() && ct != mime::APPLICATION_OCTET_STREAM.as_ref() => {
                ct.to_string()
            }
            _ => mime_guess::from_path(&self.filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_mime(&self.declared_type())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Anything that is neither PDF nor DOCX is read as UTF-8 text.
    pub fn from_mime(declared: &str) -> Self {
        let essence = declared
            .parse::<mime::Mime>()
            .map(|m| m.essence_str().to_ascii_lowercase())
            .unwrap_or_default();

        if essence == mime::APPLICATION_PDF.essence_str() {
            DocumentKind::Pdf
        } else if essence == DOCX_MIME {
            DocumentKind::Docx
        } else {
            DocumentKind::PlainText
        }
    }

    pub fn extractor(self) -> &'static dyn TextExtractable {
        match self {
            DocumentKind::Pdf => &pdf::PdfExtractor,
            DocumentKind::Docx => &docx::DocxExtractor,
            DocumentKind::PlainText => &text::PlainTextExtractor,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "pdf"),
            DocumentKind::Docx => write!(f, "docx"),
            DocumentKind::PlainText => write!(f, "text"),
        }
    }
}

/// Capability to turn raw bytes of one format into plain text.
pub trait TextExtractable: Send + Sync {
    /// `filename` is only used to label errors.
    fn extract_text(&self, filename: &str, data: &[u8]) -> AppResult<DocumentText>;
}

/// Extract the text of an uploaded file according to its declared type.
pub fn extract(file: &UploadedFile) -> AppResult<DocumentText> {
    let kind = file.kind();
    debug!(
        "Extracting {} ({} bytes) as {}",
        file.filename,
        file.data.len(),
        kind
    );
    kind.extractor().extract_text(&file.filename, &file.data)
}
