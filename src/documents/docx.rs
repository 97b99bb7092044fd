use super::{DocumentText, TextExtractable};
use crate::types::{AppError, AppResult};
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};

pub struct DocxExtractor;

impl TextExtractable for DocxExtractor {
    fn extract_text(&self, filename: &str, data: &[u8]) -> AppResult<DocumentText> {
        let doc = docx_rs::read_docx(data)
            .map_err(|e| AppError::decode(filename, format!("invalid DOCX ({})", e)))?;

        // Body-level paragraphs only; table cells are not part of the text.
        let paragraphs: Vec<String> = doc
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};
    use std::io::Cursor;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_paragraphs_one_per_line() {
        let data = build_docx(&["Jane Doe, RN", "ICU - 6 years", "BLS, ACLS"]);
        let text = DocxExtractor.extract_text("resume.docx", &data).unwrap();
        assert_eq!(text, "Jane Doe, RN\nICU - 6 years\nBLS, ACLS");
    }

    #[test]
    fn test_empty_paragraph_keeps_its_line() {
        let data = build_docx(&["Summary", "", "Experience"]);
        let text = DocxExtractor.extract_text("resume.docx", &data).unwrap();
        assert_eq!(text, "Summary\n\nExperience");
    }

    #[test]
    fn test_corrupt_docx_is_decode_error() {
        let err = DocxExtractor
            .extract_text("broken.docx", b"PK\x03\x04 definitely not a zip")
            .unwrap_err();
        assert!(matches!(err, AppError::Decode { ref file, .. } if file == "broken.docx"));
    }
}
