use super::DocumentText;

/// Upload-ordered texts of every successfully decoded file in a session.
///
/// Append-only: there is no removal, deduplication or size cap, so the
/// prompt grows with every upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStore {
    texts: Vec<DocumentText>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: DocumentText) {
        self.texts.push(text);
    }

    pub fn all(&self) -> &[DocumentText] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
