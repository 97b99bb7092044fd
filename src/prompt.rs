// Prompt assembly: uploaded documents + the user's question

const KNOWLEDGE_BASE_HEADER: &str = "Based on the nursing resume knowledge base:";

/// Build the completion prompt from every stored document and the query.
///
/// Documents are joined with a blank line into one knowledge-base block.
/// Nothing is truncated; the prompt grows with the number of uploads.
pub fn assemble<S: AsRef<str>>(document_texts: &[S], query: &str) -> String {
    let knowledge_base = document_texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n\n");

    format!("{KNOWLEDGE_BASE_HEADER}\n\n{knowledge_base}\n\nUser: {query}\nAI:")
}
