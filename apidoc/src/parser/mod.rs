mod structural;

use crate::Document;
use crate::diagnostic::Diagnostic;

/// Tokenizer entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Tokenize the source Markdown into blocks and links.
    pub fn parse(&self) -> Result<Document, Vec<Diagnostic>> {
        structural::parse_document(&self.source, self.file_id)
    }
}
