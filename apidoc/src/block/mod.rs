pub mod link;

use std::ops::Range;

pub use link::LinkRef;

/// One structural unit of a tokenized document.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Flattened text for headings and paragraphs, the raw HTML for comments,
    /// the body for code blocks and the source slice for tables.
    pub content: String,
    pub index: usize,
    /// Byte span in source for error reporting.
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// Heading level: 1 = `#` through 6 = `######`.
    Heading(u8),
    /// `strong` is set when every visible character of the paragraph is bold,
    /// which is how doc authors write sub-headings without a heading level.
    Paragraph { strong: bool },
    /// An HTML comment block (`<!-- ... -->`).
    Comment,
    CodeBlock { language: Option<String> },
    Table(TableBlock),
}

/// Cell text of a Markdown table, header row separated from the body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBlock {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Block {
    /// Headings and bold-only paragraphs give context to the tables that follow them.
    pub fn is_header(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::Heading(_) | BlockKind::Paragraph { strong: true }
        )
    }

    pub fn is_code_block(&self) -> bool {
        matches!(self.kind, BlockKind::CodeBlock { .. })
    }

    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::CodeBlock { language } => language.as_deref(),
            _ => None,
        }
    }
}
