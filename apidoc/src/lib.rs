pub mod annotation;
pub mod block;
pub mod definition;
pub mod diagnostic;
pub mod parser;

use crate::block::{Block, LinkRef};

/// A tokenized Markdown document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Top-level blocks in source order. `Block::index` is the position in this list.
    pub blocks: Vec<Block>,
    /// Every link in the document, including links nested in lists and quotes.
    pub links: Vec<LinkRef>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}
