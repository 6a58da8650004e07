use std::ops::Range;

/// A hyperlink found while tokenizing a document.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRef {
    pub text: String,
    /// Destination after reference resolution. Empty when `resolved` is false.
    pub url: String,
    /// The reference id for `[text][id]` style links.
    pub reference: Option<String>,
    /// False when a reference link names an id that has no definition.
    pub resolved: bool,
    pub span: Range<usize>,
}

impl LinkRef {
    pub fn new(text: impl Into<String>, url: impl Into<String>, span: Range<usize>) -> Self {
        LinkRef {
            text: text.into(),
            url: url.into(),
            reference: None,
            resolved: true,
            span,
        }
    }

    /// A reference link whose id could not be resolved.
    pub fn dangling(text: impl Into<String>, reference: impl Into<String>, span: Range<usize>) -> Self {
        LinkRef {
            text: text.into(),
            url: String::new(),
            reference: Some(reference.into()),
            resolved: false,
            span,
        }
    }
}
