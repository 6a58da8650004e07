use serde::Deserialize;
use thiserror::Error;

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// What the code block following an annotation represents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum BlockType {
    Resource,
    Request,
    Response,
    Example,
    Ignored,
    /// Any block type this scanner does not understand, kept verbatim for reporting.
    Unsupported(String),
}

impl From<String> for BlockType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "resource" => BlockType::Resource,
            "request" => BlockType::Request,
            "response" | "simulatedresponse" => BlockType::Response,
            "example" => BlockType::Example,
            "ignored" => BlockType::Ignored,
            _ => BlockType::Unsupported(value),
        }
    }
}

/// JSON metadata embedded in an HTML comment, describing the next code block.
///
/// ```text
/// <!-- { "blockType": "request", "name": "get-user" } -->
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub block_type: BlockType,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "@odata.type", alias = "resourceType")]
    pub resource_type: Option<String>,
    /// Explicit method identifier for request blocks.
    #[serde(rename = "name", alias = "method")]
    pub method: Option<String>,
    pub key_property: Option<String>,
    #[serde(default)]
    pub optional_properties: Vec<String>,
    #[serde(default)]
    pub is_collection: bool,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("comment is not delimited by `<!--` and `-->`")]
    NotAComment,
    #[error("invalid annotation JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Annotation {
    /// Parse the JSON payload of an HTML comment block.
    pub fn from_comment(comment: &str) -> Result<Self, AnnotationError> {
        let payload = comment_payload(comment).ok_or(AnnotationError::NotAComment)?;
        Ok(serde_json::from_str(payload)?)
    }
}

/// Strip the comment delimiters and surrounding whitespace.
pub fn comment_payload(comment: &str) -> Option<&str> {
    comment
        .trim()
        .strip_prefix(COMMENT_OPEN)?
        .strip_suffix(COMMENT_CLOSE)
        .map(str::trim)
}
