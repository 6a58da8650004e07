use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic as Report, Label};

pub use codespan_reporting::diagnostic::Severity;

/// Machine-readable classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    ErrorOpeningFile,
    ErrorReadingFile,
    MarkdownParserError,
    MissingLinkSourceId,
    LinkDestinationNotFound,
    LinkDestinationOutsideDocSet,
    LinkFormatInvalid,
    LinkValidationSkipped,
    UnknownTableType,
    TableColumnMismatch,
    UnsupportedAnnotationBlockType,
    MalformedAnnotation,
    MissingAnnotationField,
    OrphanedResponse,
    PageMetadata,
    DefinitionAttached,
    Unknown,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::ErrorOpeningFile => "ErrorOpeningFile",
            DiagnosticCode::ErrorReadingFile => "ErrorReadingFile",
            DiagnosticCode::MarkdownParserError => "MarkdownParserError",
            DiagnosticCode::MissingLinkSourceId => "MissingLinkSourceId",
            DiagnosticCode::LinkDestinationNotFound => "LinkDestinationNotFound",
            DiagnosticCode::LinkDestinationOutsideDocSet => "LinkDestinationOutsideDocSet",
            DiagnosticCode::LinkFormatInvalid => "LinkFormatInvalid",
            DiagnosticCode::LinkValidationSkipped => "LinkValidationSkipped",
            DiagnosticCode::UnknownTableType => "UnknownTableType",
            DiagnosticCode::TableColumnMismatch => "TableColumnMismatch",
            DiagnosticCode::UnsupportedAnnotationBlockType => "UnsupportedAnnotationBlockType",
            DiagnosticCode::MalformedAnnotation => "MalformedAnnotation",
            DiagnosticCode::MissingAnnotationField => "MissingAnnotationField",
            DiagnosticCode::OrphanedResponse => "OrphanedResponse",
            DiagnosticCode::PageMetadata => "PageMetadata",
            DiagnosticCode::DefinitionAttached => "DefinitionAttached",
            DiagnosticCode::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A severity-tagged message with optional source location information.
///
/// `Severity::Note` plays the role of a plain informational message; only
/// `Severity::Error` makes a run fail.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    /// What the diagnostic is about: a page name, a link target, a file path.
    pub source: String,
    pub message: String,
    pub span: Option<Range<usize>>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        code: DiagnosticCode,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            severity,
            code,
            source: source.into(),
            message: message.into(),
            span: None,
            file_id: 0,
            notes: Vec::new(),
        }
    }

    pub fn message(
        code: DiagnosticCode,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Note, code, source, message)
    }

    pub fn warning(
        code: DiagnosticCode,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, code, source, message)
    }

    pub fn error(
        code: DiagnosticCode,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, code, source, message)
    }

    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_file(mut self, file_id: usize) -> Self {
        self.file_id = file_id;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_report(&self) -> Report<usize> {
        let labels = match &self.span {
            Some(span) => vec![Label::primary(self.file_id, span.clone())],
            None => Vec::new(),
        };
        Report::new(self.severity)
            .with_message(&self.message)
            .with_code(self.code.as_str())
            .with_labels(labels)
            .with_notes(self.notes.clone())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.source, self.message)
    }
}

/// True when any diagnostic has error severity.
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
