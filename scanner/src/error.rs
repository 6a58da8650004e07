use std::io;
use std::path::PathBuf;

use apidoc::diagnostic::{Diagnostic, DiagnosticCode};
use thiserror::Error;

use crate::config::ConfigError;

/// Failures that stop a whole document (or doc set) before any block is interpreted.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot open '{path}': {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("markdown parser failed on '{path}'")]
    Markdown {
        path: PathBuf,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("cannot walk doc set: {0}")]
    Walk(#[from] glob::GlobError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ScanError {
    pub fn code(&self) -> DiagnosticCode {
        match self {
            ScanError::OpenFile { .. } => DiagnosticCode::ErrorOpeningFile,
            ScanError::ReadFile { .. } => DiagnosticCode::ErrorReadingFile,
            ScanError::Markdown { .. } => DiagnosticCode::MarkdownParserError,
            ScanError::Pattern { .. } | ScanError::Walk(_) | ScanError::Config(_) => {
                DiagnosticCode::Unknown
            }
        }
    }

    /// The single terminal diagnostic reported for this failure.
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.code(), source, self.to_string());
        if let ScanError::Markdown { diagnostics, .. } = self {
            if let Some(first) = diagnostics.first() {
                diagnostic.file_id = first.file_id;
                diagnostic.span = first.span.clone();
            }
            for inner in diagnostics {
                diagnostic = diagnostic.with_note(inner.message.clone());
            }
        }
        diagnostic
    }
}
