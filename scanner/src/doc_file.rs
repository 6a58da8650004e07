use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use apidoc::Document;
use apidoc::parser::Parser;

use crate::error::ScanError;
use crate::extractor::{self, Extraction};
use crate::links::{self, LinkReport};

/// One documentation page of a doc set.
#[derive(Debug, Clone)]
pub struct DocFile {
    pub path: PathBuf,
    /// Path relative to the doc set root, with `/` separators.
    pub display_name: String,
    pub source: String,
}

impl DocFile {
    /// Read a page from disk. Non-UTF-8 content is a read error.
    pub fn load(path: &Path, docset_root: &Path) -> Result<Self, ScanError> {
        let mut file = File::open(path).map_err(|source| ScanError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut source = String::new();
        file.read_to_string(&mut source)
            .map_err(|source| ScanError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_source(path, display_name(path, docset_root), source))
    }

    pub fn from_source(path: &Path, display_name: String, source: String) -> Self {
        DocFile {
            path: path.to_path_buf(),
            display_name,
            source,
        }
    }

    /// Tokenize the page. `file_id` identifies it in rendered diagnostics.
    pub fn parse(&self, file_id: usize) -> Result<Document, ScanError> {
        Parser::new(self.source.clone(), file_id)
            .parse()
            .map_err(|diagnostics| ScanError::Markdown {
                path: self.path.clone(),
                diagnostics,
            })
    }

    pub fn extract(&self, document: &Document) -> Extraction {
        extractor::extract(&document.blocks, &self.display_name, document.source_id)
    }

    pub fn validate_links(
        &self,
        document: &Document,
        docset_root: &Path,
        include_warnings: bool,
    ) -> LinkReport {
        let mut report = links::validate(
            &self.path,
            docset_root,
            &document.links,
            include_warnings,
            &self.display_name,
        );
        for diagnostic in &mut report.diagnostics {
            diagnostic.file_id = document.source_id;
        }
        report
    }
}

/// Display name of a page: its path relative to the doc set root.
pub fn display_name(path: &Path, docset_root: &Path) -> String {
    path.strip_prefix(docset_root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
