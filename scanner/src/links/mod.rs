mod resolve;

use std::path::Path;

use apidoc::block::LinkRef;
use apidoc::diagnostic::{Diagnostic, DiagnosticCode, has_errors};
use url::Url;

pub use resolve::resolve_relative;

/// Outcome of checking a single link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkValidation {
    Valid,
    /// Absolute or protocol-relative URL; reachability is not checked.
    ExternalSkipped,
    /// `#fragment` within the same page; anchors are not checked.
    BookmarkSkipped,
    /// A `[text][id]` reference whose id has no definition.
    MissingLinkSourceId,
    /// The `../` walk left the doc set.
    ParentAboveDocSetPath,
    FileNotFound,
    UrlFormatInvalid,
}

impl LinkValidation {
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            LinkValidation::ExternalSkipped | LinkValidation::BookmarkSkipped
        )
    }
}

/// Result of validating every link in one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkReport {
    /// No broken links. Skipped links never count as broken.
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Classify one link found in `document_path`.
pub fn classify(link: &LinkRef, document_path: &Path, docset_root: &Path) -> LinkValidation {
    if !link.resolved {
        return LinkValidation::MissingLinkSourceId;
    }

    let target = link.url.trim();
    if target.is_empty() {
        return LinkValidation::UrlFormatInvalid;
    }

    if target.starts_with("//") {
        return LinkValidation::ExternalSkipped;
    }

    match Url::parse(target) {
        Ok(_) => LinkValidation::ExternalSkipped,
        Err(url::ParseError::RelativeUrlWithoutBase) if target.starts_with('#') => {
            LinkValidation::BookmarkSkipped
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            resolve_relative(document_path, target, docset_root)
        }
        Err(_) => LinkValidation::UrlFormatInvalid,
    }
}

/// Check every link of a page against the doc set's file tree.
///
/// Skipped links are reported as warnings only when `include_warnings` is set.
pub fn validate(
    document_path: &Path,
    docset_root: &Path,
    links: &[LinkRef],
    include_warnings: bool,
    source: &str,
) -> LinkReport {
    let mut diagnostics = Vec::new();

    for link in links {
        let outcome = classify(link, document_path, docset_root);
        log::debug!("{}: link {:?} -> {:?}", source, link.url, outcome);

        let diagnostic = match outcome {
            LinkValidation::Valid => continue,
            skipped if skipped.is_skipped() && !include_warnings => continue,
            LinkValidation::ExternalSkipped => Diagnostic::warning(
                DiagnosticCode::LinkValidationSkipped,
                source,
                format!("skipped external link: {}", link.url),
            ),
            LinkValidation::BookmarkSkipped => Diagnostic::warning(
                DiagnosticCode::LinkValidationSkipped,
                source,
                format!("skipped bookmark link: {}", link.url),
            ),
            LinkValidation::MissingLinkSourceId => Diagnostic::error(
                DiagnosticCode::MissingLinkSourceId,
                source,
                format!(
                    "link [{}] references undefined id \"{}\"",
                    link.text,
                    link.reference.as_deref().unwrap_or_default()
                ),
            ),
            LinkValidation::ParentAboveDocSetPath => Diagnostic::error(
                DiagnosticCode::LinkDestinationOutsideDocSet,
                source,
                format!("link destination is outside the doc set: {}", link.url),
            ),
            LinkValidation::FileNotFound => Diagnostic::error(
                DiagnosticCode::LinkDestinationNotFound,
                source,
                format!("link destination not found: {}", link.url),
            ),
            LinkValidation::UrlFormatInvalid => Diagnostic::error(
                DiagnosticCode::LinkFormatInvalid,
                source,
                format!("link \"{}\" has an invalid URL: {:?}", link.text, link.url),
            ),
        };
        diagnostics.push(diagnostic.with_span(link.span.clone()));
    }

    LinkReport {
        ok: !has_errors(&diagnostics),
        diagnostics,
    }
}
