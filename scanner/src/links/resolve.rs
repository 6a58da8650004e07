use std::path::Path;

use super::LinkValidation;

/// Resolve a relative link against the page that contains it.
///
/// Segments are applied one at a time from the page's directory, or from the
/// doc set root for links starting with `/`. A `..` that leaves `docset_root`
/// at any point rejects the link. Only existing files are valid targets.
pub fn resolve_relative(document_path: &Path, url: &str, docset_root: &Path) -> LinkValidation {
    let path = url
        .split_once('#')
        .map_or(url, |(path, _)| path);
    let path = path.split_once('?').map_or(path, |(path, _)| path);

    let Ok(path) = urlencoding::decode(path) else {
        return LinkValidation::UrlFormatInvalid;
    };

    let (mut target, relative) = match path.strip_prefix('/') {
        Some(rest) => (docset_root.to_path_buf(), rest),
        None => (
            document_path
                .parent()
                .unwrap_or(docset_root)
                .to_path_buf(),
            path.as_ref(),
        ),
    };

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                target.pop();
                if !target.starts_with(docset_root) {
                    return LinkValidation::ParentAboveDocSetPath;
                }
            }
            name => target.push(name),
        }
    }

    if !target.starts_with(docset_root) {
        return LinkValidation::ParentAboveDocSetPath;
    }

    if target.is_file() {
        LinkValidation::Valid
    } else {
        LinkValidation::FileNotFound
    }
}
