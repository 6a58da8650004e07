use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::config::DocSetConfig;
use crate::error::ScanError;

/// The root directory of a documentation tree and its configuration.
#[derive(Debug, Clone)]
pub struct DocSet {
    root: PathBuf,
    config: DocSetConfig,
}

impl DocSet {
    /// Open a doc set, reading `apidoc.toml` from its root when present.
    ///
    /// The root is canonicalized so link resolution compares like with like.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ScanError> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|source| ScanError::OpenFile {
            path: root.to_path_buf(),
            source,
        })?;
        let config = DocSetConfig::load(&root)?;
        Ok(Self::with_config(root, config))
    }

    pub fn with_config(root: impl Into<PathBuf>, config: DocSetConfig) -> Self {
        DocSet {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &DocSetConfig {
        &self.config
    }

    /// All pages of the doc set, sorted, minus the configured exclusions.
    pub fn files(&self) -> Result<Vec<PathBuf>, ScanError> {
        let excludes = self
            .config
            .exclude
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ScanError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let root = Pattern::escape(&self.root.to_string_lossy());
        let mut files = Vec::new();
        for extension in &self.config.extensions {
            let pattern = format!("{}/**/*.{}", root, extension);
            let paths = glob::glob(&pattern).map_err(|source| ScanError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;

            for path in paths {
                let path = path?;
                if !path.is_file() {
                    continue;
                }
                let relative = path.strip_prefix(&self.root).unwrap_or(&path);
                if excludes.iter().any(|p| p.matches_path(relative)) {
                    log::debug!("excluding {}", relative.display());
                    continue;
                }
                files.push(path);
            }
        }

        files.sort();
        files.dedup();
        log::info!("found {} pages under {}", files.len(), self.root.display());
        Ok(files)
    }
}
