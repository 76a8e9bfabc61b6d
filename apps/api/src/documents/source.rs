//! Where template files come from.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateSourceError {
    #[error("Template not found: {0}")]
    Missing(String),

    #[error("Template {path} could not be read: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Reads template text by path relative to the templates root.
pub trait TemplateSource: Send + Sync {
    fn load(&self, relative_path: &str) -> Result<String, TemplateSourceError>;
}

/// Templates on the local filesystem under `root`.
#[derive(Debug, Clone)]
pub struct FsTemplateSource {
    root: PathBuf,
}

impl FsTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for FsTemplateSource {
    fn load(&self, relative_path: &str) -> Result<String, TemplateSourceError> {
        // Catalog ids never contain separators; anything that does is not ours.
        if relative_path.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(TemplateSourceError::Missing(relative_path.to_string()));
        }

        let path = self.root.join(relative_path);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(TemplateSourceError::Missing(relative_path.to_string()))
            }
            Err(e) => Err(TemplateSourceError::Unreadable {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }
}
