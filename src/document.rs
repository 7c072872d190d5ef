//! The user's source document and local file ingestion.

use std::path::{Path, PathBuf};

use crate::errors::DocumentError;

/// Where the current document text came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Typed,
    FileLoaded { path: PathBuf },
}

/// The code the user is about to submit. No edit history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceDocument {
    pub text: String,
    pub origin: Origin,
}

impl SourceDocument {
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin::Typed,
        }
    }

    pub fn from_file(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin::FileLoaded { path: path.into() },
        }
    }

    /// True when there is nothing but whitespace to submit.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            Origin::Typed => None,
            Origin::FileLoaded { path } => Some(path),
        }
    }
}

/// Read a local file as text.
///
/// Content is not validated beyond being text: invalid UTF-8 sequences are
/// replaced rather than rejected.
pub async fn read_source(path: &Path) -> Result<String, DocumentError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}
