use thiserror::Error;

use crate::page::PageKey;

pub type Result<T> = std::result::Result<T, DocsError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocsError {
    /// The requested page key is unknown, or the content source has no entry for it.
    #[error("content not found: {0}")]
    ContentNotFound(String),

    /// Fetching the page failed or the server answered with a non-success status.
    #[error("failed to load {page}: {cause}")]
    LoadFailed { page: PageKey, cause: String },

    /// A single document could not be indexed; the rest of the build continued.
    #[error("skipped indexing {page}: {cause}")]
    IndexBuildSkipped { page: PageKey, cause: String },
}

impl DocsError {
    /// Short machine-readable code, used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DocsError::ContentNotFound(_) => "not_found",
            DocsError::LoadFailed { .. } => "load_failed",
            DocsError::IndexBuildSkipped { .. } => "index_skipped",
        }
    }
}
