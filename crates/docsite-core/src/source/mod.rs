//! Content source abstraction.
//!
//! The [`ContentSource`] trait is the Content Store: a read-only mapping from
//! [`PageKey`] to raw markdown. The application provides an embedded
//! (compiled-in) source and an HTTP source; this crate ships
//! [`MemorySource`](memory::MemorySource) for tests and custom frontends.
//!
//! Implementations must be `Send + Sync` so a single source can back a
//! loader shared across server tasks.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Document;
use crate::page::PageKey;

/// Read-only mapping from page key to markdown text.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`name`](ContentSource::name) | Label for logs and `docsite pages` |
/// | [`pages`](ContentSource::pages) | Pages this source is configured to serve |
/// | [`fetch`](ContentSource::fetch) | Retrieve raw markdown for one page |
#[async_trait]
pub trait ContentSource: Send + Sync {
    fn name(&self) -> &str;

    /// Pages this source can serve, in navigation order.
    fn pages(&self) -> Vec<PageKey>;

    /// Retrieve the raw markdown for `page`.
    ///
    /// Fails with [`DocsError::ContentNotFound`](crate::DocsError::ContentNotFound)
    /// when the source has no entry for the page, and with
    /// [`DocsError::LoadFailed`](crate::DocsError::LoadFailed) when retrieval
    /// itself fails. May suspend while fetching; there is no built-in timeout.
    async fn fetch(&self, page: PageKey) -> Result<String>;

    /// Fetch `page` and wrap it as a [`Document`] with its display title.
    async fn fetch_document(&self, page: PageKey) -> Result<Document> {
        let text = self.fetch(page).await?;
        Ok(Document::new(page, text))
    }
}
