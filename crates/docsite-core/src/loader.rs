//! Cached page loader.
//!
//! [`PageLoader`] retrieves markdown from a [`ContentSource`], renders it,
//! and caches the result by [`PageKey`] for the lifetime of the loader. The
//! cache is insert-only: there is no TTL and no purge.
//!
//! Failures are returned to the caller, which is expected to offer a manual
//! retry. The loader never retries on its own, and it does not deduplicate
//! concurrent loads of the same page; when two loads race, the first result
//! to reach the cache is kept and returned to both.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::Result;
use crate::models::RenderedPage;
use crate::page::PageKey;
use crate::render::render_page;
use crate::source::ContentSource;

pub struct PageLoader {
    source: Arc<dyn ContentSource>,
    cache: RwLock<HashMap<PageKey, Arc<RenderedPage>>>,
}

impl PageLoader {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &Arc<dyn ContentSource> {
        &self.source
    }

    /// Return the cached rendering of `page`, if any.
    pub fn cached(&self, page: PageKey) -> Option<Arc<RenderedPage>> {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&page)
            .cloned()
    }

    pub fn is_cached(&self, page: PageKey) -> bool {
        self.cached(page).is_some()
    }

    /// Pages currently in the cache, in navigation order.
    pub fn cached_pages(&self) -> Vec<PageKey> {
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        let mut pages: Vec<PageKey> = cache.keys().copied().collect();
        pages.sort();
        pages
    }

    /// Load and render `page`, serving from the cache when possible.
    pub async fn load(&self, page: PageKey) -> Result<Arc<RenderedPage>> {
        if let Some(hit) = self.cached(page) {
            debug!(page = %page, "page cache hit");
            return Ok(hit);
        }

        debug!(page = %page, source = self.source.name(), "fetching page");
        let doc = self.source.fetch_document(page).await?;
        let rendered = Arc::new(render_page(&doc));

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        let entry = cache.entry(page).or_insert(rendered);
        Ok(Arc::clone(entry))
    }

    /// Load a page named by a dynamic string key (URL parameter, CLI argument).
    ///
    /// Unknown keys fail with [`DocsError::ContentNotFound`](crate::DocsError::ContentNotFound).
    pub async fn load_key(&self, key: &str) -> Result<Arc<RenderedPage>> {
        let page: PageKey = key.parse()?;
        self.load(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsError;
    use crate::source::memory::MemorySource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps a source and counts fetches per call.
    struct CountingSource {
        inner: MemorySource,
        fetches: AtomicUsize,
    }

    impl CountingSource {
        fn new(inner: MemorySource) -> Self {
            Self {
                inner,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ContentSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn pages(&self) -> Vec<PageKey> {
            self.inner.pages()
        }

        async fn fetch(&self, page: PageKey) -> Result<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(page).await
        }
    }

    fn counting_loader() -> (Arc<CountingSource>, PageLoader) {
        let source = Arc::new(CountingSource::new(
            MemorySource::new()
                .with_page(PageKey::Api, "# API\n\nEndpoints live here.\n")
                .with_page(PageKey::Testing, "# Testing\n"),
        ));
        let loader = PageLoader::new(source.clone());
        (source, loader)
    }

    #[tokio::test]
    async fn test_second_load_is_cache_hit() {
        let (source, loader) = counting_loader();

        let first = loader.load(PageKey::Api).await.unwrap();
        let second = loader.load(PageKey::Api).await.unwrap();

        assert_eq!(first.html, second.html);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert!(first.html.contains(r#"<h1 id="toc-0">API</h1>"#));
    }

    #[tokio::test]
    async fn test_each_page_fetched_once() {
        let (source, loader) = counting_loader();
        for _ in 0..3 {
            loader.load(PageKey::Api).await.unwrap();
            loader.load(PageKey::Testing).await.unwrap();
        }
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(loader.cached_pages(), vec![PageKey::Api, PageKey::Testing]);
    }

    #[tokio::test]
    async fn test_unknown_key_fails_identically_on_retry() {
        let (source, loader) = counting_loader();

        let first = loader.load_key("nonexistent-page").await.unwrap_err();
        let retry = loader.load_key("nonexistent-page").await.unwrap_err();

        assert_eq!(first, DocsError::ContentNotFound("nonexistent-page".to_string()));
        assert_eq!(first, retry);
        // Parsing fails before the source is consulted.
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let (source, loader) = counting_loader();

        assert!(loader.load(PageKey::Deployment).await.is_err());
        assert!(loader.load(PageKey::Deployment).await.is_err());

        assert!(!loader.is_cached(PageKey::Deployment));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_load_key_shares_cache_with_typed_load() {
        let (source, loader) = counting_loader();
        let by_key = loader.load_key("api").await.unwrap();
        let typed = loader.load(PageKey::Api).await.unwrap();
        assert!(Arc::ptr_eq(&by_key, &typed));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }
}
