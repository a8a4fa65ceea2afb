//! In-memory [`ContentSource`] for tests and embedding hosts.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{DocsError, Result};
use crate::page::PageKey;

use super::ContentSource;

/// Content source backed by a map held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    docs: BTreeMap<PageKey, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_page(mut self, page: PageKey, text: impl Into<String>) -> Self {
        self.insert(page, text);
        self
    }

    pub fn insert(&mut self, page: PageKey, text: impl Into<String>) {
        self.docs.insert(page, text.into());
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn pages(&self) -> Vec<PageKey> {
        // BTreeMap orders by the enum's declaration order, which is navigation order.
        self.docs.keys().copied().collect()
    }

    async fn fetch(&self, page: PageKey) -> Result<String> {
        self.docs
            .get(&page)
            .cloned()
            .ok_or_else(|| DocsError::ContentNotFound(page.to_string()))
    }
}
