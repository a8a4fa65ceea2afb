//! Content sources: compiled-in markdown and HTTP-fetched markdown.
//!
//! Which one backs the application is chosen by `[content] mode`:
//!
//! | Mode | Source | Failure modes |
//! |------|--------|---------------|
//! | `embedded` | [`EmbeddedSource`]: `content/*.md` via `include_str!` | none for any [`PageKey`] |
//! | `http` | [`HttpSource`]: `GET base_url + files[page]` | `ContentNotFound` (unmapped page), `LoadFailed` (transport error or non-2xx) |

use anyhow::{Context, Result};
use async_trait::async_trait;
use docsite_core::source::ContentSource;
use docsite_core::{DocsError, PageKey};
use reqwest::Url;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, ContentConfig};

/// Build the content source selected by the configuration.
pub fn build_source(config: &Config) -> Result<Arc<dyn ContentSource>> {
    if config.content.is_http() {
        Ok(Arc::new(HttpSource::from_config(&config.content)?))
    } else {
        Ok(Arc::new(EmbeddedSource))
    }
}

/// Raw markdown compiled into the binary.
pub fn embedded_markdown(page: PageKey) -> &'static str {
    match page {
        PageKey::Overview => include_str!("../content/overview.md"),
        PageKey::QuickStart => include_str!("../content/quick-start.md"),
        PageKey::Development => include_str!("../content/development.md"),
        PageKey::Milestones => include_str!("../content/milestones.md"),
        PageKey::Features => include_str!("../content/features.md"),
        PageKey::Api => include_str!("../content/api.md"),
        PageKey::Testing => include_str!("../content/testing.md"),
        PageKey::Deployment => include_str!("../content/deployment.md"),
        PageKey::Structure => include_str!("../content/structure.md"),
    }
}

/// Serves every page from markdown embedded at compile time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

#[async_trait]
impl ContentSource for EmbeddedSource {
    fn name(&self) -> &str {
        "embedded"
    }

    fn pages(&self) -> Vec<PageKey> {
        PageKey::ALL.to_vec()
    }

    async fn fetch(&self, page: PageKey) -> docsite_core::error::Result<String> {
        Ok(embedded_markdown(page).to_string())
    }
}

/// Fetches pages over HTTP relative to a base URL.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
    files: BTreeMap<PageKey, String>,
}

impl HttpSource {
    pub fn new(
        base_url: &str,
        files: BTreeMap<PageKey, String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid content base URL: {}", base_url))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url,
            files,
        })
    }

    /// Every page, mapped to its configured path or `<key>.md`.
    pub fn from_config(content: &ContentConfig) -> Result<Self> {
        let base_url = content
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("content.base_url must be set when mode is 'http'"))?;

        let files = PageKey::ALL
            .iter()
            .map(|&page| (page, content.file_for(page)))
            .collect();

        Self::new(base_url, files, content.timeout_secs.map(Duration::from_secs))
    }

    pub fn url_for(&self, page: PageKey) -> docsite_core::error::Result<Url> {
        let path = self
            .files
            .get(&page)
            .ok_or_else(|| DocsError::ContentNotFound(page.to_string()))?;
        self.base_url
            .join(path)
            .map_err(|e| DocsError::LoadFailed {
                page,
                cause: format!("invalid path '{}': {}", path, e),
            })
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn pages(&self) -> Vec<PageKey> {
        self.files.keys().copied().collect()
    }

    async fn fetch(&self, page: PageKey) -> docsite_core::error::Result<String> {
        let url = self.url_for(page)?;
        let load_failed = |cause: String| DocsError::LoadFailed { page, cause };

        tracing::debug!(page = %page, url = %url, "GET page");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| load_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(load_failed(format!("HTTP {} from {}", status, url)));
        }

        response.text().await.map_err(|e| load_failed(e.to_string()))
    }
}
