//! Application controller.
//!
//! [`DocsApp`] is built once at startup and owns everything a viewing session
//! needs: the page loader and its cache, the current search index, the
//! navigation history, and the preference store. Every frontend (CLI, HTTP
//! server, interactive browser) drives the core through it.

use anyhow::Result;
use docsite_core::index::build_index_from_source;
use docsite_core::loader::PageLoader;
use docsite_core::models::{RenderedPage, SearchResult, SectionRecord};
use docsite_core::nav::History;
use docsite_core::query;
use docsite_core::source::ContentSource;
use docsite_core::{DocsError, PageKey};
use std::sync::{Arc, Mutex, RwLock};

use crate::config::Config;
use crate::content::build_source;
use crate::prefs::{Preferences, Theme};

/// Outcome of an index (re)build.
#[derive(Debug, Clone)]
pub struct IndexReport {
    pub records: usize,
    pub skipped: Vec<DocsError>,
}

pub struct DocsApp {
    config: Arc<Config>,
    loader: PageLoader,
    index: RwLock<Arc<Vec<SectionRecord>>>,
    history: Mutex<History>,
    prefs: Preferences,
}

impl DocsApp {
    /// Build the configured content source and the initial search index.
    pub async fn new(config: Config) -> Result<Self> {
        let source = build_source(&config)?;
        let (app, report) = Self::with_source(config, source).await;
        tracing::info!(
            records = report.records,
            skipped = report.skipped.len(),
            "search index built"
        );
        Ok(app)
    }

    /// Like [`DocsApp::new`], with an explicit content source.
    pub async fn with_source(config: Config, source: Arc<dyn ContentSource>) -> (Self, IndexReport) {
        let prefs = Preferences::new(config.preferences.path.clone());
        let app = Self {
            config: Arc::new(config),
            loader: PageLoader::new(source),
            index: RwLock::new(Arc::new(Vec::new())),
            history: Mutex::new(History::default()),
            prefs,
        };
        let report = app.rebuild_index().await;
        (app, report)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn loader(&self) -> &PageLoader {
        &self.loader
    }

    pub fn source(&self) -> &Arc<dyn ContentSource> {
        self.loader.source()
    }

    // ============ Search ============

    /// Discard the current index and build a new one from the content source.
    ///
    /// Pages that fail to fetch are skipped; searches keep working against
    /// whatever was indexed.
    pub async fn rebuild_index(&self) -> IndexReport {
        let build = build_index_from_source(self.source().as_ref()).await;
        let report = IndexReport {
            records: build.records.len(),
            skipped: build.skipped,
        };
        *self.index.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(build.records);
        report
    }

    /// Snapshot of the current index.
    pub fn index(&self) -> Arc<Vec<SectionRecord>> {
        Arc::clone(&self.index.read().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        query::search(&self.index(), query)
    }

    // ============ Navigation ============

    pub fn current_page(&self) -> PageKey {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).current()
    }

    /// Select `page` and load it.
    ///
    /// The selection is recorded even when loading fails, so [`DocsApp::retry`]
    /// re-attempts the page the user asked for.
    pub async fn open(&self, page: PageKey) -> Result<Arc<RenderedPage>, DocsError> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .visit(page);
        self.loader.load(page).await
    }

    /// Select a page by its string key. Unknown keys leave the selection unchanged.
    pub async fn open_key(&self, key: &str) -> Result<Arc<RenderedPage>, DocsError> {
        let page: PageKey = key.parse()?;
        self.open(page).await
    }

    /// Re-attempt loading the currently selected page.
    pub async fn retry(&self) -> Result<Arc<RenderedPage>, DocsError> {
        self.loader.load(self.current_page()).await
    }

    /// Step back in history and load the page found there.
    pub async fn back(&self) -> Option<Result<Arc<RenderedPage>, DocsError>> {
        let page = self.history.lock().unwrap_or_else(|e| e.into_inner()).back()?;
        Some(self.loader.load(page).await)
    }

    /// Step forward in history and load the page found there.
    pub async fn forward(&self) -> Option<Result<Arc<RenderedPage>, DocsError>> {
        let page = self
            .history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .forward()?;
        Some(self.loader.load(page).await)
    }

    // ============ Preferences ============

    pub fn theme(&self) -> Theme {
        self.prefs.theme()
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        self.prefs.toggle_theme()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.prefs.set_theme(theme)
    }
}
