//! Documentation HTTP server.
//!
//! Serves the rendered documentation as HTML and exposes the core through a
//! small JSON API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/?page=<key>` | HTML shell for a page (default `overview`) |
//! | `GET`  | `/api/pages` | List pages with titles and cache state |
//! | `GET`  | `/api/pages/{page}` | Rendered HTML and TOC for one page |
//! | `GET`  | `/api/search?q=` | Ranked section matches (top 10) |
//! | `POST` | `/api/index/rebuild` | Rebuild the search index |
//! | `GET`  | `/api/theme` | Default theme |
//! | `POST` | `/api/theme/toggle` | Flip and persist the default theme |
//! | `GET`  | `/api/test` | Liveness check for API clients |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "content not found: nonexistent-page" } }
//! ```
//!
//! Error codes: `not_found` (404), `load_failed` (502), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the markdown and API
//! can be consumed from pages served elsewhere.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use docsite_core::models::{RenderedPage, TocEntry};
use docsite_core::nav::{page_from_param, page_href, PAGE_PARAM};
use docsite_core::query::{self, highlight_terms};
use docsite_core::{DocsError, PageKey};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::app::DocsApp;
use crate::config::Config;
use crate::prefs::Theme;
use crate::shell::{render_shell, ShellBody, ShellView};

/// Shared state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    app: Arc<DocsApp>,
}

/// Builds the application and serves it on `[server].bind` until the process exits.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = Arc::new(DocsApp::new(config.clone()).await?);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(bind = %bind_addr, source = app.source().name(), "docs server started");
    println!("Docs server listening on http://{}", bind_addr);

    axum::serve(listener, router(app)).await?;
    Ok(())
}

/// All routes, with CORS, bound to `app`.
pub fn router(app: Arc<DocsApp>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_shell))
        .route("/api/pages", get(handle_list_pages))
        .route("/api/pages/{page}", get(handle_get_page))
        .route("/api/search", get(handle_search))
        .route("/api/index/rebuild", post(handle_rebuild_index))
        .route("/api/theme", get(handle_get_theme))
        .route("/api/theme/toggle", post(handle_toggle_theme))
        .route("/api/test", get(handle_api_test))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { app })
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn status_for(err: &DocsError) -> StatusCode {
    match err {
        DocsError::ContentNotFound(_) => StatusCode::NOT_FOUND,
        DocsError::LoadFailed { .. } => StatusCode::BAD_GATEWAY,
        DocsError::IndexBuildSkipped { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DocsError> for AppError {
    fn from(err: DocsError) -> Self {
        AppError {
            status: status_for(&err),
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal".to_string(),
            message: format!("{:#}", err),
        }
    }
}

// ============ GET / ============

#[derive(Deserialize)]
struct ShellParams {
    page: Option<String>,
}

/// Renders the page selected by the `page` query parameter.
///
/// Failures render the same shell with an inline error and a retry link
/// pointing at the same selection; nothing is retried automatically.
async fn handle_shell(
    State(state): State<AppState>,
    Query(params): Query<ShellParams>,
) -> (StatusCode, Html<String>) {
    let theme = state.app.theme();
    let debounce_ms = state.app.config().search.debounce_ms;

    let error_shell = |current: Option<PageKey>, err: DocsError, retry_href: String| {
        tracing::warn!(error = %err, "page load failed");
        let html = render_shell(&ShellView {
            current,
            body: ShellBody::Error {
                message: err.to_string(),
                retry_href,
            },
            theme,
            debounce_ms,
        });
        (status_for(&err), Html(html))
    };

    let requested = params.page.as_deref();
    let page = match page_from_param(requested) {
        Ok(page) => page,
        Err(err) => {
            let retry_href = selection_href(requested.unwrap_or_default());
            return error_shell(None, err, retry_href);
        }
    };

    match state.app.loader().load(page).await {
        Ok(rendered) => {
            let html = render_shell(&ShellView {
                current: Some(page),
                body: ShellBody::Page(&rendered),
                theme,
                debounce_ms,
            });
            (StatusCode::OK, Html(html))
        }
        Err(err) => error_shell(Some(page), err, page_href(page)),
    }
}

/// Percent-encoded `?page=<key>` link for a key that is not a known page.
fn selection_href(key: &str) -> String {
    match Url::parse_with_params("http://localhost/", &[(PAGE_PARAM, key)]) {
        Ok(url) => format!("?{}", url.query().unwrap_or_default()),
        Err(_) => page_href(PageKey::DEFAULT),
    }
}

// ============ GET /api/pages ============

#[derive(Serialize)]
struct PageInfo {
    key: PageKey,
    title: &'static str,
    cached: bool,
}

#[derive(Serialize)]
struct PageListResponse {
    pages: Vec<PageInfo>,
}

async fn handle_list_pages(State(state): State<AppState>) -> Json<PageListResponse> {
    let pages = state
        .app
        .source()
        .pages()
        .into_iter()
        .map(|page| PageInfo {
            key: page,
            title: page.title(),
            cached: state.app.loader().is_cached(page),
        })
        .collect();
    Json(PageListResponse { pages })
}

// ============ GET /api/pages/{page} ============

#[derive(Serialize)]
struct PageResponse {
    page: PageKey,
    title: String,
    html: String,
    toc: Vec<TocEntry>,
}

impl From<&RenderedPage> for PageResponse {
    fn from(page: &RenderedPage) -> Self {
        PageResponse {
            page: page.page,
            title: page.title.clone(),
            html: page.html.clone(),
            toc: page.toc.clone(),
        }
    }
}

async fn handle_get_page(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<PageResponse>, AppError> {
    let rendered = state.app.loader().load_key(&key).await?;
    Ok(Json(PageResponse::from(rendered.as_ref())))
}

// ============ GET /api/search ============

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct SearchHit {
    page: PageKey,
    page_title: &'static str,
    title: String,
    preview: String,
    ordinal: usize,
    score: u32,
    title_html: String,
    preview_html: String,
    href: String,
}

#[derive(Serialize)]
struct SearchResponse {
    query: String,
    results: Vec<SearchHit>,
}

/// Queries shorter than two characters return an empty list, which the
/// shell treats as "hide results".
async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let results = if query::is_searchable(&params.q) {
        state.app.search(&params.q)
    } else {
        Vec::new()
    };

    let results = results
        .into_iter()
        .map(|r| {
            let section = r.section;
            SearchHit {
                page: section.page,
                page_title: section.page.title(),
                title_html: highlight_terms(&section.title, &params.q),
                preview_html: highlight_terms(&section.preview, &params.q),
                href: page_href(section.page),
                title: section.title,
                preview: section.preview,
                ordinal: section.ordinal,
                score: r.score,
            }
        })
        .collect();

    Json(SearchResponse {
        query: params.q,
        results,
    })
}

// ============ POST /api/index/rebuild ============

#[derive(Serialize)]
struct SkippedPage {
    page: Option<PageKey>,
    cause: String,
}

#[derive(Serialize)]
struct RebuildResponse {
    records: usize,
    skipped: Vec<SkippedPage>,
}

async fn handle_rebuild_index(State(state): State<AppState>) -> Json<RebuildResponse> {
    let report = state.app.rebuild_index().await;
    let skipped = report
        .skipped
        .into_iter()
        .map(|err| match err {
            DocsError::IndexBuildSkipped { page, cause } => SkippedPage {
                page: Some(page),
                cause,
            },
            other => SkippedPage {
                page: None,
                cause: other.to_string(),
            },
        })
        .collect();

    Json(RebuildResponse {
        records: report.records,
        skipped,
    })
}

// ============ Theme ============

#[derive(Serialize)]
struct ThemeResponse {
    theme: Theme,
}

async fn handle_get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(ThemeResponse {
        theme: state.app.theme(),
    })
}

async fn handle_toggle_theme(
    State(state): State<AppState>,
) -> Result<Json<ThemeResponse>, AppError> {
    let theme = state.app.toggle_theme()?;
    Ok(Json(ThemeResponse { theme }))
}

// ============ Liveness ============

#[derive(Serialize)]
struct ApiTestResponse {
    message: &'static str,
}

async fn handle_api_test() -> Json<ApiTestResponse> {
    Json(ApiTestResponse {
        message: "API is working!",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
