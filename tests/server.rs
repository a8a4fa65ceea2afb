//! HTTP server and HTTP content source, exercised over real sockets.

use axum::routing::get;
use axum::Router;
use docsite::app::DocsApp;
use docsite::config::Config;
use docsite::content::HttpSource;
use docsite::server::router;
use docsite_core::index::build_index_from_source;
use docsite_core::source::ContentSource;
use docsite_core::{DocsError, PageKey};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const LONG_BODY: &str =
    "Tokens are issued by the login endpoint and must accompany every request made afterwards.";

fn test_config(tmp: &TempDir) -> Config {
    let mut config = Config::minimal();
    config.preferences.path = tmp.path().join("data").join("prefs.toml");
    config
}

/// Serve `app` on an ephemeral port and return its base URL.
async fn spawn_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_docs_server(tmp: &TempDir) -> String {
    let app = DocsApp::new(test_config(tmp)).await.unwrap();
    spawn_router(router(Arc::new(app))).await
}

/// A markdown origin that only has two of the nine pages.
async fn spawn_markdown_origin() -> String {
    let origin = Router::new()
        .route(
            "/docs/overview.md",
            get(|| async { format!("# Welcome\n{}\n", LONG_BODY) }),
        )
        .route(
            "/docs/api.md",
            get(|| async { format!("# API\n{}\n## Auth\n{}\n", LONG_BODY, LONG_BODY) }),
        );
    spawn_router(origin).await
}

fn http_source(origin: &str) -> HttpSource {
    let files: BTreeMap<PageKey, String> = PageKey::ALL
        .iter()
        .map(|&page| (page, format!("{}.md", page)))
        .collect();
    HttpSource::new(
        &format!("{}/docs/", origin),
        files,
        Some(Duration::from_secs(5)),
    )
    .unwrap()
}

// ─── Server ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_api_test_and_health() {
    let tmp = TempDir::new().unwrap();
    let base = spawn_docs_server(&tmp).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/api/test", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "API is working!");

    let body: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_search_endpoint() {
    let tmp = TempDir::new().unwrap();
    let base = spawn_docs_server(&tmp).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(format!("{}/api/search", base))
        .query(&[("q", "authentication")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let results = body["results"].as_array().unwrap();
    assert!(!results.is_empty());
    assert!(results.len() <= 10);
    let first = &results[0];
    assert!(first["href"].as_str().unwrap().starts_with("?page="));
    assert!(first["title_html"].as_str().unwrap().contains("<mark>"));
    assert!(first["score"].as_u64().unwrap() >= 10);
}

#[tokio::test]
async fn test_search_endpoint_short_query() {
    let tmp = TempDir::new().unwrap();
    let base = spawn_docs_server(&tmp).await;

    let body: Value = reqwest::get(format!("{}/api/search?q=a", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["results"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_page_endpoint() {
    let tmp = TempDir::new().unwrap();
    let base = spawn_docs_server(&tmp).await;

    let resp = reqwest::get(format!("{}/api/pages/api", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["page"], "api");
    assert_eq!(body["title"], "API Documentation");
    assert_eq!(body["toc"][0]["anchor"], "toc-0");

    let listing: Value = reqwest::get(format!("{}/api/pages", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let pages = listing["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 9);
    let api = pages.iter().find(|p| p["key"] == "api").unwrap();
    assert_eq!(api["cached"], true);
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let base = spawn_docs_server(&tmp).await;

    let resp = reqwest::get(format!("{}/api/pages/nonexistent-page", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(
        body["error"]["message"],
        "content not found: nonexistent-page"
    );
}

#[tokio::test]
async fn test_shell_pages() {
    let tmp = TempDir::new().unwrap();
    let base = spawn_docs_server(&tmp).await;

    let resp = reqwest::get(format!("{}/?page=api", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("id=\"api-content\""));
    assert!(html.contains("class=\"active\" data-page=\"api\""));

    let html = reqwest::get(format!("{}/", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("id=\"overview-content\""));

    let resp = reqwest::get(format!("{}/?page=nope", base)).await.unwrap();
    assert_eq!(resp.status(), 404);
    let html = resp.text().await.unwrap();
    assert!(html.contains("Error loading content. Please try again."));
    assert!(html.contains("href=\"?page=nope\">Retry</a>"));
}

#[tokio::test]
async fn test_shell_decodes_percent_encoded_selection() {
    let tmp = TempDir::new().unwrap();
    let base = spawn_docs_server(&tmp).await;

    let resp = reqwest::get(format!("{}/?page=quick%2Dstart", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let html = resp.text().await.unwrap();
    assert!(html.contains("id=\"quick-start-content\""));

    let resp = reqwest::get(format!("{}/?theme=dark&page=%61pi", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("id=\"api-content\""));

    let resp = reqwest::get(format!("{}/?page=no%20such%26page", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let html = resp.text().await.unwrap();
    assert!(html.contains("content not found: no such&amp;page"));
    assert!(html.contains("href=\"?page=no+such%26page\">Retry</a>"));
}

#[tokio::test]
async fn test_theme_toggle_and_rebuild() {
    let tmp = TempDir::new().unwrap();
    let base = spawn_docs_server(&tmp).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .post(format!("{}/api/theme/toggle", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["theme"], "dark");

    let html = reqwest::get(format!("{}/", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("data-theme=\"dark\""));

    let body: Value = client
        .post(format!("{}/api/index/rebuild", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["records"].as_u64().unwrap() > 0);
    assert_eq!(body["skipped"].as_array().unwrap().len(), 0);
}

// ─── HTTP content source ────────────────────────────────────────────

#[tokio::test]
async fn test_http_source_fetches_and_reports_failures() {
    let origin = spawn_markdown_origin().await;
    let source = http_source(&origin);

    let text = source.fetch(PageKey::Api).await.unwrap();
    assert!(text.starts_with("# API"));

    match source.fetch(PageKey::Testing).await.unwrap_err() {
        DocsError::LoadFailed { page, cause } => {
            assert_eq!(page, PageKey::Testing);
            assert!(cause.contains("404"), "unexpected cause: {}", cause);
        }
        other => panic!("expected LoadFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_source_partial_index() {
    let origin = spawn_markdown_origin().await;
    let source = http_source(&origin);

    let build = build_index_from_source(&source).await;
    assert_eq!(build.records.len(), 3);
    assert_eq!(build.skipped.len(), 7);
    assert!(build
        .skipped
        .iter()
        .all(|e| matches!(e, DocsError::IndexBuildSkipped { .. })));
}

#[tokio::test]
async fn test_shell_reports_upstream_failure() {
    let tmp = TempDir::new().unwrap();
    let origin = spawn_markdown_origin().await;
    let (app, report) =
        DocsApp::with_source(test_config(&tmp), Arc::new(http_source(&origin))).await;
    assert_eq!(report.records, 3);

    let base = spawn_router(router(Arc::new(app))).await;

    let resp = reqwest::get(format!("{}/?page=testing", base)).await.unwrap();
    assert_eq!(resp.status(), 502);
    let html = resp.text().await.unwrap();
    assert!(html.contains("href=\"?page=testing\">Retry</a>"));

    let resp = reqwest::get(format!("{}/api/pages/testing", base)).await.unwrap();
    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "load_failed");

    let body: Value = reqwest::get(format!("{}/api/search?q=auth", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["results"][0]["title"], "Auth");
}
