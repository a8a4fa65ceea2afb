//! Server-rendered HTML shell.
//!
//! One document per `?page=` selection: navigation, the rendered page (or an
//! inline error with a retry link), the table of contents, and a search box.
//! Browser back/forward work without script because every selection is a
//! plain URL. The small inline script adds debounced search-as-you-type, the
//! theme toggle (kept in `localStorage["theme"]`), and keyboard shortcuts.

use docsite_core::models::RenderedPage;
use docsite_core::nav::page_href;
use docsite_core::query::escape_html;
use docsite_core::PageKey;

use crate::prefs::Theme;

/// What the main content area shows.
pub enum ShellBody<'a> {
    Page(&'a RenderedPage),
    /// Load failure. `retry_href` re-requests the same selection.
    Error { message: String, retry_href: String },
}

pub struct ShellView<'a> {
    pub current: Option<PageKey>,
    pub body: ShellBody<'a>,
    pub theme: Theme,
    pub debounce_ms: u64,
}

const STYLE: &str = r#"
:root { --bg: #ffffff; --surface: #f8fafc; --text: #1e293b; --muted: #64748b; --primary: #4f46e5; --border: #e2e8f0; }
[data-theme="dark"] { --bg: #0f172a; --surface: #1e293b; --text: #e2e8f0; --muted: #94a3b8; --primary: #818cf8; --border: #334155; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); }
header { display: flex; gap: 1rem; align-items: center; padding: .75rem 1.5rem; border-bottom: 1px solid var(--border); }
header .brand { font-weight: 600; margin-right: auto; }
#search { padding: .4rem .6rem; min-width: 18rem; border: 1px solid var(--border); border-radius: 6px; background: var(--surface); color: var(--text); }
#search-results { position: absolute; top: 3.5rem; right: 1.5rem; width: 28rem; max-height: 70vh; overflow: auto; background: var(--surface); border: 1px solid var(--border); border-radius: 8px; }
.search-result { display: block; padding: .75rem 1rem; border-bottom: 1px solid var(--border); color: inherit; text-decoration: none; }
.search-result p { margin: .25rem 0 0; font-size: .85rem; color: var(--muted); }
.result-page { font-size: .75rem; color: var(--muted); }
.layout { display: grid; grid-template-columns: 16rem 1fr 14rem; gap: 2rem; padding: 1.5rem; }
nav a { display: block; padding: .35rem .5rem; border-radius: 4px; color: inherit; text-decoration: none; }
nav a.active { background: var(--primary); color: #fff; }
.toc-item { display: block; font-size: .85rem; color: var(--muted); text-decoration: none; padding: .15rem 0; }
.toc-level-2 { padding-left: 1rem; } .toc-level-3 { padding-left: 1.5rem; } .toc-level-4, .toc-level-5, .toc-level-6 { padding-left: 2rem; }
.toc-empty { font-style: italic; color: var(--muted); }
.load-error { text-align: center; padding: 3rem; }
.retry-btn { display: inline-block; margin-top: 1rem; padding: .5rem 1rem; background: var(--primary); color: #fff; border-radius: 6px; text-decoration: none; }
pre { background: var(--surface); padding: 1rem; overflow: auto; border-radius: 6px; }
table { border-collapse: collapse; } td, th { border: 1px solid var(--border); padding: .3rem .6rem; }
mark { background: rgba(79, 70, 229, .2); color: inherit; }
"#;

const SCRIPT: &str = r#"
(function () {
  var root = document.documentElement;
  var stored = localStorage.getItem('theme');
  if (stored === 'light' || stored === 'dark') root.setAttribute('data-theme', stored);
  document.getElementById('theme-toggle').addEventListener('click', function () {
    var next = root.getAttribute('data-theme') === 'dark' ? 'light' : 'dark';
    root.setAttribute('data-theme', next);
    localStorage.setItem('theme', next);
  });

  var input = document.getElementById('search');
  var results = document.getElementById('search-results');
  var timer = null;
  function hide() { results.hidden = true; results.innerHTML = ''; }
  function show(data) {
    if (!data.results.length) {
      results.innerHTML = '<p class="search-result">No results found</p>';
    } else {
      results.innerHTML = data.results.map(function (r) {
        return '<a class="search-result" href="' + r.href + '"><strong>' + r.title_html +
          '</strong> <span class="result-page">' + r.page_title + '</span><p>' + r.preview_html + '</p></a>';
      }).join('');
    }
    results.hidden = false;
  }
  input.addEventListener('input', function () {
    clearTimeout(timer);
    timer = setTimeout(function () {
      var q = input.value;
      if (q.trim().length < 2) { hide(); return; }
      fetch('/api/search?q=' + encodeURIComponent(q))
        .then(function (r) { return r.json(); })
        .then(show)
        .catch(hide);
    }, __DEBOUNCE_MS__);
  });

  document.addEventListener('keydown', function (e) {
    if ((e.ctrlKey || e.metaKey) && e.key === 'k') { e.preventDefault(); input.focus(); }
    if (e.key === 'Escape') hide();
  });
})();
"#;

pub fn render_shell(view: &ShellView<'_>) -> String {
    let title = match &view.body {
        ShellBody::Page(page) => page.title.as_str(),
        ShellBody::Error { .. } => "Error",
    };

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html lang=\"en\" data-theme=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n",
        view.theme
    ));
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} · Itsriober Docs</title>\n",
        escape_html(title)
    ));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

    html.push_str("<header>\n<span class=\"brand\">Itsriober School Management System Docs</span>\n");
    html.push_str("<input id=\"search\" type=\"search\" placeholder=\"Search docs (Ctrl+K)\" autocomplete=\"off\">\n");
    html.push_str("<button id=\"theme-toggle\" type=\"button\">Toggle theme</button>\n");
    html.push_str("<div id=\"search-results\" hidden></div>\n</header>\n");

    html.push_str("<div class=\"layout\">\n");
    push_nav(&mut html, view.current);
    push_main(&mut html, &view.body);
    push_toc(&mut html, &view.body);
    html.push_str("</div>\n");

    html.push_str("<script>");
    html.push_str(&SCRIPT.replace("__DEBOUNCE_MS__", &view.debounce_ms.to_string()));
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

fn push_nav(html: &mut String, current: Option<PageKey>) {
    html.push_str("<nav>\n");
    for page in PageKey::ALL {
        let class = if Some(page) == current {
            " class=\"active\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<a href=\"{}\"{} data-page=\"{}\">{}</a>\n",
            page_href(page),
            class,
            page,
            page.title()
        ));
    }
    html.push_str("</nav>\n");
}

fn push_main(html: &mut String, body: &ShellBody<'_>) {
    html.push_str("<main>\n");
    match body {
        ShellBody::Page(page) => {
            html.push_str(&format!(
                "<div class=\"markdown-content\" id=\"{}-content\">\n",
                page.page
            ));
            html.push_str(&page.html);
            html.push_str("</div>\n");
        }
        ShellBody::Error {
            message,
            retry_href,
        } => {
            html.push_str("<div class=\"load-error\">\n");
            html.push_str("<p>Error loading content. Please try again.</p>\n");
            html.push_str(&format!(
                "<p class=\"error-detail\">{}</p>\n",
                escape_html(message)
            ));
            html.push_str(&format!(
                "<a class=\"retry-btn\" href=\"{}\">Retry</a>\n",
                escape_html(retry_href)
            ));
            html.push_str("</div>\n");
        }
    }
    html.push_str("</main>\n");
}

fn push_toc(html: &mut String, body: &ShellBody<'_>) {
    html.push_str("<aside id=\"toc\">\n<h4>On this page</h4>\n");
    match body {
        ShellBody::Page(page) if !page.toc.is_empty() => {
            for entry in &page.toc {
                html.push_str(&format!(
                    "<a class=\"toc-item toc-level-{}\" href=\"#{}\">{}</a>\n",
                    entry.level,
                    entry.anchor,
                    escape_html(&entry.text)
                ));
            }
        }
        _ => html.push_str("<p class=\"toc-empty\">No headings found</p>\n"),
    }
    html.push_str("</aside>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsite_core::models::TocEntry;

    fn page() -> RenderedPage {
        RenderedPage {
            page: PageKey::Api,
            title: "API Documentation".to_string(),
            html: "<h1 id=\"toc-0\">API</h1>\n".to_string(),
            toc: vec![TocEntry {
                level: 1,
                text: "API".to_string(),
                anchor: "toc-0".to_string(),
            }],
            text: "API".to_string(),
        }
    }

    #[test]
    fn test_page_shell_marks_active_nav_and_links_toc() {
        let rendered = page();
        let html = render_shell(&ShellView {
            current: Some(PageKey::Api),
            body: ShellBody::Page(&rendered),
            theme: Theme::Dark,
            debounce_ms: 300,
        });

        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains("<a href=\"?page=api\" class=\"active\" data-page=\"api\">API Documentation</a>"));
        assert!(html.contains("<a class=\"toc-item toc-level-1\" href=\"#toc-0\">API</a>"));
        assert!(html.contains("}, 300);"));
        assert!(!html.contains("__DEBOUNCE_MS__"));
    }

    #[test]
    fn test_error_shell_has_retry_link() {
        let html = render_shell(&ShellView {
            current: None,
            body: ShellBody::Error {
                message: "content not found: <nope>".to_string(),
                retry_href: "?page=nope".to_string(),
            },
            theme: Theme::Light,
            debounce_ms: 300,
        });

        assert!(html.contains("<a class=\"retry-btn\" href=\"?page=nope\">Retry</a>"));
        assert!(html.contains("content not found: &lt;nope&gt;"));
        assert!(html.contains("No headings found"));
        assert!(!html.contains("class=\"active\""));
    }
}
