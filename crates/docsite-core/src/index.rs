//! Heading-delimited section indexer.
//!
//! Splits each document at markdown heading markers and produces a flat list
//! of [`SectionRecord`]s for the query engine. The index is always rebuilt
//! wholesale; records are never patched in place.
//!
//! # Section rules
//!
//! 1. Split at every run of 1–6 `#` at the start of a line followed by
//!    whitespace. Text before the first heading is section 0.
//! 2. `title` is the first line of the section, or the document's display
//!    title when that line is blank.
//! 3. `body` is the remaining lines joined with single spaces.
//! 4. Sections whose body is 50 characters or shorter are dropped. Ordinals
//!    keep their split position, so gaps are expected.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::DocsError;
use crate::models::{Document, SectionRecord};
use crate::page::PageKey;
use crate::source::ContentSource;

/// Sections with a body of this many characters or fewer are not indexed.
pub const MIN_BODY_CHARS: usize = 50;

/// Maximum preview length before an ellipsis is appended.
pub const PREVIEW_CHARS: usize = 150;

const PREVIEW_STRIP: &[char] = &['#', '*', '`', '[', ']'];

fn heading_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#{1,6}\s+").expect("valid heading regex"))
}

/// Result of indexing every page a content source serves.
#[derive(Debug, Clone, Default)]
pub struct IndexBuild {
    pub records: Vec<SectionRecord>,
    /// One [`DocsError::IndexBuildSkipped`] per page that could not be indexed.
    pub skipped: Vec<DocsError>,
}

/// Build the index from documents already in memory.
pub fn build_index(documents: &[Document]) -> Vec<SectionRecord> {
    documents.iter().flat_map(index_document).collect()
}

/// Split one document into section records.
pub fn index_document(doc: &Document) -> Vec<SectionRecord> {
    index_text(doc.page, &doc.title, &doc.text)
}

fn index_text(page: PageKey, fallback_title: &str, text: &str) -> Vec<SectionRecord> {
    heading_marker()
        .split(text)
        .enumerate()
        .filter_map(|(ordinal, section)| {
            let mut lines = section.split('\n').map(|l| l.trim_end_matches('\r'));

            let first = lines.next().unwrap_or_default().trim();
            let title = if first.is_empty() {
                fallback_title.to_string()
            } else {
                first.to_string()
            };

            let body = lines.collect::<Vec<_>>().join(" ").trim().to_string();
            if body.chars().count() <= MIN_BODY_CHARS {
                return None;
            }

            Some(SectionRecord {
                page,
                title,
                preview: create_preview(&body),
                body,
                ordinal,
            })
        })
        .collect()
}

/// Strip markdown punctuation and cap the text at [`PREVIEW_CHARS`].
pub fn create_preview(body: &str) -> String {
    let cleaned: String = body.chars().filter(|c| !PREVIEW_STRIP.contains(c)).collect();
    let cleaned = cleaned.trim();

    if cleaned.chars().count() > PREVIEW_CHARS {
        let mut preview: String = cleaned.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    } else {
        cleaned.to_string()
    }
}

/// Fetch and index every page served by `source`.
///
/// A page that fails to fetch is recorded in [`IndexBuild::skipped`] and
/// logged; the remaining pages are still indexed.
pub async fn build_index_from_source(source: &dyn ContentSource) -> IndexBuild {
    let mut build = IndexBuild::default();

    for page in source.pages() {
        match source.fetch_document(page).await {
            Ok(doc) => {
                let records = index_document(&doc);
                debug!(page = %page, sections = records.len(), "indexed page");
                build.records.extend(records);
            }
            Err(e) => {
                warn!(page = %page, error = %e, "skipping page during index build");
                build.skipped.push(DocsError::IndexBuildSkipped {
                    page,
                    cause: e.to_string(),
                });
            }
        }
    }

    build
}
