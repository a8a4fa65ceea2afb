//! Core data models shared by the indexer, query engine, and page loader.

use serde::Serialize;

use crate::page::PageKey;

/// Raw markdown for one page, as returned by a content source.
#[derive(Debug, Clone)]
pub struct Document {
    pub page: PageKey,
    /// Display title, used when a section has no heading text.
    pub title: String,
    pub text: String,
}

impl Document {
    pub fn new(page: PageKey, text: impl Into<String>) -> Self {
        Self {
            page,
            title: page.title().to_string(),
            text: text.into(),
        }
    }
}

/// A heading-delimited slice of a document, the unit of search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRecord {
    pub page: PageKey,
    pub title: String,
    pub body: String,
    /// Body with markdown punctuation stripped, capped at 150 characters.
    pub preview: String,
    /// Position of the section in the document's split sequence.
    pub ordinal: usize,
}

/// A section record that matched a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub section: SectionRecord,
    pub score: u32,
}

/// One entry of a page's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level, 1 through 6.
    pub level: u8,
    pub text: String,
    /// Element id of the rendered heading (`toc-<n>`).
    pub anchor: String,
}

/// A page converted to display markup, as held in the loader cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub page: PageKey,
    pub title: String,
    pub html: String,
    pub toc: Vec<TocEntry>,
    /// Plain-text rendering for terminal display.
    pub text: String,
}
