//! Term-overlap query engine over the section index.
//!
//! # Scoring
//!
//! The query is lowercased and split on single spaces; tokens of one
//! character or less are dropped. For each section and each token:
//!
//! - `+10` when the token equals the lowercased title,
//! - otherwise `+5` when the title contains the token,
//! - and independently `+1` when the body contains the token.
//!
//! Title and body bonuses add up for the same token. Sections scoring zero
//! are dropped; the rest are stably sorted by descending score (ties keep
//! index order) and truncated to [`MAX_RESULTS`].

use regex::{Regex, RegexBuilder};

use crate::models::{SearchResult, SectionRecord};

/// Queries shorter than this (after trimming) are treated as "no search".
pub const MIN_QUERY_CHARS: usize = 2;

/// Upper bound on the number of results returned.
pub const MAX_RESULTS: usize = 10;

const EXACT_TITLE_SCORE: u32 = 10;
const TITLE_SCORE: u32 = 5;
const BODY_SCORE: u32 = 1;

/// Whether `query` is long enough to run a search at all.
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Lowercase, split on single spaces, drop tokens of length 1 or less.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(' ')
        .filter(|t| t.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Score every section in `index` against `query` and return the top matches.
///
/// Never fails: an empty index, a too-short query, or a query with no usable
/// tokens all yield an empty result.
pub fn search(index: &[SectionRecord], query: &str) -> Vec<SearchResult> {
    if !is_searchable(query) {
        return Vec::new();
    }

    let terms = tokenize(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = index
        .iter()
        .filter_map(|section| {
            let score = score_section(section, &terms);
            (score > 0).then(|| SearchResult {
                section: section.clone(),
                score,
            })
        })
        .collect();

    // sort_by is stable, so equal scores keep index order.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(MAX_RESULTS);
    results
}

fn score_section(section: &SectionRecord, terms: &[String]) -> u32 {
    let title = section.title.to_lowercase();
    let body = section.body.to_lowercase();

    terms
        .iter()
        .map(|term| {
            let mut score = 0;
            if title == *term {
                score += EXACT_TITLE_SCORE;
            } else if title.contains(term.as_str()) {
                score += TITLE_SCORE;
            }
            if body.contains(term.as_str()) {
                score += BODY_SCORE;
            }
            score
        })
        .sum()
}

/// HTML-escape `text` and wrap case-insensitive matches of any query token
/// in `<mark>` tags, keeping the original casing of the matched text.
///
/// All tokens are matched in a single pass over the unescaped text, longest
/// first, so markup inserted for one token is never rescanned for another.
pub fn highlight_terms(text: &str, query: &str) -> String {
    let Some(re) = token_pattern(query) else {
        return escape_html(text);
    };

    let mut highlighted = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in re.find_iter(text) {
        highlighted.push_str(&escape_html(&text[last..m.start()]));
        highlighted.push_str("<mark>");
        highlighted.push_str(&escape_html(m.as_str()));
        highlighted.push_str("</mark>");
        last = m.end();
    }
    highlighted.push_str(&escape_html(&text[last..]));
    highlighted
}

fn token_pattern(query: &str) -> Option<Regex> {
    let mut terms = tokenize(query);
    terms.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    terms.dedup();
    if terms.is_empty() {
        return None;
    }

    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .ok()
}

/// Minimal HTML escaping for text interpolated into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
