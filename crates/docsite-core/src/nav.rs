//! Page selection from URLs and back/forward history.

use crate::error::Result;
use crate::page::PageKey;

/// Name of the query parameter that carries the selected page.
pub const PAGE_PARAM: &str = "page";

/// Select a page from the already-decoded value of the `page` parameter.
///
/// A missing or empty value selects [`PageKey::DEFAULT`]; an unknown value
/// fails with `ContentNotFound`.
pub fn page_from_param(value: Option<&str>) -> Result<PageKey> {
    match value.map(str::trim) {
        None | Some("") => Ok(PageKey::DEFAULT),
        Some(v) => v.parse(),
    }
}

/// Relative link selecting `page`.
pub fn page_href(page: PageKey) -> String {
    format!("?{}={}", PAGE_PARAM, page)
}

/// Back/forward stack of visited pages.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<PageKey>,
    cursor: usize,
}

impl History {
    pub fn new(start: PageKey) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    pub fn current(&self) -> PageKey {
        self.entries[self.cursor]
    }

    /// Record a navigation to `page`.
    ///
    /// Returns `false` without touching the stack when `page` is already
    /// current. Otherwise forward entries are dropped and `page` is pushed.
    pub fn visit(&mut self, page: PageKey) -> bool {
        if page == self.current() {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(page);
        self.cursor += 1;
        true
    }

    /// Step back; returns the page to re-select, or `None` at the start.
    pub fn back(&mut self) -> Option<PageKey> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward; returns the page to re-select, or `None` at the end.
    pub fn forward(&mut self) -> Option<PageKey> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(PageKey::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocsError;

    #[test]
    fn test_page_from_param() {
        assert_eq!(page_from_param(None).unwrap(), PageKey::Overview);
        assert_eq!(page_from_param(Some("")).unwrap(), PageKey::Overview);
        assert_eq!(page_from_param(Some("api")).unwrap(), PageKey::Api);
        assert_eq!(page_from_param(Some("quick-start")).unwrap(), PageKey::QuickStart);
        assert_eq!(
            page_from_param(Some("nonexistent-page")).unwrap_err(),
            DocsError::ContentNotFound("nonexistent-page".to_string())
        );
    }

    #[test]
    fn test_page_href() {
        assert_eq!(page_href(PageKey::QuickStart), "?page=quick-start");
    }

    #[test]
    fn test_visit_same_page_is_noop() {
        let mut history = History::default();
        assert!(!history.visit(PageKey::Overview));
        assert_eq!(history.back(), None);
    }

    #[test]
    fn test_back_and_forward() {
        let mut history = History::default();
        history.visit(PageKey::Api);
        history.visit(PageKey::Testing);

        assert_eq!(history.back(), Some(PageKey::Api));
        assert_eq!(history.back(), Some(PageKey::Overview));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some(PageKey::Api));
        assert_eq!(history.forward(), Some(PageKey::Testing));
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_visit_after_back_drops_forward_entries() {
        let mut history = History::default();
        history.visit(PageKey::Api);
        history.visit(PageKey::Testing);
        history.back();
        history.visit(PageKey::Structure);

        assert_eq!(history.current(), PageKey::Structure);
        assert_eq!(history.forward(), None);
        assert_eq!(history.back(), Some(PageKey::Api));
    }
}
