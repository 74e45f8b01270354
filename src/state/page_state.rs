/// Pagination state for a single listing scan
///
/// A fresh value is created for every scan and consumed when the scan returns,
/// so page numbers never leak from one target into the next.
use std::collections::BTreeSet;

/// Progress of one scan over a target's result pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// Page being processed, starting at 1
    current_page: u32,

    /// Last page advertised by the site's pagination list, once seen
    last_page: Option<u32>,

    /// Ad URLs accumulated so far; set semantics dedupe across pages
    links: BTreeSet<String>,
}

impl PageState {
    /// Starts a scan on page 1 with nothing collected
    pub fn new() -> Self {
        Self {
            current_page: 1,
            last_page: None,
            links: BTreeSet::new(),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn last_page(&self) -> Option<u32> {
        self.last_page
    }

    pub fn links(&self) -> &BTreeSet<String> {
        &self.links
    }

    /// Records the last page advertised on the current page
    ///
    /// A page without a pagination list keeps what earlier pages reported.
    pub fn observe_last_page(&mut self, last_page: Option<u32>) {
        if let Some(last) = last_page {
            self.last_page = Some(last);
        }
    }

    /// Adds an ad URL, returning false when it was already collected
    pub fn add_link(&mut self, url: String) -> bool {
        self.links.insert(url)
    }

    /// True once the page bound has been reached
    pub fn reached_max(&self, max_pages: u32) -> bool {
        self.current_page >= max_pages
    }

    /// True when the site said the current page is its last one
    pub fn reached_last(&self) -> bool {
        self.last_page
            .is_some_and(|last| self.current_page >= last)
    }

    /// Moves on to the following page, keeping everything collected
    pub fn next_page(self) -> Self {
        Self {
            current_page: self.current_page + 1,
            ..self
        }
    }

    /// Ends the scan, handing over the collected URLs
    pub fn into_links(self) -> BTreeSet<String> {
        self.links
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_on_first_page() {
        let state = PageState::new();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.last_page(), None);
        assert!(state.links().is_empty());
    }

    #[test]
    fn test_links_are_deduplicated() {
        let mut state = PageState::new();
        assert!(state.add_link("https://www.example.test/d/1".to_string()));
        assert!(!state.add_link("https://www.example.test/d/1".to_string()));
        assert_eq!(state.links().len(), 1);
    }

    #[test]
    fn test_next_page_keeps_links() {
        let mut state = PageState::new();
        state.add_link("https://www.example.test/d/1".to_string());
        let state = state.next_page();

        assert_eq!(state.current_page(), 2);
        assert_eq!(state.links().len(), 1);
    }

    #[test]
    fn test_reached_max() {
        let state = PageState::new();
        assert!(!state.reached_max(2));
        assert!(state.reached_max(1));

        let state = state.next_page();
        assert!(state.reached_max(2));
    }

    #[test]
    fn test_last_page_is_sticky() {
        let mut state = PageState::new();
        assert!(!state.reached_last());

        state.observe_last_page(Some(3));
        state.observe_last_page(None);
        assert_eq!(state.last_page(), Some(3));

        let state = state.next_page().next_page();
        assert!(state.reached_last());
    }

    #[test]
    fn test_single_page_site() {
        let mut state = PageState::new();
        state.observe_last_page(Some(1));
        assert!(state.reached_last());
    }
}
