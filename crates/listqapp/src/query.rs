//! # Query State
//!
//! [`QueryState`] is the caller-held value describing what the user asked for:
//! a free-text term, field filters, a 1-based page, and an optional sort.
//!
//! ## Page Rules
//!
//! - Changing the search term, a filter, or the sort resets `page` to 1. A
//!   narrower result set would otherwise leave the user on a page that no
//!   longer exists.
//! - After running a query, call [`QueryState::sync`] with the result so
//!   `page` holds the clamped value the pipeline actually served.
//! - `page` is never 0; setters clamp it up to 1.
//!
//! The state is serializable so a caller can persist it between sessions via
//! [`crate::store::Persist`].

use serde::{Deserialize, Serialize};

use crate::filter::{FilterSet, FilterValue};
use crate::paginate::ResultPage;
use crate::sort::SortKey;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryState {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub filters: FilterSet,
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
}

fn first_page() -> usize {
    1
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filters: FilterSet::new(),
            page: first_page(),
            sort: None,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search_term(term);
        self
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: FilterValue) -> Self {
        self.set_filter(name, value);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.set_sort(Some(sort));
        self
    }

    /// Update the search term. Resets to page 1 when the term changes.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_term {
            self.search_term = term;
            self.page = first_page();
        }
    }

    /// Update one filter. Resets to page 1 when the selection changes.
    pub fn set_filter(&mut self, name: impl Into<String>, value: FilterValue) {
        let name = name.into();
        if self.filters.get(&name) != Some(&value) {
            self.filters.set(name, value);
            self.page = first_page();
        }
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.page = first_page();
        }
        self.filters.clear();
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        if sort != self.sort {
            self.sort = sort;
            self.page = first_page();
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Adopt the clamped page from a result computed for this state.
    pub fn sync(&mut self, result: &ResultPage) {
        self.page = result.page;
    }
}
