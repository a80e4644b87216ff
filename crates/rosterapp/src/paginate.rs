//! # Pagination
//!
//! [`paginate`] is pure slicing and is shared by the owner grid and the
//! definition management list. [`PageState`] is the small piece of view state
//! that sits next to it: current page and page size, with the rule that any
//! change of search or page size sends the view back to the first page.

use crate::attributes::SearchInput;

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    /// Never less than 1, even for an empty collection
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// 1-based inclusive bounds of the items on this page, for a
    /// "showing X-Y of N" line. `None` when the page is empty.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = self.page_index * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

/// Slice `items` into page `page_index` of `page_size` items.
///
/// A page size of zero is treated as one. Out-of-range pages are empty.
pub fn paginate<T: Clone>(items: &[T], page_index: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);

    let start = page_index.saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page_index,
        page_size,
        total_pages,
        total_items,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SearchKey {
    field: String,
    input: SearchInput,
}

/// Current page position for a paginated view.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    page_index: usize,
    page_size: usize,
    last_search: Option<SearchKey>,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            last_search: None,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changing the page size always resets to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    /// Record the search the next page will be computed for; a different
    /// field or input than last time resets to the first page.
    pub fn observe_search(&mut self, field: &str, input: &SearchInput) {
        let key = SearchKey {
            field: field.to_string(),
            input: input.clone(),
        };
        if self.last_search.as_ref() != Some(&key) {
            self.page_index = 0;
            self.last_search = Some(key);
        }
    }

    pub fn go_to(&mut self, page_index: usize, total_pages: usize) {
        self.page_index = page_index.min(total_pages.max(1) - 1);
    }

    pub fn first(&mut self) {
        self.page_index = 0;
    }

    pub fn previous(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn next(&mut self, total_pages: usize) {
        self.go_to(self.page_index + 1, total_pages);
    }

    pub fn last(&mut self, total_pages: usize) {
        self.go_to(total_pages.saturating_sub(1), total_pages);
    }

    pub fn apply<T: Clone>(&self, items: &[T]) -> Page<T> {
        paginate(items, self.page_index, self.page_size)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(10)
    }
}
