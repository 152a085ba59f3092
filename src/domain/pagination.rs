use serde::{Deserialize, Serialize};

/// Pagination state of a list screen.
///
/// `current_page` stays within `[1, max(total_pages, 1)]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
    total_items: usize,
    total_pages: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
            total_pages: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Moves to `page`, clamped to the known page range.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages.max(1));
    }

    /// Changes the page size and returns to the first page.
    pub fn resize(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn first_page(&mut self) {
        self.current_page = 1;
    }

    /// Records totals reported by the API for the page that was requested.
    pub fn set_totals(&mut self, page: usize, total_items: usize, total_pages: usize) {
        self.total_items = total_items;
        self.total_pages = total_pages;
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    /// Drops totals and returns to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.total_items = 0;
        self.total_pages = 0;
    }
}
