//! Page-link window rendered under list tables.

use serde::Serialize;

/// How many page links surround the edges and the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub edge_left: usize,
    pub before_current: usize,
    pub after_current: usize,
    pub edge_right: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            edge_left: 2,
            before_current: 2,
            after_current: 4,
            edge_right: 2,
        }
    }
}

impl PageWindow {
    fn contains(&self, page: usize, current: usize, total: usize) -> bool {
        page <= self.edge_left
            || page + self.edge_right > total
            || (page + self.before_current >= current && page <= current + self.after_current)
    }
}

/// Page numbers to link to; `None` marks an elided gap.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageLinks {
    pub pages: Vec<Option<usize>>,
    pub current: usize,
}

impl PageLinks {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self::with_window(current_page, total_pages, PageWindow::default())
    }

    pub fn with_window(current_page: usize, total_pages: usize, window: PageWindow) -> Self {
        let current = current_page.max(1);
        let mut pages = Vec::new();
        let mut previous = 0;

        for page in (1..=total_pages).filter(|&p| window.contains(p, current, total_pages)) {
            if page > previous + 1 {
                pages.push(None);
            }
            pages.push(Some(page));
            previous = page;
        }

        Self { pages, current }
    }
}
