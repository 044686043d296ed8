// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// 1-based page cursor over a server-counted result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    page_size: u32,
    total: u64,
}

impl Pagination {
    /// Starts at page 1 with nothing counted yet.
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Total number of items as last reported by the server.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Records the total reported by the server.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Number of pages, zero when there is nothing to show.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Goes back to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Moves to `page` if it exists. Returns whether the page changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        if page == 0 || page > self.total_pages().max(1) || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }
}
