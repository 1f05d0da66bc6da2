// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page cursor over a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.per_page)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        let total = self.total_pages(len);
        total > 0 && self.page < total
    }

    /// Items on the current page. A page past the end yields an empty slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.per_page).min(items.len());
        let end = start.saturating_add(self.per_page).min(items.len());
        &items[start..end]
    }

    pub fn next(self, len: usize) -> Self {
        if self.has_next(len) {
            Self {
                page: self.page + 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Jumps to `page`, kept within the first and last page.
    pub fn go_to(self, page: usize, len: usize) -> Self {
        let last = self.total_pages(len).max(1);
        Self {
            page: page.clamp(1, last),
            ..self
        }
    }

    pub fn prev(self) -> Self {
        if self.has_prev() {
            Self {
                page: self.page - 1,
                ..self
            }
        } else {
            self
        }
    }
}
