//! Page arithmetic (1-based pages).

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Whether a collection of `len` rows is split into pages at all.
///
/// A collection that fits on one page is never paginated: exactly
/// `items_per_page` rows render as a single page with no controls, although
/// a `len >= items_per_page` threshold would enable them. The rows shown are
/// the same either way.
pub fn can_paginate(len: usize, items_per_page: usize) -> bool {
    len > items_per_page.max(1)
}

/// `ceil(len / items_per_page)`.
pub fn total_pages(len: usize, items_per_page: usize) -> usize {
    len.div_ceil(items_per_page.max(1))
}

/// Pagination control state for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub can_paginate: bool,
    /// 1-based index of the first shown row ("Showing start to end of total").
    /// Always 1 when not paginating, so an empty view reads "1 to 0 of 0".
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl Pagination {
    /// Compute the control state. `current_page` is clamped into range.
    pub fn compute(total: usize, items_per_page: usize, current_page: usize) -> Self {
        let per_page = items_per_page.max(1);
        let can_paginate = can_paginate(total, per_page);
        let total_pages = total_pages(total, per_page);

        if !can_paginate {
            return Self {
                current_page: 1,
                total_pages: total_pages.max(1),
                can_paginate,
                start: 1,
                end: total,
                total,
            };
        }

        let current_page = current_page.clamp(1, total_pages);
        Self {
            current_page,
            total_pages,
            can_paginate,
            start: (current_page - 1) * per_page + 1,
            end: (current_page * per_page).min(total),
            total,
        }
    }

    /// Row range of the current page within the sorted collection.
    pub fn row_range(&self) -> core::ops::Range<usize> {
        if self.total == 0 {
            0..0
        } else {
            self.start - 1..self.end
        }
    }

    pub fn back_enabled(&self) -> bool {
        self.can_paginate && self.current_page > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.can_paginate && self.current_page < self.total_pages
    }

    /// Page buttons to show. A single, fixed page 1 when not paginating.
    pub fn page_numbers(&self) -> Vec<usize> {
        if self.can_paginate {
            (1..=self.total_pages).collect()
        } else {
            vec![1]
        }
    }
}
