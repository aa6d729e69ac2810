//! Page-number pagination for post listings.

use std::num::NonZeroU32;

use agoat_api_types::PageMeta;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total: u64,
}

impl Pagination {
    /// Build pagination for a fetched page.
    ///
    /// When the API omits `meta` (or reports zero pages) the page count is
    /// estimated from the items on this page. There is always at least one page,
    /// and `current` is clamped to `1..=total_pages`.
    pub fn from_response(
        current: u32,
        per_page: NonZeroU32,
        meta: Option<&PageMeta>,
        items_on_page: usize,
    ) -> Self {
        let items = u64::try_from(items_on_page).unwrap_or(u64::MAX);
        let estimated_pages = items.div_ceil(u64::from(per_page.get()));
        let estimated_pages = u32::try_from(estimated_pages).unwrap_or(u32::MAX);

        let total_pages = meta
            .map(|meta| meta.total_pages)
            .filter(|pages| *pages > 0)
            .unwrap_or(estimated_pages)
            .max(1);
        let total = meta
            .map(|meta| meta.total)
            .filter(|total| *total > 0)
            .unwrap_or(items);

        Self {
            current: current.clamp(1, total_pages),
            per_page: per_page.get(),
            total_pages,
            total,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Move to `page` if it lies within `1..=total_pages`. Returns whether the
    /// page changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        if (1..=self.total_pages).contains(&page) && page != self.current {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }
}
