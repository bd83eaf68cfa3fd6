//! Paging request and result envelope for list queries

use serde::{Deserialize, Serialize};

/// Requested page of a list query.
///
/// Construction never fails; stores derive a [`PageWindow`] and clamp
/// out-of-range values there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingDto {
    page_number: i32,
    page_size: i32,
}

impl PagingDto {
    pub const fn new(page_number: i32, page_size: i32) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    pub const fn page_number(&self) -> i32 {
        self.page_number
    }

    pub const fn page_size(&self) -> i32 {
        self.page_size
    }

    /// Offset/limit for a store query. Negative page numbers read the first
    /// page; non-positive page sizes read nothing.
    pub fn window(&self) -> PageWindow {
        let limit = u64::try_from(self.page_size.max(0)).unwrap_or(0);
        let page = u64::try_from(self.page_number.max(0)).unwrap_or(0);

        PageWindow {
            offset: page.saturating_mul(limit),
            limit,
        }
    }
}

/// Offset and limit derived from a [`PagingDto`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    /// Apply the window to an already ordered iterator
    pub fn apply<T>(&self, items: impl Iterator<Item = T>) -> Vec<T> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);

        items.skip(offset).take(limit).collect()
    }
}

/// One page of results with the total count across all pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: i32,
    pub page_size: i32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, paging: &PagingDto, total: u64) -> Self {
        Self {
            items,
            page_number: paging.page_number(),
            page_size: paging.page_size(),
            total,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total: self.total,
        }
    }
}
