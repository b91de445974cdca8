//! Page requests and paginated results.

use crate::model::api::{ApiResponse, PaginationDto};

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;

    /// Builds a request from optional query values.
    ///
    /// `page` defaults to 1 and is at least 1. `limit` defaults to 10 and is clamped
    /// to `1..=100`.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Zero-based page index as expected by SeaORM's paginator.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            limit: request.limit,
            total,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.limit)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }

    pub fn pagination(&self) -> PaginationDto {
        PaginationDto {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages(),
        }
    }

    /// Converts the page into the list envelope, mapping each item to its DTO.
    pub fn into_envelope<U>(
        self,
        message: impl Into<String>,
        f: impl FnMut(T) -> U,
    ) -> ApiResponse<Vec<U>> {
        let pagination = self.pagination();
        let items = self.items.into_iter().map(f).collect();

        ApiResponse::paginated(message, items, pagination)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let request = PageRequest::new(None, None);

        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 10);
        assert_eq!(request.index(), 0);
    }

    #[test]
    fn clamps_limit_and_page() {
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { page: 1, limit: 1 });
        assert_eq!(PageRequest::new(Some(3), Some(500)).limit, 100);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Paginated::new(vec![1, 2, 3], PageRequest::new(Some(1), Some(3)), 7);

        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Paginated<i32> = Paginated::new(vec![], PageRequest::default(), 0);

        assert_eq!(page.total_pages(), 0);
    }
}
