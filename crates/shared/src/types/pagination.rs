//! Pagination types for list views and backend pages.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    50
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Creates a page request. A page of 0 is treated as the first page.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    /// Index of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Returns the page size.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// Slices `[(page-1)*per_page, page*per_page)` out of `items`.
    ///
    /// Pages past the end yield an empty slice.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset())
            .unwrap_or(usize::MAX)
            .min(items.len());
        let end = start
            .saturating_add(self.per_page as usize)
            .min(items.len());
        &items[start..end]
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl PageMeta {
    /// Builds metadata for `total` items split into pages of `per_page`.
    #[must_use]
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if total == 0 || per_page == 0 {
            1
        } else {
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }

    /// Position of the last item shown on this page (1-based), for
    /// "showing 51-100 of 230" labels.
    #[must_use]
    pub fn last_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.per_page)).min(self.total)
    }
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            data,
            meta: PageMeta::new(page, per_page, total),
        }
    }

    /// An empty first page.
    #[must_use]
    pub fn empty(per_page: u32) -> Self {
        Self::new(Vec::new(), 1, per_page, 0)
    }

    /// Slices `request`'s page out of the full result set.
    #[must_use]
    pub fn from_slice(items: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        Self::new(
            request.slice(items).to_vec(),
            request.page,
            request.per_page,
            items.len() as u64,
        )
    }
}

/// Page shape returned by the Spring backend (`/api/contratos`, users).
///
/// `number` is 0-indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringPage<T> {
    /// Items of this page.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Items across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Current page (0-indexed).
    #[serde(default)]
    pub number: u32,
    /// Requested page size.
    #[serde(default)]
    pub size: u32,
    /// Whether this is the first page.
    #[serde(default)]
    pub first: bool,
    /// Whether this is the last page.
    #[serde(default)]
    pub last: bool,
}

impl<T> SpringPage<T> {
    /// Maps the page content, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SpringPage<U> {
        SpringPage {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
        }
    }
}

/// Page numbers shown in the pager strip: at most `window` pages centred on
/// `current` and clamped to `1..=total_pages`.
#[must_use]
pub fn visible_pages(current: u32, total_pages: u32, window: u32) -> Vec<u32> {
    if total_pages == 0 || window == 0 {
        return Vec::new();
    }

    let mut start = current.saturating_sub(window / 2).max(1);
    let end = total_pages.min(start + window - 1);
    if end - start < window - 1 {
        start = end.saturating_sub(window - 1).max(1);
    }

    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_default() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 50);
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(1, 20).offset(), 0);
        assert_eq!(PageRequest::new(2, 20).offset(), 20);
        assert_eq!(PageRequest::new(0, 20).offset(), 0);
    }

    #[test]
    fn test_page_request_slice() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(PageRequest::new(1, 10).slice(&items), &items[0..10]);
        assert_eq!(PageRequest::new(3, 10).slice(&items), &items[20..25]);
        assert!(PageRequest::new(4, 10).slice(&items).is_empty());
    }

    #[test]
    fn test_page_response_pagination() {
        // 25 items, 10 per page -> 3 pages
        let response: PageResponse<i32> = PageResponse::new(vec![], 1, 10, 25);
        assert_eq!(response.meta.total_pages, 3);
    }

    #[test]
    fn test_page_response_empty() {
        let response: PageResponse<i32> = PageResponse::empty(10);
        assert_eq!(response.meta.total_pages, 1);
        assert_eq!(response.meta.total, 0);
    }

    #[test]
    fn test_page_response_from_slice() {
        let items: Vec<u32> = (1..=12).collect();
        let response = PageResponse::from_slice(&items, PageRequest::new(2, 5));
        assert_eq!(response.data, vec![6, 7, 8, 9, 10]);
        assert_eq!(response.meta.total, 12);
        assert_eq!(response.meta.total_pages, 3);
        assert_eq!(response.meta.last_item(), 10);
    }

    #[test]
    fn test_spring_page_decode() {
        let json = r#"{"content":[1,2],"totalElements":12,"totalPages":6,"number":0,"size":2,"first":true,"last":false}"#;
        let page: SpringPage<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2]);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 6);
        assert!(page.first);

        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.content, vec![10, 20]);
        assert_eq!(mapped.total_elements, 12);
    }

    #[test]
    fn test_spring_page_missing_fields() {
        let page: SpringPage<u32> = serde_json::from_str("{}").unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn test_visible_pages() {
        assert_eq!(visible_pages(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(6, 10, 5), vec![4, 5, 6, 7, 8]);
        assert_eq!(visible_pages(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(visible_pages(2, 3, 5), vec![1, 2, 3]);
        assert!(visible_pages(1, 0, 5).is_empty());
    }
}
