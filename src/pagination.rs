//! Page requests, page results and the pagination response headers.
//!
//! Requests use `page` (0-based), `size` and repeated `sort=property[,asc|desc]`
//! parameters:
//!
//! ```text
//! GET /api/cars?page=1&size=10&sort=price,desc&sort=id
//! ```
//!
//! Responses carry the total in `X-Total-Count` and navigation links in an
//! RFC 5988 `Link` header.

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, LINK};
use sea_orm::Order;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;
/// Largest row offset a database accepts (`OFFSET` is a signed 64-bit value).
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

#[derive(Debug, Clone, PartialEq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Order,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pageable {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl Pageable {
    #[must_use]
    pub fn of(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, property: impl Into<String>, direction: Order) -> Self {
        self.sort.push(SortOrder {
            property: property.into(),
            direction,
        });
        self
    }

    /// Index of the first row on this page, or `None` when `page * size`
    /// exceeds [`MAX_OFFSET`].
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        self.page
            .checked_mul(self.size)
            .filter(|offset| *offset <= MAX_OFFSET)
    }

    /// Read `page`, `size` and `sort` from raw query pairs.
    ///
    /// Values that do not parse fall back to the defaults; other keys are ignored.
    #[must_use]
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut pageable = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "page" => {
                    if let Ok(page) = value.trim().parse() {
                        pageable.page = page;
                    }
                }
                "size" => {
                    if let Ok(size) = value.trim().parse::<u64>()
                        && size > 0
                    {
                        pageable.size = size.min(MAX_PAGE_SIZE);
                    }
                }
                "sort" => pageable.sort.extend(parse_sort(value)),
                _ => {}
            }
        }

        pageable
    }
}

/// Parse `price,desc` or `make,model,asc`: the trailing direction applies to
/// every property listed before it. No direction means ascending.
fn parse_sort(value: &str) -> Vec<SortOrder> {
    let mut parts: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    let direction = match parts.last().map(|last| last.to_ascii_lowercase()) {
        Some(last) if last == "desc" => {
            parts.pop();
            Order::Desc
        }
        Some(last) if last == "asc" => {
            parts.pop();
            Order::Asc
        }
        _ => Order::Asc,
    };

    parts
        .into_iter()
        .map(|property| SortOrder {
            property: property.to_string(),
            direction: direction.clone(),
        })
        .collect()
}

/// One window of a result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page: u64,
    pub size: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }
}

/// Keep header values to visible ASCII
fn sanitize_base_path(path: &str) -> String {
    path.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

fn page_uri(base_path: &str, page: u64, size: u64) -> String {
    format!("{base_path}?page={page}&size={size}")
}

/// Build `X-Total-Count` and `Link` (`next`, `prev`, `last`, `first`) headers.
#[must_use]
pub fn pagination_headers<T>(base_path: &str, page: &Page<T>) -> HeaderMap {
    let base_path = sanitize_base_path(base_path);
    let mut links = Vec::new();

    if page.page.saturating_add(1) < page.total_pages() {
        links.push(format!(
            "<{}>; rel=\"next\"",
            page_uri(&base_path, page.page + 1, page.size)
        ));
    }
    if page.page > 0 {
        links.push(format!(
            "<{}>; rel=\"prev\"",
            page_uri(&base_path, page.page - 1, page.size)
        ));
    }
    let last_page = page.total_pages().saturating_sub(1);
    links.push(format!(
        "<{}>; rel=\"last\"",
        page_uri(&base_path, last_page, page.size)
    ));
    links.push(format!("<{}>; rel=\"first\"", page_uri(&base_path, 0, page.size)));

    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(page.total_elements));
    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(LINK, value);
    }
    headers
}
