//! Pagination helpers shared by list endpoints.
//!
//! The public API is page based (`?page=&limit=`); repositories work with
//! `LIMIT`/`OFFSET`. [`PageRequest`] converts between the two after
//! clamping user input.

use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of rows per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of results plus the total row count.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + request.limit - 1) / request.limit
        };
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
            total_pages,
        }
    }
}

/// Escape `%`, `_` and `\` so user input can sit inside an `ILIKE` pattern.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a `%term%` pattern from a trimmed, non-empty search term.
pub fn contains_pattern(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!("%{}%", escape_like(t)))
}
