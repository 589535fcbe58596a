//! Shared query parameter types for API handlers.

use scidraft_core::search::PageRequest;
use serde::Deserialize;

/// Page-based pagination parameters (`?page=&limit=`).
///
/// Values are clamped by [`PageRequest::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}
