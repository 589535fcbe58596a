//! Success envelope for API handlers.
//!
//! Every successful response body is `{ "success": true, "data": ... }`;
//! failures are rendered by [`crate::error::AppError`].

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
