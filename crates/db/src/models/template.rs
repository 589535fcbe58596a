//! Manual template model and DTOs.

use scidraft_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full row from the `manual_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ManualTemplate {
    pub id: String,
    pub title: String,
    pub course_code: Option<String>,
    pub practical_number: Option<i32>,
    pub practical_content: String,
    pub metadata: serde_json::Value,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing projection without the (large) practical content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemplateSummary {
    pub id: String,
    pub title: String,
    pub course_code: Option<String>,
    pub practical_number: Option<i32>,
    pub metadata: serde_json::Value,
    pub is_published: bool,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplate {
    pub id: String,
    pub title: String,
    pub course_code: Option<String>,
    pub practical_number: Option<i32>,
    pub practical_content: String,
    pub metadata: Option<serde_json::Value>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTemplate {
    pub title: Option<String>,
    pub course_code: Option<String>,
    pub practical_number: Option<i32>,
    pub practical_content: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub is_published: Option<bool>,
}

/// Filters for template listing.
#[derive(Debug, Default)]
pub struct TemplateFilter {
    /// `ILIKE` pattern matched against title and course code.
    pub pattern: Option<String>,
    pub course_code: Option<String>,
    pub include_unpublished: bool,
}
