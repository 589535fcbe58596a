//! Repository for the `manual_templates` table.

use sqlx::PgPool;

use crate::models::template::{
    CreateTemplate, ManualTemplate, TemplateFilter, TemplateSummary, UpdateTemplate,
};

const COLUMNS: &str = "id, title, course_code, practical_number, practical_content, metadata, \
                        is_published, created_at, updated_at";

const SUMMARY_COLUMNS: &str =
    "id, title, course_code, practical_number, metadata, is_published, updated_at";

/// Shared `WHERE` clause for listing and counting; binds `$1..$3`.
const FILTER: &str = "($1::text IS NULL OR title ILIKE $1 OR course_code ILIKE $1)
               AND ($2::text IS NULL OR course_code = $2)
               AND ($3 OR is_published)";

/// Provides CRUD operations for manual templates.
pub struct TemplateRepo;

impl TemplateRepo {
    pub async fn create(pool: &PgPool, input: &CreateTemplate) -> Result<ManualTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO manual_templates
                (id, title, course_code, practical_number, practical_content, metadata, is_published)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, '{{}}'::jsonb), COALESCE($7, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ManualTemplate>(&query)
            .bind(&input.id)
            .bind(&input.title)
            .bind(&input.course_code)
            .bind(input.practical_number)
            .bind(&input.practical_content)
            .bind(&input.metadata)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Find a template by id regardless of publication state.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<ManualTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manual_templates WHERE id = $1");
        sqlx::query_as::<_, ManualTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a template students are allowed to see.
    pub async fn find_published(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<ManualTemplate>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM manual_templates WHERE id = $1 AND is_published");
        sqlx::query_as::<_, ManualTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List template summaries ordered by course code then practical number.
    pub async fn list(
        pool: &PgPool,
        filter: &TemplateFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TemplateSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM manual_templates
             WHERE {FILTER}
             ORDER BY course_code ASC NULLS LAST, practical_number ASC NULLS LAST, title ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, TemplateSummary>(&query)
            .bind(&filter.pattern)
            .bind(&filter.course_code)
            .bind(filter.include_unpublished)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &TemplateFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM manual_templates WHERE {FILTER}");
        sqlx::query_scalar(&query)
            .bind(&filter.pattern)
            .bind(&filter.course_code)
            .bind(filter.include_unpublished)
            .fetch_one(pool)
            .await
    }

    /// Update a template. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateTemplate,
    ) -> Result<Option<ManualTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE manual_templates SET
                title = COALESCE($2, title),
                course_code = COALESCE($3, course_code),
                practical_number = COALESCE($4, practical_number),
                practical_content = COALESCE($5, practical_content),
                metadata = COALESCE($6, metadata),
                is_published = COALESCE($7, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ManualTemplate>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.course_code)
            .bind(input.practical_number)
            .bind(&input.practical_content)
            .bind(&input.metadata)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM manual_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
