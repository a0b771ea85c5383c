use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::report::errors::ReportError;
use crate::domain::report::models::Markdown;
use crate::domain::report::models::Report;
use crate::domain::report::models::ReportId;
use crate::domain::report::ports::ReportRepository;
use crate::domain::user::models::Pagination;
use crate::domain::user::models::UserId;

#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: Uuid,
    user_id: Uuid,
    markdown: String,
    html: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ReportRow> for Report {
    type Error = ReportError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        Ok(Report {
            id: ReportId(row.id),
            user_id: UserId(row.user_id),
            markdown: Markdown::new(row.markdown)?,
            html: row.html,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ReportError {
    ReportError::DatabaseError(e.to_string())
}

pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn create(&self, report: Report) -> Result<Report, ReportError> {
        sqlx::query(
            r#"
            INSERT INTO reports (id, user_id, markdown, html, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(report.id.0)
        .bind(report.user_id.0)
        .bind(report.markdown.as_str())
        .bind(&report.html)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(report)
    }

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, ReportError> {
        let row = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT id, user_id, markdown, html, created_at, updated_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Report::try_from).transpose()
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        pagination: Pagination,
    ) -> Result<Vec<Report>, ReportError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT id, user_id, markdown, html, created_at, updated_at
            FROM reports
            WHERE user_id = $1
            ORDER BY created_at DESC
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(owner.0)
        .bind(i64::from(pagination.skip))
        .bind(i64::from(pagination.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Report::try_from).collect()
    }

    async fn update(&self, report: Report) -> Result<Report, ReportError> {
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET markdown = $2, html = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(report.id.0)
        .bind(report.markdown.as_str())
        .bind(&report.html)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ReportError::NotFound(report.id.to_string()));
        }

        Ok(report)
    }

    async fn delete(&self, id: &ReportId) -> Result<(), ReportError> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ReportError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
