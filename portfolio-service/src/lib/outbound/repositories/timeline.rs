use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::errors::ContentError;
use crate::domain::timeline::models::TimelineEntry;
use crate::domain::timeline::models::TimelineId;
use crate::domain::timeline::ports::TimelineRepository;

pub struct PostgresTimelineRepository {
    pool: PgPool,
}

impl PostgresTimelineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_entry(r: PgRow) -> TimelineEntry {
        TimelineEntry {
            id: TimelineId(r.get("id")),
            title: r.get("title"),
            description: r.get("description"),
            from: r.get("timeline_from"),
            to: r.get("timeline_to"),
            created_at: r.get("created_at"),
        }
    }
}

#[async_trait]
impl TimelineRepository for PostgresTimelineRepository {
    async fn create(&self, entry: TimelineEntry) -> Result<TimelineEntry, ContentError> {
        sqlx::query(
            r#"
            INSERT INTO timelines (id, title, description, timeline_from, timeline_to, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id.0)
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(&entry.from)
        .bind(&entry.to)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(entry)
    }

    async fn list_all(&self) -> Result<Vec<TimelineEntry>, ContentError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, timeline_from, timeline_to, created_at
            FROM timelines
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_entry).collect())
    }

    async fn delete(&self, id: &TimelineId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM timelines WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound("Timeline"));
        }

        Ok(())
    }
}
