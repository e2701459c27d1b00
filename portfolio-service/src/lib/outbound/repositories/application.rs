use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::application::models::ApplicationId;
use crate::domain::application::models::SoftwareApplication;
use crate::domain::application::ports::ApplicationRepository;
use crate::domain::asset::models::Asset;
use crate::domain::errors::ContentError;

pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_application(r: PgRow) -> SoftwareApplication {
        SoftwareApplication {
            id: ApplicationId(r.get("id")),
            name: r.get("name"),
            svg: Asset {
                public_id: r.get("svg_public_id"),
                url: r.get("svg_url"),
            },
            created_at: r.get("created_at"),
        }
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn create(
        &self,
        application: SoftwareApplication,
    ) -> Result<SoftwareApplication, ContentError> {
        sqlx::query(
            r#"
            INSERT INTO software_applications (id, name, svg_public_id, svg_url, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(application.id.0)
        .bind(&application.name)
        .bind(&application.svg.public_id)
        .bind(&application.svg.url)
        .bind(application.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(application)
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<SoftwareApplication>, ContentError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, svg_public_id, svg_url, created_at
            FROM software_applications
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(row.map(Self::row_to_application))
    }

    async fn list_all(&self) -> Result<Vec<SoftwareApplication>, ContentError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, svg_public_id, svg_url, created_at
            FROM software_applications
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_application).collect())
    }

    async fn delete(&self, id: &ApplicationId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM software_applications WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound("Application"));
        }

        Ok(())
    }
}
