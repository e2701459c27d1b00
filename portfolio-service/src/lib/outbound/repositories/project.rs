use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::asset::models::Asset;
use crate::domain::errors::ContentError;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::ports::ProjectRepository;

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_project(r: PgRow) -> Project {
        Project {
            id: ProjectId(r.get("id")),
            title: r.get("title"),
            description: r.get("description"),
            git_repo_link: r.get("git_repo_link"),
            project_link: r.get("project_link"),
            technologies: r.get("technologies"),
            stack: r.get("stack"),
            deploy: r.get("deploy"),
            banner: Asset {
                public_id: r.get("banner_public_id"),
                url: r.get("banner_url"),
            },
            created_at: r.get("created_at"),
        }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, ContentError> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                id, title, description, git_repo_link, project_link,
                technologies, stack, deploy, banner_public_id, banner_url, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(project.id.0)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.git_repo_link)
        .bind(&project.project_link)
        .bind(&project.technologies)
        .bind(&project.stack)
        .bind(&project.deploy)
        .bind(&project.banner.public_id)
        .bind(&project.banner.url)
        .bind(project.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(project)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ContentError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, git_repo_link, project_link,
                   technologies, stack, deploy, banner_public_id, banner_url, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(row.map(Self::row_to_project))
    }

    async fn list_all(&self) -> Result<Vec<Project>, ContentError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, git_repo_link, project_link,
                   technologies, stack, deploy, banner_public_id, banner_url, created_at
            FROM projects
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_project).collect())
    }

    async fn update(&self, project: Project) -> Result<Project, ContentError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET title = $2, description = $3, git_repo_link = $4, project_link = $5,
                technologies = $6, stack = $7, deploy = $8,
                banner_public_id = $9, banner_url = $10
            WHERE id = $1
            "#,
        )
        .bind(project.id.0)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.git_repo_link)
        .bind(&project.project_link)
        .bind(&project.technologies)
        .bind(&project.stack)
        .bind(&project.deploy)
        .bind(&project.banner.public_id)
        .bind(&project.banner.url)
        .execute(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound("Project"));
        }

        Ok(project)
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound("Project"));
        }

        Ok(())
    }
}
