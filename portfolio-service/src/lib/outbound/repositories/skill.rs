use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::asset::models::Asset;
use crate::domain::errors::ContentError;
use crate::domain::skill::models::Proficiency;
use crate::domain::skill::models::Skill;
use crate::domain::skill::models::SkillId;
use crate::domain::skill::ports::SkillRepository;

pub struct PostgresSkillRepository {
    pool: PgPool,
}

impl PostgresSkillRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_skill(r: PgRow) -> Result<Skill, ContentError> {
        let proficiency: i16 = r.get("proficiency");

        Ok(Skill {
            id: SkillId(r.get("id")),
            title: r.get("title"),
            proficiency: Proficiency::new(i64::from(proficiency))?,
            svg: Asset {
                public_id: r.get("svg_public_id"),
                url: r.get("svg_url"),
            },
            created_at: r.get("created_at"),
        })
    }
}

#[async_trait]
impl SkillRepository for PostgresSkillRepository {
    async fn create(&self, skill: Skill) -> Result<Skill, ContentError> {
        sqlx::query(
            r#"
            INSERT INTO skills (id, title, proficiency, svg_public_id, svg_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(skill.id.0)
        .bind(&skill.title)
        .bind(i16::from(skill.proficiency.value()))
        .bind(&skill.svg.public_id)
        .bind(&skill.svg.url)
        .bind(skill.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        Ok(skill)
    }

    async fn find_by_id(&self, id: &SkillId) -> Result<Option<Skill>, ContentError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, proficiency, svg_public_id, svg_url, created_at
            FROM skills
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_skill).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Skill>, ContentError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, proficiency, svg_public_id, svg_url, created_at
            FROM skills
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_skill).collect()
    }

    async fn update_proficiency(
        &self,
        id: &SkillId,
        proficiency: Proficiency,
    ) -> Result<Skill, ContentError> {
        let row = sqlx::query(
            r#"
            UPDATE skills
            SET proficiency = $2
            WHERE id = $1
            RETURNING id, title, proficiency, svg_public_id, svg_url, created_at
            "#,
        )
        .bind(id.0)
        .bind(i16::from(proficiency.value()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Self::row_to_skill(r),
            None => Err(ContentError::NotFound("Skill")),
        }
    }

    async fn delete(&self, id: &SkillId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound("Skill"));
        }

        Ok(())
    }
}
