use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::asset::models::AssetFolder;
use crate::domain::asset::ports::AssetStore;
use crate::domain::errors::required;
use crate::domain::errors::ContentError;
use crate::domain::skill::models::NewSkillCommand;
use crate::domain::skill::models::Proficiency;
use crate::domain::skill::models::Skill;
use crate::domain::skill::models::SkillId;
use crate::domain::skill::ports::SkillRepository;
use crate::domain::skill::ports::SkillServicePort;

pub struct SkillService<SR, AS>
where
    SR: SkillRepository,
    AS: AssetStore,
{
    repository: Arc<SR>,
    assets: Arc<AS>,
}

impl<SR, AS> SkillService<SR, AS>
where
    SR: SkillRepository,
    AS: AssetStore,
{
    pub fn new(repository: Arc<SR>, assets: Arc<AS>) -> Self {
        Self { repository, assets }
    }
}

#[async_trait]
impl<SR, AS> SkillServicePort for SkillService<SR, AS>
where
    SR: SkillRepository,
    AS: AssetStore,
{
    async fn add_skill(&self, command: NewSkillCommand) -> Result<Skill, ContentError> {
        let svg = command
            .svg
            .ok_or_else(|| ContentError::Validation("Skill Icon SVG is required!".to_string()))?;

        let (title, proficiency) = match (required(command.title), command.proficiency) {
            (Some(title), Some(proficiency)) => (title, proficiency),
            _ => {
                return Err(ContentError::Validation(
                    "Skill Name and Level are required!".to_string(),
                ))
            }
        };
        let proficiency = Proficiency::new(proficiency)?;

        let svg = self.assets.upload(svg, AssetFolder::SkillSvgs).await?;

        let skill = Skill {
            id: SkillId::new(),
            title,
            proficiency,
            svg,
            created_at: Utc::now(),
        };

        let created = self.repository.create(skill).await?;
        tracing::info!(skill_id = %created.id, "Skill added");

        Ok(created)
    }

    async fn delete_skill(&self, id: &SkillId) -> Result<(), ContentError> {
        let skill = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ContentError::NotFound("Skill"))?;

        self.assets.destroy(&skill.svg.public_id).await?;
        self.repository.delete(id).await?;

        tracing::info!(skill_id = %id, "Skill deleted");
        Ok(())
    }

    async fn update_proficiency(
        &self,
        id: &SkillId,
        proficiency: Option<i64>,
    ) -> Result<Skill, ContentError> {
        let proficiency = proficiency
            .ok_or_else(|| {
                ContentError::Validation("Proficiency must be between 1 and 100!".to_string())
            })
            .and_then(Proficiency::new)?;

        self.repository.update_proficiency(id, proficiency).await
    }

    async fn list_skills(&self) -> Result<Vec<Skill>, ContentError> {
        self.repository.list_all().await
    }
}
