use async_trait::async_trait;

use crate::domain::errors::ContentError;
use crate::domain::skill::models::NewSkillCommand;
use crate::domain::skill::models::Proficiency;
use crate::domain::skill::models::Skill;
use crate::domain::skill::models::SkillId;

/// Port for skill operations.
#[async_trait]
pub trait SkillServicePort: Send + Sync + 'static {
    /// Add a skill and upload its icon.
    ///
    /// # Errors
    /// * `Validation` - Icon, title or level missing, or level out of range
    /// * `Asset` - Icon upload failed
    /// * `DatabaseError` - Database operation failed
    async fn add_skill(&self, command: NewSkillCommand) -> Result<Skill, ContentError>;

    /// Delete a skill and its icon.
    ///
    /// # Errors
    /// * `NotFound` - Skill does not exist
    /// * `Asset` - Icon removal failed; the skill is kept
    async fn delete_skill(&self, id: &SkillId) -> Result<(), ContentError>;

    /// Change the proficiency of a skill.
    ///
    /// # Errors
    /// * `Validation` - Level missing or out of range
    /// * `NotFound` - Skill does not exist
    async fn update_proficiency(
        &self,
        id: &SkillId,
        proficiency: Option<i64>,
    ) -> Result<Skill, ContentError>;

    async fn list_skills(&self) -> Result<Vec<Skill>, ContentError>;
}

/// Persistence operations for skills.
#[async_trait]
pub trait SkillRepository: Send + Sync + 'static {
    async fn create(&self, skill: Skill) -> Result<Skill, ContentError>;

    async fn find_by_id(&self, id: &SkillId) -> Result<Option<Skill>, ContentError>;

    async fn list_all(&self) -> Result<Vec<Skill>, ContentError>;

    /// # Errors
    /// * `NotFound` - Skill does not exist
    async fn update_proficiency(
        &self,
        id: &SkillId,
        proficiency: Proficiency,
    ) -> Result<Skill, ContentError>;

    /// # Errors
    /// * `NotFound` - Skill does not exist
    async fn delete(&self, id: &SkillId) -> Result<(), ContentError>;
}
