use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::asset::models::Asset;
use crate::domain::asset::models::UploadedFile;
use crate::domain::errors::ContentError;

/// A skill with its icon and self-assessed level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: SkillId,
    pub title: String,
    pub proficiency: Proficiency,
    pub svg: Asset,
    pub created_at: DateTime<Utc>,
}

/// Skill unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkillId(pub Uuid);

impl SkillId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ContentError> {
        Uuid::parse_str(s)
            .map(SkillId)
            .map_err(|_| ContentError::InvalidId { kind: "skill" })
    }
}

impl Default for SkillId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Proficiency level type
///
/// Ensures the level lies within 1 to 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Proficiency(u8);

impl Proficiency {
    const MIN: i64 = 1;
    const MAX: i64 = 100;

    /// # Errors
    /// * `Validation` - Level outside 1..=100
    pub fn new(level: i64) -> Result<Self, ContentError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(ContentError::Validation(
                "Proficiency must be between 1 and 100!".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct NewSkillCommand {
    pub title: Option<String>,
    pub proficiency: Option<i64>,
    pub svg: Option<UploadedFile>,
}
