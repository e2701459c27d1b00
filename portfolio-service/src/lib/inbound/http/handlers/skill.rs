use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::multipart::MultipartForm;
use super::ApiError;
use super::ApiSuccess;
use super::AssetData;
use super::MessageData;
use crate::domain::skill::models::NewSkillCommand;
use crate::domain::skill::models::Skill;
use crate::domain::skill::models::SkillId;
use crate::domain::skill::ports::SkillServicePort;
use crate::inbound::http::router::AppState;

pub async fn add_skill(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<ApiSuccess<SkillData>, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let proficiency = form
        .text("proficiency")
        .map(|p| parse_proficiency(&p))
        .transpose()?;
    let command = NewSkillCommand {
        title: form.text("title"),
        proficiency,
        svg: form.file("svg"),
    };

    state
        .skill_service
        .add_skill(command)
        .await
        .map_err(ApiError::from)
        .map(|ref skill| ApiSuccess::new(StatusCode::OK, skill.into()))
}

pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateSkillRequestBody>,
) -> Result<ApiSuccess<SkillData>, ApiError> {
    let id = SkillId::from_string(&id)?;

    state
        .skill_service
        .update_proficiency(&id, body.proficiency)
        .await
        .map_err(ApiError::from)
        .map(|ref skill| ApiSuccess::new(StatusCode::OK, skill.into()))
}

pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let id = SkillId::from_string(&id)?;

    state
        .skill_service
        .delete_skill(&id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, MessageData::new("Skill deleted successfully!")))
}

pub async fn list_skills(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<SkillData>>, ApiError> {
    state
        .skill_service
        .list_skills()
        .await
        .map_err(ApiError::from)
        .map(|skills| ApiSuccess::new(StatusCode::OK, skills.iter().map(Into::into).collect()))
}

fn parse_proficiency(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest("Proficiency must be between 1 and 100!".to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateSkillRequestBody {
    proficiency: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillData {
    pub id: String,
    pub title: String,
    pub proficiency: u8,
    pub svg: AssetData,
    pub created_at: DateTime<Utc>,
}

impl From<&Skill> for SkillData {
    fn from(skill: &Skill) -> Self {
        Self {
            id: skill.id.to_string(),
            title: skill.title.clone(),
            proficiency: skill.proficiency.value(),
            svg: (&skill.svg).into(),
            created_at: skill.created_at,
        }
    }
}
