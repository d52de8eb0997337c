use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::repo_types::{Skill, SkillItem};
use crate::{
    db::RepoError,
    error::{ApiError, ApiResult},
    payload::Payload,
    response::{ok, ok_empty, Reply},
    state::AppState,
    validation::{parse_id, valid_string, DUPLICATE, FIELDS_INVALID, INVALID_ID},
};

pub fn skill_routes() -> Router<AppState> {
    Router::new()
        .route("/skills", get(list_skills).post(create_skill))
        .route("/skills/", delete(delete_skill))
        .route("/skills/:skill_id", delete(delete_skill))
}

/// Paths served by the legacy surface, nested under `/api`.
pub fn legacy_skill_routes() -> Router<AppState> {
    Router::new()
        .route("/coaches/skill", get(list_skills).post(create_skill))
        .route("/coaches/skill/", delete(delete_skill_echo))
        .route("/coaches/skill/:skill_id", delete(delete_skill_echo))
}

#[instrument(skip(state))]
pub async fn list_skills(State(state): State<AppState>) -> ApiResult<Reply<Vec<SkillItem>>> {
    let skills = state.skills.list().await?;
    Ok(ok(skills))
}

#[instrument(skip(state, payload))]
pub async fn create_skill(State(state): State<AppState>, payload: Payload) -> ApiResult<Reply<Skill>> {
    let Ok(name) = valid_string(payload.field("name")) else {
        warn!("skill fields invalid");
        return Err(ApiError::validation(FIELDS_INVALID));
    };

    if state.skills.find_by_name(name).await?.is_some() {
        warn!(name = %name, "skill already exists");
        return Err(ApiError::conflict(DUPLICATE));
    }

    let skill = state.skills.create(name).await.map_err(|e| match e {
        RepoError::Conflict => ApiError::conflict(DUPLICATE),
        other => other.into(),
    })?;

    info!(skill_id = %skill.id, "skill created");
    Ok(ok(skill))
}

#[instrument(skip(state))]
pub async fn delete_skill(
    State(state): State<AppState>,
    skill_id: Option<Path<String>>,
) -> ApiResult<Reply<()>> {
    remove(&state, skill_id).await?;
    Ok(ok_empty())
}

/// Legacy variant: echoes the deleted id as `data`.
#[instrument(skip(state))]
pub async fn delete_skill_echo(
    State(state): State<AppState>,
    skill_id: Option<Path<String>>,
) -> ApiResult<Reply<Uuid>> {
    let id = remove(&state, skill_id).await?;
    Ok(ok(id))
}

// An absent id, a malformed id and an id that matches nothing get the same answer.
async fn remove(state: &AppState, raw_id: Option<Path<String>>) -> ApiResult<Uuid> {
    let raw_id = raw_id.map(|Path(id)| id).unwrap_or_default();
    let Some(id) = parse_id(&raw_id) else {
        warn!(skill_id = %raw_id, "malformed skill id");
        return Err(ApiError::validation(INVALID_ID));
    };

    if state.skills.delete(id).await? == 0 {
        warn!(skill_id = %id, "skill not found");
        return Err(ApiError::not_found(INVALID_ID));
    }

    info!(skill_id = %id, "skill deleted");
    Ok(id)
}
