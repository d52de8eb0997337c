use axum::{
    extract::{Path, State},
    routing::{post, put},
    Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CoachData, CourseData, PromotedUser},
    repo_types::{CourseFields, NewCoach},
};
use crate::{
    db::RepoError,
    error::{ApiError, ApiResult},
    payload::Payload,
    response::{created, ok, Reply},
    state::AppState,
    users::repo_types::Role,
    validation::{
        is_valid_url, optional_string, parse_id, parse_id_value, parse_timestamp,
        valid_non_negative_integer, valid_string, FIELDS_INVALID, INVALID_ID,
    },
};

pub const USER_NOT_FOUND: &str = "user not found";
pub const SKILL_NOT_FOUND: &str = "skill not found";
pub const COURSE_NOT_FOUND: &str = "course not found";
pub const ALREADY_COACH: &str = "user is already a coach";
pub const NOT_COACH: &str = "user is not a coach yet";
pub const USER_UPDATE_FAILED: &str = "failed to update user";
pub const COURSE_UPDATE_FAILED: &str = "failed to update course";

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/coaches/courses", post(create_course))
        .route("/admin/coaches/courses/:course_id", put(update_course))
        .route("/admin/coaches/:user_id", post(promote_coach))
}

#[instrument(skip(state, payload))]
pub async fn promote_coach(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Payload,
) -> ApiResult<Reply<CoachData>> {
    let Some(user_id) = parse_id(&user_id) else {
        warn!(user_id = %user_id, "malformed user id");
        return Err(ApiError::validation(INVALID_ID));
    };

    let (Ok(experience_years), Ok(description), Ok(profile_image_url)) = (
        valid_non_negative_integer(payload.field("experience_years")),
        valid_string(payload.field("description")),
        optional_string(payload.field("profile_image_url")),
    ) else {
        warn!("coach fields invalid");
        return Err(ApiError::validation(FIELDS_INVALID));
    };
    if profile_image_url.is_some_and(|url| !is_valid_url(url)) {
        warn!("coach profile image url invalid");
        return Err(ApiError::validation(FIELDS_INVALID));
    }

    let Some(user) = state.users.find_by_id(user_id).await? else {
        warn!(user_id = %user_id, "promotion target not found");
        return Err(ApiError::not_found(USER_NOT_FOUND));
    };
    if user.role == Role::Coach {
        warn!(user_id = %user_id, "user is already a coach");
        return Err(ApiError::conflict(ALREADY_COACH));
    }

    let coach = state
        .coaches
        .promote(NewCoach {
            user_id,
            experience_years,
            description: description.to_string(),
            profile_image_url: profile_image_url.map(str::to_string),
        })
        .await
        .map_err(|e| match e {
            RepoError::Conflict => ApiError::conflict(ALREADY_COACH),
            other => other.into(),
        })?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "role update matched no rows");
            ApiError::update_failed(USER_UPDATE_FAILED)
        })?;

    info!(user_id = %user_id, coach_id = %coach.id, "user promoted to coach");
    Ok(created(CoachData {
        user: PromotedUser {
            name: user.name,
            role: Role::Coach,
        },
        coach,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_course(
    State(state): State<AppState>,
    payload: Payload,
) -> ApiResult<Reply<CourseData>> {
    let Some((user_id, fields)) = course_input(&payload) else {
        warn!("course fields invalid");
        return Err(ApiError::validation(FIELDS_INVALID));
    };

    let Some(user) = state.users.find_by_id(user_id).await? else {
        warn!(user_id = %user_id, "course owner not found");
        return Err(ApiError::not_found(USER_NOT_FOUND));
    };
    if user.role != Role::Coach {
        warn!(user_id = %user_id, "course owner is not a coach");
        return Err(ApiError::conflict(NOT_COACH));
    }
    ensure_skill(&state, fields.skill_id).await?;

    let course = state.courses.create(user_id, fields).await?;

    info!(user_id = %user_id, course_id = %course.id, "course created");
    Ok(created(CourseData { course }))
}

#[instrument(skip(state, payload))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    payload: Payload,
) -> ApiResult<Reply<CourseData>> {
    let Some(course_id) = parse_id(&course_id) else {
        warn!(course_id = %course_id, "malformed course id");
        return Err(ApiError::validation(INVALID_ID));
    };
    let Some((user_id, fields)) = course_input(&payload) else {
        warn!("course fields invalid");
        return Err(ApiError::validation(FIELDS_INVALID));
    };

    if state.courses.find(course_id, user_id).await?.is_none() {
        warn!(course_id = %course_id, user_id = %user_id, "course not found");
        return Err(ApiError::not_found(COURSE_NOT_FOUND));
    }
    ensure_skill(&state, fields.skill_id).await?;

    if state.courses.update(course_id, user_id, fields).await? == 0 {
        warn!(course_id = %course_id, "course update matched no rows");
        return Err(ApiError::update_failed(COURSE_UPDATE_FAILED));
    }

    let course = state
        .courses
        .find(course_id, user_id)
        .await?
        .ok_or_else(|| ApiError::update_failed(COURSE_UPDATE_FAILED))?;

    info!(course_id = %course_id, "course updated");
    Ok(ok(CourseData { course }))
}

async fn ensure_skill(state: &AppState, skill_id: Uuid) -> ApiResult<()> {
    if state.skills.find_by_id(skill_id).await?.is_none() {
        warn!(skill_id = %skill_id, "course skill not found");
        return Err(ApiError::not_found(SKILL_NOT_FOUND));
    }
    Ok(())
}

fn course_input(payload: &Payload) -> Option<(Uuid, CourseFields)> {
    let user_id = parse_id_value(payload.field("user_id"))?;
    let skill_id = parse_id_value(payload.field("skill_id"))?;
    let name = valid_string(payload.field("name")).ok()?;
    let description = valid_string(payload.field("description")).ok()?;
    let start_at = parse_timestamp(payload.field("start_at"))?;
    let end_at = parse_timestamp(payload.field("end_at"))?;
    let max_participants = valid_non_negative_integer(payload.field("max_participants")).ok()?;
    let meeting_url = optional_string(payload.field("meeting_url")).ok()?;

    if end_at <= start_at || meeting_url.is_some_and(|url| !is_valid_url(url)) {
        return None;
    }

    Some((
        user_id,
        CourseFields {
            skill_id,
            name: name.to_string(),
            description: description.to_string(),
            start_at,
            end_at,
            max_participants,
            meeting_url: meeting_url.map(str::to_string),
        },
    ))
}
