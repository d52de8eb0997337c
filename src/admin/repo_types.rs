use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Coach {
    pub id: Uuid,
    pub user_id: Uuid,
    pub experience_years: i64,
    pub description: String,
    pub profile_image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewCoach {
    pub user_id: Uuid,
    pub experience_years: i64,
    pub description: String,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_at: OffsetDateTime,
    pub max_participants: i64,
    pub meeting_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Everything about a course the owning coach may set or change.
#[derive(Debug, Clone)]
pub struct CourseFields {
    pub skill_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_at: OffsetDateTime,
    pub end_at: OffsetDateTime,
    pub max_participants: i64,
    pub meeting_url: Option<String>,
}
