use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// List projection.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SkillItem {
    pub id: Uuid,
    pub name: String,
}
