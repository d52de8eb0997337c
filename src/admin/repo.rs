use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Coach, Course, CourseFields, NewCoach};
use crate::{db::RepoResult, users::repo_types::Role};

const COACH_COLUMNS: &str =
    "id, user_id, experience_years, description, profile_image_url, created_at, updated_at";
const COURSE_COLUMNS: &str = "id, user_id, skill_id, name, description, start_at, end_at, \
     max_participants, meeting_url, created_at, updated_at";

#[async_trait]
pub trait CoachRepository: Send + Sync {
    /// Sets the user's role to `COACH` and inserts the coach row atomically.
    /// `None` when the user is missing or already a coach.
    async fn promote(&self, coach: NewCoach) -> RepoResult<Option<Coach>>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, user_id: Uuid, fields: CourseFields) -> RepoResult<Course>;
    async fn find(&self, id: Uuid, user_id: Uuid) -> RepoResult<Option<Course>>;
    /// Returns affected rows.
    async fn update(&self, id: Uuid, user_id: Uuid, fields: CourseFields) -> RepoResult<u64>;
}

pub struct PgCoachRepository {
    db: PgPool,
}

impl PgCoachRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CoachRepository for PgCoachRepository {
    async fn promote(&self, coach: NewCoach) -> RepoResult<Option<Coach>> {
        let mut tx = self.db.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE users SET role = $2, updated_at = now()
            WHERE id = $1 AND role <> $2
            "#,
        )
        .bind(coach.user_id)
        .bind(Role::Coach.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query_as::<_, Coach>(&format!(
            r#"
            INSERT INTO coaches (user_id, experience_years, description, profile_image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {COACH_COLUMNS}
            "#
        ))
        .bind(coach.user_id)
        .bind(coach.experience_years)
        .bind(&coach.description)
        .bind(&coach.profile_image_url)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row))
    }
}

pub struct PgCourseRepository {
    db: PgPool,
}

impl PgCourseRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn create(&self, user_id: Uuid, fields: CourseFields) -> RepoResult<Course> {
        let course = sqlx::query_as::<_, Course>(&format!(
            r#"
            INSERT INTO courses
                (user_id, skill_id, name, description, start_at, end_at, max_participants, meeting_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(fields.skill_id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.start_at)
        .bind(fields.end_at)
        .bind(fields.max_participants)
        .bind(&fields.meeting_url)
        .fetch_one(&self.db)
        .await?;
        Ok(course)
    }

    async fn find(&self, id: Uuid, user_id: Uuid) -> RepoResult<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(course)
    }

    async fn update(&self, id: Uuid, user_id: Uuid, fields: CourseFields) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET skill_id = $3, name = $4, description = $5, start_at = $6, end_at = $7,
                max_participants = $8, meeting_url = $9, updated_at = now()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(fields.skill_id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.start_at)
        .bind(fields.end_at)
        .bind(fields.max_participants)
        .bind(&fields.meeting_url)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }
}
