use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Skill, SkillItem};
use crate::db::RepoResult;

#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<SkillItem>>;
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Skill>>;
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Skill>>;
    /// Fails with `RepoError::Conflict` when the name is taken.
    async fn create(&self, name: &str) -> RepoResult<Skill>;
    /// Returns affected rows.
    async fn delete(&self, id: Uuid) -> RepoResult<u64>;
}

pub struct PgSkillRepository {
    db: PgPool,
}

impl PgSkillRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SkillRepository for PgSkillRepository {
    async fn list(&self) -> RepoResult<Vec<SkillItem>> {
        let rows = sqlx::query_as::<_, SkillItem>("SELECT id, name FROM skills ORDER BY created_at")
            .fetch_all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Skill>> {
        let skill = sqlx::query_as::<_, Skill>(
            "SELECT id, name, created_at FROM skills WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;
        Ok(skill)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Skill>> {
        let skill = sqlx::query_as::<_, Skill>(
            "SELECT id, name, created_at FROM skills WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(skill)
    }

    async fn create(&self, name: &str) -> RepoResult<Skill> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.db)
        .await?;
        Ok(skill)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
