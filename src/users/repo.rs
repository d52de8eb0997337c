use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewUser, User};
use crate::db::RepoResult;

const USER_COLUMNS: &str = "id, name, email, role, password, created_at, updated_at";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;
    /// Fails with `RepoError::Conflict` when the email is taken.
    async fn create(&self, user: NewUser) -> RepoResult<User>;
    /// Renames only while the stored name still equals `previous`; returns affected rows.
    async fn update_name(&self, id: Uuid, previous: &str, name: &str) -> RepoResult<u64>;
}

pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, role, password)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update_name(&self, id: Uuid, previous: &str, name: &str) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users SET name = $3, updated_at = now()
            WHERE id = $1 AND name = $2
            "#,
        )
        .bind(id)
        .bind(previous)
        .bind(name)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }
}
