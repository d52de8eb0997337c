use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{CreditPackage, CreditPackageItem, NewCreditPackage};
use crate::db::RepoResult;

#[async_trait]
pub trait CreditPackageRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<CreditPackageItem>>;
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<CreditPackage>>;
    /// Fails with `RepoError::Conflict` when the name is taken.
    async fn create(&self, package: NewCreditPackage) -> RepoResult<CreditPackage>;
    /// Returns affected rows.
    async fn delete(&self, id: Uuid) -> RepoResult<u64>;
}

pub struct PgCreditPackageRepository {
    db: PgPool,
}

impl PgCreditPackageRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CreditPackageRepository for PgCreditPackageRepository {
    async fn list(&self) -> RepoResult<Vec<CreditPackageItem>> {
        let rows = sqlx::query_as::<_, CreditPackageItem>(
            "SELECT id, name, credit_amount, price FROM credit_packages ORDER BY created_at",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<CreditPackage>> {
        let package = sqlx::query_as::<_, CreditPackage>(
            r#"
            SELECT id, name, credit_amount, price, created_at
            FROM credit_packages
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;
        Ok(package)
    }

    async fn create(&self, package: NewCreditPackage) -> RepoResult<CreditPackage> {
        let package = sqlx::query_as::<_, CreditPackage>(
            r#"
            INSERT INTO credit_packages (name, credit_amount, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, credit_amount, price, created_at
            "#,
        )
        .bind(&package.name)
        .bind(package.credit_amount)
        .bind(package.price)
        .fetch_one(&self.db)
        .await?;
        Ok(package)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM credit_packages WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }
}
