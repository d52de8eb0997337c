use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CreditPackage {
    pub id: Uuid,
    pub name: String,
    pub credit_amount: i64,
    pub price: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// List projection.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CreditPackageItem {
    pub id: Uuid,
    pub name: String,
    pub credit_amount: i64,
    pub price: i64,
}

#[derive(Debug, Clone)]
pub struct NewCreditPackage {
    pub name: String,
    pub credit_amount: i64,
    pub price: i64,
}
