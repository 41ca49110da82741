use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Clone, Type, Serialize, Deserialize)]
#[sqlx(type_name = "credit_plan", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CreditPlan {
    #[sqlx(rename = "BASIC")]
    Basic,
    #[sqlx(rename = "PREMIUM")]
    Premium,
    #[sqlx(rename = "ULTIMATE")]
    Ultimate,
}

/// Upload allowance for one subject. The balance only moves through the
/// repository's conditional decrement, so it can never go below zero.
#[derive(Debug, Clone, FromRow)]
pub struct CreditAccountEntity {
    pub id: Uuid,
    pub owner_id: String,
    pub credits: i64,
    pub plan: CreditPlan,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
