use uuid::Uuid;

use crate::{
    api::error,
    modules::credits::{
        INITIAL_CREDITS,
        repository::CreditsRepository,
        schema::{CreditAccountEntity, CreditPlan},
    },
};

#[derive(Clone)]
pub struct CreditsPgRepository {
    pool: sqlx::PgPool,
}

impl CreditsPgRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CreditsRepository for CreditsPgRepository {
    async fn create_initial(
        &self,
        owner_id: &str,
    ) -> Result<Option<CreditAccountEntity>, error::SystemError> {
        let entity = sqlx::query_as::<_, CreditAccountEntity>(
            r#"
            INSERT INTO credit_accounts (id, owner_id, credits, plan)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (owner_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(owner_id)
        .bind(INITIAL_CREDITS)
        .bind(CreditPlan::Basic)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity)
    }

    async fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<CreditAccountEntity>, error::SystemError> {
        let account = sqlx::query_as::<_, CreditAccountEntity>(
            "SELECT * FROM credit_accounts WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn consume_one(&self, owner_id: &str) -> Result<Option<i64>, error::SystemError> {
        // the WHERE guard makes the decrement and the balance check one
        // atomic statement; concurrent uploads cannot push the balance
        // below zero
        let remaining = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE credit_accounts
            SET credits = credits - 1, updated_at = NOW()
            WHERE owner_id = $1 AND credits > 0
            RETURNING credits
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(remaining)
    }
}
