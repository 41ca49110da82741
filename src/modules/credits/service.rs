use log::{error, info};
use std::sync::Arc;

use crate::api::error::SystemError;
use crate::modules::credits::{repository::CreditsRepository, schema::CreditAccountEntity};

#[derive(Clone)]
pub struct CreditsService<C>
where
    C: CreditsRepository + Send + Sync,
{
    credits_repo: Arc<C>,
}

impl<C> CreditsService<C>
where
    C: CreditsRepository + Send + Sync,
{
    pub fn with_dependencies(credits_repo: Arc<C>) -> Self {
        Self { credits_repo }
    }

    /// Fetch the caller's credit account, creating the starter account on
    /// first access.
    pub async fn get_user_credits(
        &self,
        owner_id: &str,
    ) -> Result<CreditAccountEntity, SystemError> {
        if let Some(account) = self.credits_repo.find_by_owner(owner_id).await? {
            return Ok(account);
        }

        if let Some(created) = self.credits_repo.create_initial(owner_id).await? {
            info!("starter credit account created for {}", owner_id);
            return Ok(created);
        }

        // lost the creation race; the row exists by now
        self.credits_repo
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| SystemError::not_found("Credit account not found"))
    }

    pub async fn has_enough_credits(
        &self,
        owner_id: &str,
        count: usize,
    ) -> Result<bool, SystemError> {
        let account = self.get_user_credits(owner_id).await?;
        Ok(account.credits >= count as i64)
    }

    /// Spend one credit. Hitting the zero floor here means a concurrent
    /// spender raced past the caller's balance check.
    pub async fn consume_credit(&self, owner_id: &str) -> Result<i64, SystemError> {
        match self.credits_repo.consume_one(owner_id).await? {
            Some(remaining) => Ok(remaining),
            None => {
                error!("credit consumption hit the zero floor for {}", owner_id);
                Err(SystemError::InsufficientCredits { needed: 1, available: 0 })
            }
        }
    }
}
