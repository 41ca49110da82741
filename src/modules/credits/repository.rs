use crate::{api::error, modules::credits::schema::CreditAccountEntity};

#[async_trait::async_trait]
pub trait CreditsRepository {
    /// Insert the starter account for a subject. Returns None when the
    /// account already exists and the insert was a no-op.
    async fn create_initial(
        &self,
        owner_id: &str,
    ) -> Result<Option<CreditAccountEntity>, error::SystemError>;

    async fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Option<CreditAccountEntity>, error::SystemError>;

    /// Decrement one credit, but only while the balance is positive. Returns
    /// the remaining balance, or None when nothing was decremented.
    async fn consume_one(&self, owner_id: &str) -> Result<Option<i64>, error::SystemError>;
}
