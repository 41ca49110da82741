use serde::{Deserialize, Serialize};

use crate::modules::credits::schema::{CreditAccountEntity, CreditPlan};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreditsResponse {
    pub credits: i64,
    pub plan: CreditPlan,
}

impl From<CreditAccountEntity> for CreditsResponse {
    fn from(entity: CreditAccountEntity) -> Self {
        CreditsResponse { credits: entity.credits, plan: entity.plan }
    }
}
