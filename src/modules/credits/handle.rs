use actix_web::{HttpRequest, web};

use crate::api::success::Success;
use crate::api::{error, success};
use crate::middlewares::get_claims;
use crate::modules::credits::model::CreditsResponse;
use crate::modules::credits::service::CreditsService;

/// Current balance handler; creates the starter account on first access.
pub async fn get_credits<C>(
    req: HttpRequest,
    credits_service: web::Data<CreditsService<C>>,
) -> Result<success::Success<CreditsResponse>, error::Error>
where
    C: crate::modules::credits::repository::CreditsRepository + Send + Sync + 'static,
{
    let subject = get_claims(&req)?.sub;
    let account = credits_service.get_user_credits(&subject).await?;
    Ok(Success::ok(CreditsResponse::from(account)))
}
