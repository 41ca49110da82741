use actix_web::{HttpRequest, get, post, web};

use crate::middlewares::get_claims;
use crate::modules::profile::{model, service::ProfileService};
use crate::{
    api::{error, success},
    utils::ValidatedJson,
};

#[post("/register")]
pub async fn register(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
    profile_data: ValidatedJson<model::RegisterProfileModel>,
) -> Result<success::Success<model::ProfileResponse>, error::Error> {
    let subject = get_claims(&req)?.sub;
    let (created, profile) = profile_service.register(&subject, profile_data.0).await?;

    if created {
        Ok(success::Success::created(profile))
    } else {
        Ok(success::Success::ok(profile))
    }
}

#[get("/profile")]
pub async fn get_profile(
    profile_service: web::Data<ProfileService>,
    req: HttpRequest,
) -> Result<success::Success<model::ProfileResponse>, error::Error> {
    let subject = get_claims(&req)?.sub;
    let profile = profile_service.get_current(&subject).await?;
    Ok(success::Success::ok(profile))
}
