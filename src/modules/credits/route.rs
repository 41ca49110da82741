use actix_web::web;

use crate::modules::credits::repository::CreditsRepository;

pub fn configure<C>(cfg: &mut web::ServiceConfig)
where
    C: CreditsRepository + Send + Sync + 'static,
{
    cfg.service(
        web::resource("/credits")
            .route(web::get().to(crate::modules::credits::handle::get_credits::<C>)),
    );
}
