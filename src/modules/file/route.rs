use actix_web::web;

use crate::modules::credits::repository::CreditsRepository;
use crate::modules::file::repository::FileRepository;

/// Routes served without authentication: share links and downloads.
pub fn public_api_configure<F, C>(cfg: &mut web::ServiceConfig)
where
    F: FileRepository + Send + Sync + 'static,
    C: CreditsRepository + Send + Sync + 'static,
{
    cfg.service(
        web::resource("/public/{file_id:[0-9a-fA-F-]{36}}")
            .route(web::get().to(crate::modules::file::handle::get_public_file::<F, C>)),
    )
    .service(
        web::resource("/download/{file_id:[0-9a-fA-F-]{36}}")
            .route(web::get().to(crate::modules::file::handle::download_file::<F, C>)),
    );
}

pub fn configure<F, C>(cfg: &mut web::ServiceConfig)
where
    F: FileRepository + Send + Sync + 'static,
    C: CreditsRepository + Send + Sync + 'static,
{
    cfg.service(
        web::resource("/upload")
            .route(web::post().to(crate::modules::file::handle::upload_files::<F, C>)),
    )
    .service(
        web::resource("/my")
            .route(web::get().to(crate::modules::file::handle::get_my_files::<F, C>)),
    )
    .service(
        web::resource("/{file_id:[0-9a-fA-F-]{36}}")
            .route(web::delete().to(crate::modules::file::handle::delete_file::<F, C>)),
    )
    .service(
        web::resource("/{file_id:[0-9a-fA-F-]{36}}/toggle-public")
            .route(web::patch().to(crate::modules::file::handle::toggle_public::<F, C>)),
    );
}
