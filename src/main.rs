use actix_web::{
    self, App, HttpServer,
    middleware::{Logger, from_fn},
    web,
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::connect_database,
    middlewares::authentication,
    modules::{
        credits::{repository_pg::CreditsPgRepository, service::CreditsService},
        file::{repository_pg::FilePgRepository, service::FileService, storage::FileStorage},
        profile::{repository_pg::ProfilePgRepository, service::ProfileService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|_| std::io::Error::other("Database migration error"))?;

    let storage = FileStorage::new(ENV.upload_dir.as_str())
        .map_err(|_| std::io::Error::other("Upload directory error"))?;

    let _file_repo = FilePgRepository::new(db_pool.clone());
    let _profile_repo = ProfilePgRepository::new(db_pool.clone());
    let _credits_repo = CreditsPgRepository::new(db_pool.clone());

    let profile_service = ProfileService::with_dependencies(Arc::new(_profile_repo));
    let credits_service = CreditsService::with_dependencies(Arc::new(_credits_repo));
    let file_service = FileService::with_dependencies(
        Arc::new(_file_repo),
        storage,
        profile_service.clone(),
        credits_service.clone(),
    );

    println!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allowed_origin(ENV.frontend_url.as_str())
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(profile_service.clone()))
            .app_data(web::Data::new(credits_service.clone()))
            .app_data(web::Data::new(file_service.clone()))
            .service(health_check)
            .service(
                web::scope("/files")
                    .configure(
                        modules::file::route::public_api_configure::<
                            FilePgRepository,
                            CreditsPgRepository,
                        >,
                    )
                    .service(
                        web::scope("")
                            .wrap(from_fn(authentication))
                            .configure(
                                modules::file::route::configure::<
                                    FilePgRepository,
                                    CreditsPgRepository,
                                >,
                            ),
                    ),
            )
            .service(
                web::scope("/users")
                    .wrap(from_fn(authentication))
                    .configure(modules::profile::route::configure)
                    .configure(modules::credits::route::configure::<CreditsPgRepository>),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
