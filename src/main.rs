use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use taskvault::auth::{AuthService, BcryptPasswordHasher, TokenAuthenticator, TokenIssuer};
use taskvault::config::Config;
use taskvault::routes;
use taskvault::routes::health;
use taskvault::store::{IdentityStore, TaskStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // Shared components are built once and cloned into the worker factories;
    // all of them are immutable after this point.
    let issuer = TokenIssuer::new(&config.jwt_secret, config.token_ttl_secs);
    let identities = IdentityStore::new(pool.clone(), Arc::new(BcryptPasswordHasher::default()));
    let auth_service = AuthService::new(identities.clone(), issuer.clone());
    let authenticator = TokenAuthenticator::new(issuer, identities);
    let task_store = TaskStore::new(pool);

    log::info!("Starting TaskVault server at {}", config.server_url());

    let cors_origin = config.cors_origin.clone();
    let server_addr = (config.server_host.clone(), config.server_port);

    HttpServer::new(move || {
        // An explicitly configured origin locks CORS down; without one the
        // server keeps the permissive development posture.
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
            None => Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        };

        App::new()
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(authenticator.clone()))
            .app_data(web::Data::new(task_store.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind(server_addr)?
    .run()
    .await
}
