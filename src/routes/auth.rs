use crate::{auth::AuthService, auth::TokenResponse, error::AppError, models::CredentialsRequest};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new identity
///
/// Creates an account from a username and password. The response carries no
/// body; a freshly registered user logs in to obtain a token. Registering an
/// already-taken username is a 409 conflict.
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    credentials: web::Json<CredentialsRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    credentials.validate()?;

    service
        .sign_up(&credentials.username, &credentials.password)
        .await?;

    Ok(HttpResponse::Created().finish())
}

/// Login
///
/// Authenticates a username/password pair and returns a bearer token. Wrong
/// password and unknown username both answer 401 with the same body.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    credentials: web::Json<CredentialsRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    credentials.validate()?;

    let token = service
        .sign_in(&credentials.username, &credentials.password)
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{BcryptPasswordHasher, TokenIssuer};
    use crate::store::IdentityStore;
    use actix_web::http::StatusCode;
    use actix_web::test;
    const MIN_COST: u32 = 4;
    use serde_json::json;
    use std::sync::Arc;

    // Validation failures never reach the store, so a lazily connecting pool
    // lets these tests run without a database.
    fn service() -> web::Data<AuthService> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/never_connected")
            .unwrap();
        let identities = IdentityStore::new(pool, Arc::new(BcryptPasswordHasher::new(MIN_COST)));
        web::Data::new(AuthService::new(
            identities,
            TokenIssuer::new("route-test-secret", 3600),
        ))
    }

    #[actix_rt::test]
    async fn test_register_validation() {
        let app =
            test::init_service(actix_web::App::new().app_data(service()).service(register)).await;

        // Username too short
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "username": "abc",
                "password": "Sup3rSecret"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // Weak password
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "username": "testuser",
                "password": "alllowercase1"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_rt::test]
    async fn test_login_validation() {
        let app =
            test::init_service(actix_web::App::new().app_data(service()).service(login)).await;

        // Username with disallowed characters
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({
                "username": "bad user!",
                "password": "Sup3rSecret"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // Password too short
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({
                "username": "testuser",
                "password": "Sh0rt"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
