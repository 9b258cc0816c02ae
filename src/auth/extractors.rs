use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::auth::TokenAuthenticator;
use crate::error::AppError;
use crate::models::Identity;

/// Extracts the authenticated identity from the request's bearer token.
///
/// Handlers receive the resolved `Identity` as an explicit argument; it never
/// travels through request extensions. The extractor reads the
/// `Authorization: Bearer` header and resolves it once through the
/// `TokenAuthenticator` registered in app data.
///
/// A missing or malformed header, a rejected token, and a subject that no
/// longer exists all produce an `AppError::Unauthorized` response.
pub struct AuthenticatedIdentity(pub Identity);

impl FromRequest for AuthenticatedIdentity {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Everything needed later is cloned out of the request here, so the
        // returned future does not borrow it.
        let token = bearer_token(req).map(str::to_owned);
        let authenticator = req.app_data::<web::Data<TokenAuthenticator>>().cloned();

        Box::pin(async move {
            let token = token.ok_or_else(|| {
                AppError::Unauthorized("Missing or malformed Authorization header".into())
            })?;

            let authenticator = authenticator.ok_or_else(|| {
                AppError::Internal("TokenAuthenticator is not registered".into())
            })?;

            let identity = authenticator.resolve(&token).await?;
            Ok(AuthenticatedIdentity(identity))
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
