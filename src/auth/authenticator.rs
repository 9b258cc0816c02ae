use crate::auth::token::TokenIssuer;
use crate::error::AppError;
use crate::models::Identity;
use crate::store::IdentityStore;

/// Resolves bearer tokens to live identities.
#[derive(Clone)]
pub struct TokenAuthenticator {
    issuer: TokenIssuer,
    identities: IdentityStore,
}

impl TokenAuthenticator {
    pub fn new(issuer: TokenIssuer, identities: IdentityStore) -> Self {
        Self { issuer, identities }
    }

    /// Verifies the token and re-resolves its subject against the store.
    ///
    /// A valid signature alone is not enough: a token whose subject no
    /// longer exists is rejected with the same error as a bad token.
    pub async fn resolve(&self, token: &str) -> Result<Identity, AppError> {
        let claims = self.issuer.verify(token)?;

        self.identities
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid token".into()))
    }
}
