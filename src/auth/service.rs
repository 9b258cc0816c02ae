use crate::auth::token::TokenIssuer;
use crate::error::AppError;
use crate::store::IdentityStore;

/// Orchestrates registration and login on top of the identity store and the
/// token issuer. Carries no state of its own; cheap to clone into workers.
#[derive(Clone)]
pub struct AuthService {
    identities: IdentityStore,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(identities: IdentityStore, issuer: TokenIssuer) -> Self {
        Self { identities, issuer }
    }

    /// Registers a new identity. Conflict and storage errors propagate
    /// unchanged.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<(), AppError> {
        self.identities.register(username, password).await?;
        log::debug!("registered identity {}", username);
        Ok(())
    }

    /// Authenticates the credentials and mints a token for the identity's
    /// username.
    ///
    /// An unknown username and a wrong password produce the same
    /// `InvalidCredentials`; nothing in the response distinguishes them.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<String, AppError> {
        let identity = self
            .identities
            .authenticate(username, password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let token = self.issuer.issue(&identity.username)?;
        log::debug!("issued token for {}", identity.username);
        Ok(token)
    }
}
