pub mod authenticator;
pub mod extractors;
pub mod password;
pub mod service;
pub mod token;

use serde::{Deserialize, Serialize};

// Re-export necessary items
pub use authenticator::TokenAuthenticator;
pub use extractors::AuthenticatedIdentity;
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use service::AuthService;
pub use token::{Claims, TokenIssuer};

/// Response structure after a successful login.
/// Contains the signed bearer token attesting the caller's identity.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The JWT (JSON Web Token) to present on subsequent requests.
    pub token: String,
}
