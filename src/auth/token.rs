use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the username of the authenticated identity.
    pub sub: String,
    /// Issuance timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Mints and verifies signed bearer tokens.
///
/// The signing secret and token lifetime are fixed at construction, so the
/// issuer is immutable afterwards and safe to share across workers. Both keys
/// are precomputed; `Clone` is cheap.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    /// Creates an issuer from the signing secret and token lifetime.
    ///
    /// # Panics
    /// Panics if `secret` is empty. A server without a signing secret must
    /// not come up, so this is checked once at startup rather than on every
    /// request.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        assert!(!secret.is_empty(), "JWT secret must not be empty");
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Generates a signed token for a given username.
    ///
    /// # Arguments
    /// * `username` - The username the token attests to.
    ///
    /// # Returns
    /// A `Result` containing the JWT string if successful.
    /// Returns `AppError::Internal` if token encoding fails.
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::seconds(self.ttl_secs))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a JWT string and decodes its claims.
    ///
    /// Default validation checks are applied (signature, expiration). A
    /// malformed, forged, or expired token all produce the same
    /// `AppError::Unauthorized` with a uniform message; the underlying cause
    /// is only logged at debug level.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("token rejected: {}", e);
                AppError::Unauthorized("Invalid token".into())
            })
    }
}
