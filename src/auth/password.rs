use crate::error::AppError;
use bcrypt::{hash_with_salt, DEFAULT_COST};
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Hashing capability used by the identity store.
///
/// Passed around as `Arc<dyn PasswordHasher>` so tests can substitute a
/// deterministic implementation without touching global state.
pub trait PasswordHasher: Send + Sync {
    /// Produces a fresh salt for a new identity. Salts are unique per call
    /// with overwhelming probability.
    fn generate_salt(&self) -> String;

    /// Hashes a password with the given salt. Deterministic for equal
    /// inputs; different salts give different digests.
    fn hash(&self, password: &str, salt: &str) -> Result<String, AppError>;

    /// Recomputes the digest for `password` and `salt` and compares it
    /// against `expected_hash`.
    fn verify(&self, password: &str, salt: &str, expected_hash: &str) -> Result<bool, AppError>;
}

/// The production hasher: bcrypt with a per-identity 16-byte salt.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Creates a hasher with an explicit cost factor. Tests use a low cost
    /// to stay fast; production uses `Default`.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn generate_salt(&self) -> String {
        // 16 alphanumeric characters from the OS RNG. The bytes double as
        // the bcrypt salt, so the length must stay at exactly 16.
        OsRng
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect()
    }

    fn hash(&self, password: &str, salt: &str) -> Result<String, AppError> {
        let salt_bytes: [u8; 16] = salt
            .as_bytes()
            .try_into()
            .map_err(|_| AppError::Internal("Salt must be exactly 16 bytes".into()))?;

        hash_with_salt(password, self.cost, salt_bytes)
            .map(|parts| parts.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, salt: &str, expected_hash: &str) -> Result<bool, AppError> {
        let computed = self.hash(password, salt)?;
        Ok(computed == expected_hash)
    }
}
