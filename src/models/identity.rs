use lazy_static::lazy_static;
use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

lazy_static! {
    // Usernames: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// A stored identity: the credential record behind one account.
///
/// Deliberately not `Serialize`: the hash and salt are secret material and
/// must never appear in an API response.
#[derive(Debug, Clone, FromRow)]
pub struct Identity {
    pub id: i32,
    /// Unique, case-sensitive, immutable after registration.
    pub username: String,
    /// Opaque digest produced by a `PasswordHasher`.
    pub password_hash: String,
    /// Per-identity salt consumed by the hasher alongside the password.
    pub salt: String,
}

/// Credentials submitted to both registration and login.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Desired account name.
    /// Must be between 4 and 20 characters, alphanumeric, underscores or hyphens.
    #[validate(
        length(min = 4, max = 20),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,

    /// Account password.
    /// 8 to 20 characters mixing upper case, lower case, and a digit or symbol.
    #[validate(
        length(min = 8, max = 20),
        custom(function = "password_strength", message = "Password too weak")
    )]
    pub password: String,
}

/// A password must mix an uppercase letter, a lowercase letter, and a digit
/// or symbol. Expressed as a function because the equivalent lookahead regex
/// is not supported by the `regex` crate.
fn password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric() && c != '_');

    if has_upper && has_lower && (has_digit || has_symbol) {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength"))
    }
}
