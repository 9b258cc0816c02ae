use crate::auth::password::PasswordHasher;
use crate::error::AppError;
use crate::models::Identity;
use sqlx::PgPool;
use std::sync::Arc;

/// Persistence boundary for identities.
///
/// Holds the pool handle and the hashing capability; cheap to clone.
#[derive(Clone)]
pub struct IdentityStore {
    pool: PgPool,
    hasher: Arc<dyn PasswordHasher>,
}

impl IdentityStore {
    pub fn new(pool: PgPool, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { pool, hasher }
    }

    /// Creates a new identity with a fresh salt.
    ///
    /// Uniqueness is left to the database: a unique violation on the
    /// username maps to `DuplicateIdentity`. There is no existence
    /// pre-check, so concurrent registrations of the same username cannot
    /// both succeed.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        let salt = self.hasher.generate_salt();
        let password_hash = self.hasher.hash(password, &salt)?;

        sqlx::query("INSERT INTO users (username, password_hash, salt) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(&password_hash)
            .bind(&salt)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::DuplicateIdentity("Username already exists".into())
                }
                other => other.into(),
            })?;

        Ok(())
    }

    /// Resolves a username/password pair to the stored identity.
    ///
    /// An unknown username and a failed verification both come back as
    /// `Ok(None)`; only infrastructure problems surface as errors.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, AppError> {
        let identity = match self.find_by_username(username).await? {
            Some(identity) => identity,
            None => return Ok(None),
        };

        if self
            .hasher
            .verify(password, &identity.salt, &identity.password_hash)?
        {
            Ok(Some(identity))
        } else {
            Ok(None)
        }
    }

    /// Looks up an identity by username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, AppError> {
        let identity = sqlx::query_as::<_, Identity>(
            "SELECT id, username, password_hash, salt FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::BcryptPasswordHasher;
    const MIN_COST: u32 = 4;
    use std::env;

    async fn connect() -> IdentityStore {
        dotenv::dotenv().ok();
        let pool = PgPool::connect(&env::var("DATABASE_URL").expect("DATABASE_URL not set"))
            .await
            .unwrap();
        IdentityStore::new(pool, Arc::new(BcryptPasswordHasher::new(MIN_COST)))
    }

    async fn cleanup(store: &IdentityStore, username: &str) {
        sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&store.pool)
            .await
            .unwrap();
    }

    // Requires a live database; run with `cargo test -- --ignored`.
    #[ignore]
    #[actix_rt::test]
    async fn test_register_and_authenticate() {
        let store = connect().await;
        cleanup(&store, "identity_store_alice").await;

        store
            .register("identity_store_alice", "Sup3rSecret")
            .await
            .unwrap();

        let identity = store
            .authenticate("identity_store_alice", "Sup3rSecret")
            .await
            .unwrap()
            .expect("correct credentials should resolve");
        assert_eq!(identity.username, "identity_store_alice");

        // Wrong password and unknown username both resolve to None.
        assert!(store
            .authenticate("identity_store_alice", "WrongSecret1")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .authenticate("identity_store_nobody", "Sup3rSecret")
            .await
            .unwrap()
            .is_none());

        cleanup(&store, "identity_store_alice").await;
    }

    // Requires a live database; run with `cargo test -- --ignored`.
    #[ignore]
    #[actix_rt::test]
    async fn test_duplicate_username_is_a_conflict() {
        let store = connect().await;
        cleanup(&store, "identity_store_bob").await;

        store
            .register("identity_store_bob", "Sup3rSecret")
            .await
            .unwrap();

        match store.register("identity_store_bob", "0therSecret").await {
            Err(AppError::DuplicateIdentity(_)) => {}
            other => panic!("Expected a duplicate identity error, got {:?}", other),
        }

        cleanup(&store, "identity_store_bob").await;
    }
}
