use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use async_trait::async_trait;

use crate::error::{UserError, UserResult};

/// Password hashing collaborator.
///
/// Hashing is CPU bound, so implementations may move the work off the
/// async executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> UserResult<String>;

    /// `false` for a mismatch or for a stored hash that cannot be parsed.
    async fn compare(&self, plaintext: &str, hash: &str) -> bool;
}

/// Well-formed Argon2id hash with the default cost that no password matches.
/// Compared against when a login names an unknown user.
pub(crate) const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$PNy5wWdtlFuZbYa3+rpTcw$M+AfitPBxY79QBSE5URqQwsU2eKwIutI76NW075dW2Y";

/// Argon2id with the crate defaults and a random salt per hash
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, plaintext: &str) -> UserResult<String> {
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| UserError::PasswordHash(e.to_string()))
        })
        .await
        .map_err(|e| UserError::PasswordHash(e.to_string()))?
    }

    async fn compare(&self, plaintext: &str, hash: &str) -> bool {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let Ok(parsed) = PasswordHash::new(&hash) else {
                tracing::warn!("Stored password hash is not in PHC format");
                return false;
            };
            Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
        .await
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_compare() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("s3cret!").await.unwrap();

        assert_ne!(hash, "s3cret!");
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.compare("s3cret!", &hash).await);
        assert!(!hasher.compare("wrong", &hash).await);
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = Argon2Hasher;
        let first = hasher.hash("s3cret!").await.unwrap();
        let second = hasher.hash("s3cret!").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_dummy_hash_parses_with_default_cost() {
        let parsed = PasswordHash::new(DUMMY_HASH).unwrap();
        let params = argon2::Params::try_from(&parsed).unwrap();

        assert_eq!(parsed.algorithm, argon2::Algorithm::Argon2id.ident());
        assert_eq!(params.m_cost(), argon2::Params::default().m_cost());
        assert_eq!(params.t_cost(), argon2::Params::default().t_cost());
        assert!(!Argon2Hasher.compare("s3cret!", DUMMY_HASH).await);
    }

    #[tokio::test]
    async fn test_unparsable_hash_compares_false() {
        assert!(!Argon2Hasher.compare("s3cret!", "plaintext-in-db").await);
    }
}
