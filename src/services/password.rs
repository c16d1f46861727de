//! Credential hashing / verification.
//!
//! bcrypt を一方向ハッシュとして扱う。平文は hash() に渡した後は保持しない。
//! bcrypt は CPU bound なので、async 側からは `*_blocking` ではなく
//! `hash` / `verify` (spawn_blocking 経由) を使う。

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash_blocking(&self, plaintext: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    pub async fn hash(&self, plaintext: String) -> Result<String, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&plaintext)).await?
    }

    pub async fn verify(&self, plaintext: String, stored_hash: String) -> bool {
        match tokio::task::spawn_blocking(move || verify(&plaintext, &stored_hash)).await {
            Ok(matched) => matched,
            Err(err) => {
                tracing::error!(error = ?err, "password verification task failed");
                false
            }
        }
    }
}

/// Returns whether `plaintext` matches `stored_hash`.
///
/// A stored value that is not a bcrypt hash never matches.
pub fn verify(plaintext: &str, stored_hash: &str) -> bool {
    match bcrypt::verify(plaintext, stored_hash) {
        Ok(matched) => matched,
        Err(err) => {
            tracing::warn!(error = ?err, "stored password hash is not verifiable");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // テストでは最小 cost
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_is_not_the_plaintext_and_verifies() {
        let hasher = PasswordHasher::new(TEST_COST);
        let hashed = hasher.hash_blocking("abc123").unwrap();

        assert_ne!(hashed, "abc123");
        assert!(verify("abc123", &hashed));
    }

    #[test]
    fn other_secrets_do_not_verify() {
        let hashed = PasswordHasher::new(TEST_COST).hash_blocking("abc123").unwrap();

        assert!(!verify("abc1234", &hashed));
        assert!(!verify("ABC123", &hashed));
        assert!(!verify("", &hashed));
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert!(!verify("abc123", "abc123"));
        assert!(!verify("abc123", ""));
    }

    #[tokio::test]
    async fn async_round_trip_goes_through_blocking_pool() {
        let hasher = PasswordHasher::new(TEST_COST);
        let hashed = hasher.hash("s3cret".to_string()).await.unwrap();

        assert!(hasher.verify("s3cret".to_string(), hashed.clone()).await);
        assert!(!hasher.verify("nope".to_string(), hashed).await);
    }
}
