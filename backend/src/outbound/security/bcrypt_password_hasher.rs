//! bcrypt implementation of [`PasswordHasher`].

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// bcrypt hasher with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Build a hasher with an explicit cost, clamped to bcrypt's valid range.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHashError> {
        bcrypt::hash(plain, self.cost)
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        bcrypt::verify(plain, hash.as_str())
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::with_cost(4)
    }

    #[rstest]
    fn verifies_the_original_password(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("hunter2").expect("hash");
        assert_ne!(hash.as_str(), "hunter2");
        assert!(hasher.verify("hunter2", &hash).expect("verify"));
        assert!(!hasher.verify("hunter3", &hash).expect("verify"));
    }

    #[rstest]
    fn rejects_malformed_digest(hasher: BcryptPasswordHasher) {
        let err = hasher
            .verify("pw", &PasswordHash::new("not-bcrypt"))
            .expect_err("malformed digest");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }

    #[rstest]
    fn clamps_cost_into_valid_range() {
        let hasher = BcryptPasswordHasher::with_cost(1);
        assert!(hasher.hash("pw").is_ok());
    }
}
