//! Password hashing collaborator: hash(plain) -> digest,
//! verify(plain, digest) -> bool.

use anyhow::Context;

/// Hash a plaintext password into a storable digest.
pub fn hash(plain: &str) -> anyhow::Result<String> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST).context("password hashing failed")
}

/// Check a plaintext password against a stored digest. A malformed digest
/// counts as a mismatch, not an error, so login stays uniform.
pub fn verify(plain: &str, digest: &str) -> bool {
    bcrypt::verify(plain, digest).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let digest = hash("password1").unwrap();
        assert_ne!(digest, "password1");
        assert!(verify("password1", &digest));
        assert!(!verify("password2", &digest));
    }

    #[test]
    fn malformed_digest_is_a_mismatch() {
        assert!(!verify("password1", "not-a-bcrypt-digest"));
    }
}
