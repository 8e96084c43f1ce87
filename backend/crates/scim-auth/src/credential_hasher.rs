use crate::Result as AuthErrorResult;

/// One-way, salted password hashing.
///
/// Implementations must produce values that are safe to persist and must
/// verify through their own routine rather than by re-hashing and comparing.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> AuthErrorResult<String>;

    /// `Ok(false)` on mismatch; `Err` only when `stored` is not a hash this
    /// implementation understands.
    fn verify(&self, plaintext: &str, stored: &str) -> AuthErrorResult<bool>;
}
