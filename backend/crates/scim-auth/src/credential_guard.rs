use crate::{AuthError, CredentialHasher, PasswordPolicy, Result as AuthErrorResult};

use scim_core::UserProfile;

use std::sync::Arc;

/// Gate for every piece of credential material handled by the store.
///
/// Both collaborators are injected so policies and hash algorithms can be
/// swapped without touching callers.
#[derive(Clone)]
pub struct CredentialGuard {
    policy: Arc<dyn PasswordPolicy>,
    hasher: Arc<dyn CredentialHasher>,
}

impl CredentialGuard {
    pub fn new(policy: Arc<dyn PasswordPolicy>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { policy, hasher }
    }

    pub fn validate(&self, password: &str, profile: &UserProfile) -> AuthErrorResult<()> {
        self.policy.validate(password, profile)
    }

    pub fn hash(&self, password: &str) -> AuthErrorResult<String> {
        self.hasher.hash(password)
    }

    pub fn verify(&self, password: &str, stored: &str) -> AuthErrorResult<bool> {
        self.hasher.verify(password, stored)
    }

    /// Like [`verify`](Self::verify) but a mismatch becomes
    /// [`AuthError::InvalidCredential`].
    #[track_caller]
    pub fn ensure_matches(&self, password: &str, stored: &str) -> AuthErrorResult<()> {
        if self.hasher.verify(password, stored)? {
            Ok(())
        } else {
            Err(AuthError::invalid_credential())
        }
    }
}

impl std::fmt::Debug for CredentialGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialGuard").finish_non_exhaustive()
    }
}
