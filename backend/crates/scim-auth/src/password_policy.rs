use crate::{AuthError, Result as AuthErrorResult};

use scim_core::UserProfile;

pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;
pub const DEFAULT_MAX_PASSWORD_LENGTH: usize = 255;

/// Decides whether a proposed password is acceptable for a user.
pub trait PasswordPolicy: Send + Sync {
    fn validate(&self, password: &str, profile: &UserProfile) -> AuthErrorResult<()>;
}

/// Length bounds (in characters) plus a check that the password is not the user name.
#[derive(Debug, Clone, Copy)]
pub struct LengthPasswordPolicy {
    min_length: usize,
    max_length: usize,
}

impl LengthPasswordPolicy {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length: min_length.max(1),
            max_length,
        }
    }
}

impl Default for LengthPasswordPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PASSWORD_LENGTH, DEFAULT_MAX_PASSWORD_LENGTH)
    }
}

impl PasswordPolicy for LengthPasswordPolicy {
    #[track_caller]
    fn validate(&self, password: &str, profile: &UserProfile) -> AuthErrorResult<()> {
        if password.trim().is_empty() {
            return Err(AuthError::weak("password must not be blank"));
        }

        let length = password.chars().count();
        if length < self.min_length {
            return Err(AuthError::weak(format!(
                "password must be at least {} characters",
                self.min_length
            )));
        }
        if length > self.max_length {
            return Err(AuthError::weak(format!(
                "password must be at most {} characters",
                self.max_length
            )));
        }

        if password.eq_ignore_ascii_case(profile.user_name()) {
            return Err(AuthError::weak("password must differ from the user name"));
        }

        Ok(())
    }
}
