pub mod argon2_hasher;
pub mod credential_guard;
pub mod credential_hasher;
pub mod error;
pub mod password_policy;

pub use argon2_hasher::Argon2Hasher;
pub use credential_guard::CredentialGuard;
pub use credential_hasher::CredentialHasher;
pub use error::{AuthError, Result};
pub use password_policy::{LengthPasswordPolicy, PasswordPolicy};

#[cfg(test)]
mod tests;
