//! Argon2id implementation of [`CredentialHasher`].
//!
//! Hashes are emitted as PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`),
//! so verification always uses the parameters recorded with the stored value
//! even after the configured cost changes.

use crate::{AuthError, CredentialHasher, Result as AuthErrorResult};

use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

const SALT_LENGTH: usize = 16;

pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Build a hasher with explicit cost parameters.
    #[track_caller]
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> AuthErrorResult<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::hashing(format!("invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        let salt_bytes: [u8; SALT_LENGTH] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AuthError::hashing(format!("salt encoding failed: {}", e)))?;

        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::hashing(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, stored: &str) -> AuthErrorResult<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AuthError::hashing(format!("stored hash is malformed: {}", e)))?;

        match self.argon2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(AuthError::hashing(e.to_string())),
        }
    }
}
