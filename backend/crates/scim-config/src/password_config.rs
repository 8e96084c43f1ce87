use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_MAX_PASSWORD_LENGTH, DEFAULT_MIN_PASSWORD_LENGTH,
    MAX_PASSWORD_LENGTH_LIMIT,
};

use serde::Deserialize;

/// Bounds for the default length-based password policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_PASSWORD_LENGTH,
            max_length: DEFAULT_MAX_PASSWORD_LENGTH,
        }
    }
}

impl PasswordConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.min_length == 0 {
            return Err(ConfigError::password("password.min_length must be at least 1"));
        }

        if self.max_length < self.min_length || self.max_length > MAX_PASSWORD_LENGTH_LIMIT {
            return Err(ConfigError::password(format!(
                "password.max_length must be {}-{}, got {}",
                self.min_length, MAX_PASSWORD_LENGTH_LIMIT, self.max_length
            )));
        }

        Ok(())
    }
}
