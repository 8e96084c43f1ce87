use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DEACTIVATE_ON_DELETE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    MIN_PAGE_SIZE,
};

use serde::Deserialize;

/// Store-wide behavior, fixed at wiring time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// `true`: removing a user marks it inactive. `false`: the row is deleted.
    pub deactivate_on_delete: bool,
    /// Rows fetched per window when listing or searching
    pub page_size: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            deactivate_on_delete: DEFAULT_DEACTIVATE_ON_DELETE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.page_size < MIN_PAGE_SIZE || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::store(format!(
                "store.page_size must be {}-{}, got {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE, self.page_size
            )));
        }

        Ok(())
    }
}
