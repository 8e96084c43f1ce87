mod config;
mod database_config;
mod error;
mod hashing_config;
mod log_level;
mod logging_config;
mod password_config;
mod store_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use hashing_config::HashingConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use password_config::PasswordConfig;
pub use store_config::StoreConfig;

const CONFIG_DIR_ENV: &str = "SCIM_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".scim";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_DATABASE_FILENAME: &str = "users.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const MIN_MAX_CONNECTIONS: u32 = 1;
const MAX_MAX_CONNECTIONS: u32 = 100;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

const DEFAULT_DEACTIVATE_ON_DELETE: bool = true;
const DEFAULT_PAGE_SIZE: u32 = 200;
const MIN_PAGE_SIZE: u32 = 1;
const MAX_PAGE_SIZE: u32 = 10_000;

const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;
const DEFAULT_MAX_PASSWORD_LENGTH: usize = 255;
const MAX_PASSWORD_LENGTH_LIMIT: usize = 4096;

// Argon2id defaults (OWASP baseline: 19 MiB, 2 passes, 1 lane)
const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;
const DEFAULT_HASH_ITERATIONS: u32 = 2;
const DEFAULT_HASH_PARALLELISM: u32 = 1;
const MIN_HASH_MEMORY_KIB_PER_LANE: u32 = 8;
const MAX_HASH_MEMORY_KIB: u32 = 4 * 1024 * 1024;
const MAX_HASH_ITERATIONS: u32 = 64;
const MAX_HASH_PARALLELISM: u32 = 64;
