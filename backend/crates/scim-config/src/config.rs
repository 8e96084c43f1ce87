use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, HashingConfig, LoggingConfig, PasswordConfig, StoreConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    pub password: PasswordConfig,
    pub hashing: HashingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for SCIM_CONFIG_DIR env var, else use ./.scim/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply SCIM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: SCIM_CONFIG_DIR env var > ./.scim/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.database.validate()?;
        self.store.validate()?;
        self.password.validate()?;
        self.hashing.validate()?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get absolute path to the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(Self::config_dir()?.join(file))),
            None => Ok(None),
        }
    }

    /// Log configuration summary. Password material never appears here.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  store: {} on delete, page_size={}",
            if self.store.deactivate_on_delete {
                "deactivate"
            } else {
                "hard delete"
            },
            self.store.page_size
        );
        info!(
            "  password: length {}-{}",
            self.password.min_length, self.password.max_length
        );
        info!(
            "  hashing: argon2id m={}KiB t={} p={}",
            self.hashing.memory_kib, self.hashing.iterations, self.hashing.parallelism
        );
    }

    fn apply_env_overrides(&mut self) {
        // Database
        Self::apply_env_string("SCIM_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "SCIM_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Logging
        Self::apply_env_parse("SCIM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("SCIM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("SCIM_LOG_FILE", &mut self.logging.file);

        // Store
        Self::apply_env_bool(
            "SCIM_STORE_DEACTIVATE_ON_DELETE",
            &mut self.store.deactivate_on_delete,
        );
        Self::apply_env_parse("SCIM_STORE_PAGE_SIZE", &mut self.store.page_size);

        // Password
        Self::apply_env_parse("SCIM_PASSWORD_MIN_LENGTH", &mut self.password.min_length);
        Self::apply_env_parse("SCIM_PASSWORD_MAX_LENGTH", &mut self.password.max_length);

        // Hashing
        Self::apply_env_parse("SCIM_HASHING_MEMORY_KIB", &mut self.hashing.memory_kib);
        Self::apply_env_parse("SCIM_HASHING_ITERATIONS", &mut self.hashing.iterations);
        Self::apply_env_parse("SCIM_HASHING_PARALLELISM", &mut self.hashing.parallelism);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
