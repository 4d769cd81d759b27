use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub inventory: InventoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StorageConfig {
    /// Path of the flat-file catalog. Relative paths resolve against the
    /// working directory, matching where the file has always lived.
    pub data_file: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InventoryConfig {
    /// Quantity at or below which listings carry a low-stock warning.
    pub low_stock_threshold: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub data_file: Option<PathBuf>,
    pub low_stock_threshold: Option<u32>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig { data_file: PathBuf::from("data.json") },
            inventory: InventoryConfig { low_stock_threshold: 5 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    /// Loads configuration with precedence overrides > env > file > defaults.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("stockroom.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(storage) = patch.storage {
            if let Some(data_file) = storage.data_file {
                self.storage.data_file = data_file;
            }
        }

        if let Some(inventory) = patch.inventory {
            if let Some(low_stock_threshold) = inventory.low_stock_threshold {
                self.inventory.low_stock_threshold = low_stock_threshold;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("STOCKROOM_DATA_FILE") {
            self.storage.data_file = PathBuf::from(value);
        }
        if let Some(value) = read_env("STOCKROOM_LOW_STOCK_THRESHOLD") {
            self.inventory.low_stock_threshold =
                parse_u32("STOCKROOM_LOW_STOCK_THRESHOLD", &value)?;
        }

        let log_level =
            read_env("STOCKROOM_LOGGING_LEVEL").or_else(|| read_env("STOCKROOM_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("STOCKROOM_LOGGING_FORMAT").or_else(|| read_env("STOCKROOM_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(data_file) = overrides.data_file {
            self.storage.data_file = data_file;
        }
        if let Some(low_stock_threshold) = overrides.low_stock_threshold {
            self.inventory.low_stock_threshold = low_stock_threshold;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.data_file must not be empty".to_string(),
            ));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        match level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::Validation(
                "logging.level must be one of trace|debug|info|warn|error".to_string(),
            )),
        }
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("stockroom.toml"), PathBuf::from("config/stockroom.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    storage: Option<StoragePatch>,
    inventory: Option<InventoryPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    data_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct InventoryPatch {
    low_stock_threshold: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    const ALL_VARS: &[&str] = &[
        "STOCKROOM_DATA_FILE",
        "STOCKROOM_LOW_STOCK_THRESHOLD",
        "STOCKROOM_LOGGING_LEVEL",
        "STOCKROOM_LOG_LEVEL",
        "STOCKROOM_LOGGING_FORMAT",
        "STOCKROOM_LOG_FORMAT",
    ];

    #[test]
    fn defaults_match_the_historical_data_file_and_threshold() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(ALL_VARS);

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;
        if config.storage.data_file != PathBuf::from("data.json") {
            return Err("default data file should be data.json".to_string());
        }
        if config.inventory.low_stock_threshold != 5 {
            return Err("default low stock threshold should be 5".to_string());
        }
        Ok(())
    }

    #[test]
    fn precedence_is_overrides_then_env_then_file() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(ALL_VARS);

        env::set_var("STOCKROOM_LOW_STOCK_THRESHOLD", "9");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("stockroom.toml");
            fs::write(
                &path,
                r#"
[storage]
data_file = "from-file.json"

[inventory]
low_stock_threshold = 3

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            if config.storage.data_file != PathBuf::from("from-file.json") {
                return Err("file data_file should win over default".to_string());
            }
            if config.inventory.low_stock_threshold != 9 {
                return Err("env threshold should win over file".to_string());
            }
            if config.logging.level != "debug" {
                return Err("explicit override should win over file".to_string());
            }
            Ok(())
        })();

        clear_vars(ALL_VARS);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(ALL_VARS);

        env::set_var("STOCKROOM_LOG_LEVEL", "warn");
        env::set_var("STOCKROOM_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            if config.logging.level != "warn" {
                return Err("alias log level should apply".to_string());
            }
            if !matches!(config.logging.format, LogFormat::Pretty) {
                return Err("alias log format should apply".to_string());
            }
            Ok(())
        })();

        clear_vars(ALL_VARS);
        result
    }

    #[test]
    fn invalid_env_threshold_is_an_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(ALL_VARS);

        env::set_var("STOCKROOM_LOW_STOCK_THRESHOLD", "-4");

        let result = (|| -> Result<(), String> {
            match AppConfig::load(LoadOptions::default()) {
                Ok(_) => Err("negative threshold should fail to load".to_string()),
                Err(ConfigError::InvalidEnvOverride { key, value }) => {
                    if key == "STOCKROOM_LOW_STOCK_THRESHOLD" && value == "-4" {
                        Ok(())
                    } else {
                        Err(format!("unexpected override error for `{key}`=`{value}`"))
                    }
                }
                Err(other) => Err(format!("unexpected error kind: {other}")),
            }
        })();

        clear_vars(ALL_VARS);
        result
    }

    #[test]
    fn unknown_log_level_fails_validation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(ALL_VARS);

        let error = match AppConfig::load(LoadOptions {
            overrides: ConfigOverrides {
                log_level: Some("loud".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }) {
            Ok(_) => return Err("expected validation failure".to_string()),
            Err(error) => error,
        };

        match error {
            ConfigError::Validation(message) if message.contains("logging.level") => Ok(()),
            other => Err(format!("unexpected error kind: {other}")),
        }
    }
}
