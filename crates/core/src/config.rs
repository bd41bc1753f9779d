use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// Tunables for the simulated storefront. Defaults mirror the published
/// policy texts (30-day returns, 24-hour cancellations, $100 coupon floor).
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub return_window_days: i64,
    pub cancel_window_hours: i64,
    pub delivery_days: i64,
    pub coupon_threshold: u32,
    pub coupon_discount_pct: u8,
    pub max_recommendations: usize,
    pub warranty_subscribed: bool,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub warranty_subscribed: Option<bool>,
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
            store: StoreConfig {
                return_window_days: 30,
                cancel_window_hours: 24,
                delivery_days: 7,
                coupon_threshold: 100,
                coupon_discount_pct: 10,
                max_recommendations: 3,
                warranty_subscribed: false,
            },
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
    /// Layered load: defaults, then an optional TOML patch file, then
    /// `SHOPMATE_*` environment overrides, then programmatic overrides.
    /// Validation runs once on the merged result.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("shopmate.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(store) = patch.store {
            if let Some(return_window_days) = store.return_window_days {
                self.store.return_window_days = return_window_days;
            }
            if let Some(cancel_window_hours) = store.cancel_window_hours {
                self.store.cancel_window_hours = cancel_window_hours;
            }
            if let Some(delivery_days) = store.delivery_days {
                self.store.delivery_days = delivery_days;
            }
            if let Some(coupon_threshold) = store.coupon_threshold {
                self.store.coupon_threshold = coupon_threshold;
            }
            if let Some(coupon_discount_pct) = store.coupon_discount_pct {
                self.store.coupon_discount_pct = coupon_discount_pct;
            }
            if let Some(max_recommendations) = store.max_recommendations {
                self.store.max_recommendations = max_recommendations;
            }
            if let Some(warranty_subscribed) = store.warranty_subscribed {
                self.store.warranty_subscribed = warranty_subscribed;
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
        if let Some(value) = read_env("SHOPMATE_RETURN_WINDOW_DAYS") {
            self.store.return_window_days = parse_i64("SHOPMATE_RETURN_WINDOW_DAYS", &value)?;
        }
        if let Some(value) = read_env("SHOPMATE_CANCEL_WINDOW_HOURS") {
            self.store.cancel_window_hours = parse_i64("SHOPMATE_CANCEL_WINDOW_HOURS", &value)?;
        }
        if let Some(value) = read_env("SHOPMATE_DELIVERY_DAYS") {
            self.store.delivery_days = parse_i64("SHOPMATE_DELIVERY_DAYS", &value)?;
        }
        if let Some(value) = read_env("SHOPMATE_COUPON_THRESHOLD") {
            self.store.coupon_threshold = parse_u32("SHOPMATE_COUPON_THRESHOLD", &value)?;
        }
        if let Some(value) = read_env("SHOPMATE_COUPON_DISCOUNT_PCT") {
            self.store.coupon_discount_pct = parse_u8("SHOPMATE_COUPON_DISCOUNT_PCT", &value)?;
        }
        if let Some(value) = read_env("SHOPMATE_MAX_RECOMMENDATIONS") {
            self.store.max_recommendations =
                parse_u32("SHOPMATE_MAX_RECOMMENDATIONS", &value)? as usize;
        }
        if let Some(value) = read_env("SHOPMATE_WARRANTY_SUBSCRIBED") {
            self.store.warranty_subscribed = parse_bool("SHOPMATE_WARRANTY_SUBSCRIBED", &value)?;
        }

        let log_level =
            read_env("SHOPMATE_LOGGING_LEVEL").or_else(|| read_env("SHOPMATE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SHOPMATE_LOGGING_FORMAT").or_else(|| read_env("SHOPMATE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(warranty_subscribed) = overrides.warranty_subscribed {
            self.store.warranty_subscribed = warranty_subscribed;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_store(&self.store)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("shopmate.toml"), PathBuf::from("config/shopmate.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn validate_store(store: &StoreConfig) -> Result<(), ConfigError> {
    if store.return_window_days <= 0 {
        return Err(ConfigError::Validation(
            "store.return_window_days must be greater than zero".to_string(),
        ));
    }
    if store.cancel_window_hours <= 0 {
        return Err(ConfigError::Validation(
            "store.cancel_window_hours must be greater than zero".to_string(),
        ));
    }
    if store.delivery_days <= 0 {
        return Err(ConfigError::Validation(
            "store.delivery_days must be greater than zero".to_string(),
        ));
    }
    if store.coupon_discount_pct == 0 || store.coupon_discount_pct > 100 {
        return Err(ConfigError::Validation(
            "store.coupon_discount_pct must be in range 1..=100".to_string(),
        ));
    }
    if store.max_recommendations == 0 || store.max_recommendations > 10 {
        return Err(ConfigError::Validation(
            "store.max_recommendations must be in range 1..=10".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_i64(key: &str, value: &str) -> Result<i64, ConfigError> {
    value.parse::<i64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u8(key: &str, value: &str) -> Result<u8, ConfigError> {
    value.parse::<u8>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    store: Option<StorePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct StorePatch {
    return_window_days: Option<i64>,
    cancel_window_hours: Option<i64>,
    delivery_days: Option<i64>,
    coupon_threshold: Option<u32>,
    coupon_discount_pct: Option<u8>,
    max_recommendations: Option<usize>,
    warranty_subscribed: Option<bool>,
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

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_match_published_policies() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.store.return_window_days == 30, "default return window should be 30 days")?;
        ensure(config.store.cancel_window_hours == 24, "default cancel window should be 24 hours")?;
        ensure(config.store.delivery_days == 7, "default delivery estimate should be 7 days")?;
        ensure(!config.store.warranty_subscribed, "warranty should default to unsubscribed")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SHOPMATE_RETURN_WINDOW_DAYS", "60");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("shopmate.toml");
            fs::write(
                &path,
                r#"
[store]
return_window_days = 45
delivery_days = 5

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

            ensure(config.store.return_window_days == 60, "env return window should win over file")?;
            ensure(config.store.delivery_days == 5, "file delivery days should win over defaults")?;
            ensure(config.logging.level == "debug", "override log level should win over file")?;
            Ok(())
        })();

        clear_vars(&["SHOPMATE_RETURN_WINDOW_DAYS"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SHOPMATE_LOG_LEVEL", "warn");
        env::set_var("SHOPMATE_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warn log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["SHOPMATE_LOG_LEVEL", "SHOPMATE_LOG_FORMAT"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SHOPMATE_MAX_RECOMMENDATIONS", "0");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("max_recommendations")
            );
            ensure(has_message, "validation failure should mention max_recommendations")
        })();

        clear_vars(&["SHOPMATE_MAX_RECOMMENDATIONS"]);
        result
    }

    #[test]
    fn malformed_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("SHOPMATE_CANCEL_WINDOW_HOURS", "soon");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected env parse failure".to_string()),
                Err(error) => error,
            };
            ensure(
                matches!(error, ConfigError::InvalidEnvOverride { ref key, .. } if key == "SHOPMATE_CANCEL_WINDOW_HOURS"),
                "error should name the offending variable",
            )
        })();

        clear_vars(&["SHOPMATE_CANCEL_WINDOW_HOURS"]);
        result
    }
}
