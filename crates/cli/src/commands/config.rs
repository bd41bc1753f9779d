use std::env;
use std::fs;
use std::path::PathBuf;

use shopmate_core::{AppConfig, LoadOptions};
use toml::Value;

use super::CommandResult;

/// Renders the effective configuration after layering, attributing each
/// value to the env var, config file, or built-in default that supplied it.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult {
                exit_code: 2,
                output: format!("config validation failed: {error}"),
            }
        }
    };

    let file = [PathBuf::from("shopmate.toml"), PathBuf::from("config/shopmate.toml")]
        .into_iter()
        .find(|path| path.exists())
        .and_then(|path| {
            let doc = fs::read_to_string(&path).ok()?.parse::<Value>().ok()?;
            Some((path, doc))
        });

    let fields: &[(&str, String, &str)] = &[
        (
            "store.return_window_days",
            config.store.return_window_days.to_string(),
            "SHOPMATE_RETURN_WINDOW_DAYS",
        ),
        (
            "store.cancel_window_hours",
            config.store.cancel_window_hours.to_string(),
            "SHOPMATE_CANCEL_WINDOW_HOURS",
        ),
        ("store.delivery_days", config.store.delivery_days.to_string(), "SHOPMATE_DELIVERY_DAYS"),
        (
            "store.coupon_threshold",
            config.store.coupon_threshold.to_string(),
            "SHOPMATE_COUPON_THRESHOLD",
        ),
        (
            "store.coupon_discount_pct",
            config.store.coupon_discount_pct.to_string(),
            "SHOPMATE_COUPON_DISCOUNT_PCT",
        ),
        (
            "store.max_recommendations",
            config.store.max_recommendations.to_string(),
            "SHOPMATE_MAX_RECOMMENDATIONS",
        ),
        (
            "store.warranty_subscribed",
            config.store.warranty_subscribed.to_string(),
            "SHOPMATE_WARRANTY_SUBSCRIBED",
        ),
        ("logging.level", config.logging.level.clone(), "SHOPMATE_LOGGING_LEVEL"),
        ("logging.format", format!("{:?}", config.logging.format), "SHOPMATE_LOGGING_FORMAT"),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for (key, value, env_key) in fields {
        let source = if env::var_os(env_key).is_some() {
            format!("env ({env_key})")
        } else if let Some((path, _)) = file.as_ref().filter(|(_, doc)| file_sets_key(doc, key)) {
            format!("file ({})", path.display())
        } else {
            "default".to_string()
        };
        lines.push(format!("- {key} = {value} (source: {source})"));
    }

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn file_sets_key(doc: &Value, dotted_key: &str) -> bool {
    let mut node = doc;
    for part in dotted_key.split('.') {
        match node.get(part) {
            Some(next) => node = next,
            None => return false,
        }
    }
    true
}
