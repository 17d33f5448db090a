//! Configuration commands.
//!
//! - `config set`: Set a configuration value
//! - `config show`: Display current configuration

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{Config, SearchMode};
use crate::error::{ArtifyError, Result};

const VALID_KEYS: &[&str] = &[
    "api.url",
    "auth.token",
    "auth.viewer_id",
    "auth.viewer_name",
    "auth.viewer_email",
    "remote.timeout",
    "search.debounce_ms",
    "search.mode",
];

/// Reject keys written with an underscore where a dot belongs, e.g.
/// `api_url` for `api.url`.
fn validate_config_key(key: &str) -> Result<&str> {
    if !key.contains('.')
        && let Some(pos) = key.find('_')
    {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        return Err(ArtifyError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{dot_version}'"
        )));
    }
    if !VALID_KEYS.contains(&key) {
        return Err(ArtifyError::Config(format!(
            "unknown config key '{key}'. Valid keys: {}",
            VALID_KEYS.join(", ")
        )));
    }
    Ok(key)
}

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

fn optional_text(value: &Option<String>) -> String {
    match value {
        Some(v) => v.clone(),
        None => "not set".dimmed().to_string(),
    }
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let token = config.token().map(|t| mask_sensitive_value(&t));

    let json_output = json!({
        "api": { "url": config.api_url() },
        "auth": {
            "token": token,
            "token_configured": token.is_some(),
            "viewer_id": config.auth.viewer_id,
            "viewer_name": config.auth.viewer_name,
            "viewer_email": config.auth.viewer_email,
        },
        "remote": { "timeout": config.remote_timeout },
        "search": {
            "debounce_ms": config.search.debounce_ms,
            "mode": config.search.mode.to_string(),
        },
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text.push_str(&format!("{}:\n", "api".cyan()));
    text.push_str(&format!("  url: {}\n\n", config.api_url()));

    text.push_str(&format!("{}:\n", "auth".cyan()));
    let token_status = match token {
        Some(ref masked) => masked.green().to_string(),
        None => "not configured".dimmed().to_string(),
    };
    text.push_str(&format!("  token: {token_status}\n"));
    text.push_str(&format!("  viewer_id: {}\n", optional_text(&config.auth.viewer_id)));
    text.push_str(&format!(
        "  viewer_name: {}\n",
        optional_text(&config.auth.viewer_name)
    ));
    text.push_str(&format!(
        "  viewer_email: {}\n\n",
        optional_text(&config.auth.viewer_email)
    ));

    text.push_str(&format!("{}:\n", "remote".cyan()));
    text.push_str(&format!("  timeout: {}s\n\n", config.remote_timeout));

    text.push_str(&format!("{}:\n", "search".cyan()));
    text.push_str(&format!("  debounce_ms: {}\n", config.search.debounce_ms));
    text.push_str(&format!("  mode: {}\n\n", config.search.mode));

    text.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output).with_text(text).print(output)
}

/// Write `value` under `key`. Returns the value as it should be echoed back.
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<serde_json::Value> {
    let optional = |value: &str| {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    match key {
        "api.url" => {
            let parsed = url::Url::parse(value).map_err(|e| {
                ArtifyError::Config(format!("invalid value '{value}' for api.url: {e}"))
            })?;
            if parsed.cannot_be_a_base() {
                return Err(ArtifyError::Config(format!(
                    "invalid value '{value}' for api.url: not a base URL"
                )));
            }
            config.api_url = value.to_string();
            Ok(json!(value))
        }
        "auth.token" => {
            config.auth.token = optional(value);
            Ok(json!(config.auth.token.as_deref().map(mask_sensitive_value)))
        }
        "auth.viewer_id" => {
            config.auth.viewer_id = optional(value);
            Ok(json!(config.auth.viewer_id))
        }
        "auth.viewer_name" => {
            config.auth.viewer_name = optional(value);
            Ok(json!(config.auth.viewer_name))
        }
        "auth.viewer_email" => {
            config.auth.viewer_email = optional(value);
            Ok(json!(config.auth.viewer_email))
        }
        "remote.timeout" => {
            let seconds = value.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                ArtifyError::Config(format!(
                    "invalid value '{value}' for remote.timeout. Expected a positive number of seconds"
                ))
            })?;
            config.remote_timeout = seconds;
            Ok(json!(seconds))
        }
        "search.debounce_ms" => {
            let ms = value.parse::<u64>().map_err(|_| {
                ArtifyError::Config(format!(
                    "invalid value '{value}' for search.debounce_ms. Expected milliseconds"
                ))
            })?;
            config.search.debounce_ms = ms;
            Ok(json!(ms))
        }
        "search.mode" => {
            let mode: SearchMode = value.parse()?;
            config.search.mode = mode;
            Ok(json!(mode.to_string()))
        }
        _ => Err(ArtifyError::Config(format!(
            "unknown config key '{key}'. Valid keys: {}",
            VALID_KEYS.join(", ")
        ))),
    }
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let mut config = Config::load()?;
    let shown = apply_config_value(&mut config, key, value)?;
    config.save()?;

    let text = match shown {
        serde_json::Value::Null => format!("Cleared {}", key.cyan()),
        serde_json::Value::String(ref s) => format!("Set {} to {s}", key.cyan()),
        ref other => format!("Set {} to {other}", key.cyan()),
    };

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": shown,
        "success": true,
    }))
    .with_text(text)
    .print(output)
}
