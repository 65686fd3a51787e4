use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Settings shared by every binary, read from an optional `configuration`
/// file and `APP__*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Read a variable through `lookup`, falling back to `default`.
///
/// A variable with no default that `lookup` cannot resolve, or that is set
/// to blank text, is a configuration error.
pub fn get_env<F>(lookup: &F, key: &str, default: Option<&str>) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) if default.is_none() && val.trim().is_empty() => Err(AppError::ConfigError(
            anyhow::anyhow!("{} environment variable is empty", key),
        )),
        Some(val) => Ok(val),
        None => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} environment variable is not set",
                key
            ))),
        },
    }
}

/// Lookup over the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn present_value_wins_over_default() {
        let lookup = lookup_from(&[("HOST", "0.0.0.0")]);
        assert_eq!(
            get_env(&lookup, "HOST", Some("127.0.0.1")).unwrap(),
            "0.0.0.0"
        );
    }

    #[test]
    fn missing_value_uses_default() {
        let lookup = lookup_from(&[]);
        assert_eq!(
            get_env(&lookup, "HOST", Some("127.0.0.1")).unwrap(),
            "127.0.0.1"
        );
    }

    #[test]
    fn missing_required_value_is_config_error() {
        let lookup = lookup_from(&[]);
        let err = get_env(&lookup, "GEMINI_API", None).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GEMINI_API"));
    }

    #[test]
    fn blank_required_value_is_config_error() {
        let lookup = lookup_from(&[("SUPABASE_KEY", ""), ("PORT", "  ")]);
        for key in ["SUPABASE_KEY", "PORT"] {
            let err = get_env(&lookup, key, None).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            assert!(err.to_string().contains(key));
        }
    }

}
