use secrecy::Secret;
use service_core::config::get_env;
use service_core::error::AppError;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BUCKET: &str = "activity-images";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct ActivityConfig {
    pub server: ServerConfig,
    pub gemini: GeminiSettings,
    pub supabase: SupabaseSettings,
    pub models: ModelConfig,
}

/// Configuration for the offline image generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub gemini: GeminiSettings,
    pub supabase: SupabaseSettings,
    pub models: ModelConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    pub url: String,
    pub key: Secret<String>,
    pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for activity suggestions and image matching.
    pub text_model: String,
    /// Model used by the banner generator.
    pub image_model: String,
}

impl ActivityConfig {
    /// Build the configuration from an arbitrary variable source.
    ///
    /// Every required variable is checked before anything else is built.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (gemini, supabase) = provider_settings(lookup)?;

        let port = get_env(lookup, "PORT", None)?;
        let port = port.trim().parse::<u16>().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "PORT must be a valid port number, got {:?}: {}",
                port,
                e
            ))
        })?;

        Ok(ActivityConfig {
            server: ServerConfig {
                host: get_env(lookup, "HOST", Some("127.0.0.1"))?,
                port,
            },
            gemini,
            supabase,
            models: model_config(lookup)?,
        })
    }
}

impl GeneratorConfig {
    /// Like [`ActivityConfig::from_lookup`] without the server settings.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (gemini, supabase) = provider_settings(lookup)?;

        Ok(GeneratorConfig {
            gemini,
            supabase,
            models: model_config(lookup)?,
        })
    }
}

fn provider_settings<F>(lookup: &F) -> Result<(GeminiSettings, SupabaseSettings), AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = get_env(lookup, "GEMINI_API", None)?;
    let url = get_env(lookup, "SUPABASE_URL", None)?;
    let key = get_env(lookup, "SUPABASE_KEY", None)?;

    Ok((
        GeminiSettings {
            api_key: Secret::new(api_key),
            api_base: get_env(lookup, "GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE))?,
        },
        SupabaseSettings {
            url,
            key: Secret::new(key),
            bucket: get_env(lookup, "SUPABASE_BUCKET", Some(DEFAULT_BUCKET))?,
        },
    ))
}

fn model_config<F>(lookup: &F) -> Result<ModelConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(ModelConfig {
        text_model: get_env(lookup, "GENAI_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL))?,
        image_model: get_env(lookup, "GENAI_IMAGE_MODEL", Some(DEFAULT_IMAGE_MODEL))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    const REQUIRED: [(&str, &str); 4] = [
        ("GEMINI_API", "gemini-key"),
        ("SUPABASE_URL", "https://project.supabase.co"),
        ("SUPABASE_KEY", "supabase-key"),
        ("PORT", "8000"),
    ];

    fn lookup_without(missing: &str) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = REQUIRED
            .iter()
            .filter(|(k, _)| *k != missing)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_with_all_required_variables() {
        let config = ActivityConfig::from_lookup(&lookup_without("")).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.gemini.api_key.expose_secret(), "gemini-key");
        assert_eq!(config.supabase.url, "https://project.supabase.co");
        assert_eq!(config.supabase.bucket, DEFAULT_BUCKET);
        assert_eq!(config.models.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.models.image_model, DEFAULT_IMAGE_MODEL);
    }

    #[test]
    fn each_missing_variable_prevents_startup() {
        for (key, _) in REQUIRED {
            let err = ActivityConfig::from_lookup(&lookup_without(key)).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)), "{key}");
            assert!(err.to_string().contains(key), "{err}");
        }
    }

    #[test]
    fn each_empty_variable_prevents_startup() {
        for (key, _) in REQUIRED {
            let lookup = |k: &str| {
                if k == key {
                    Some(String::new())
                } else {
                    lookup_without("")(k)
                }
            };
            let err = ActivityConfig::from_lookup(&lookup).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)), "{key}");
            assert!(err.to_string().contains(key), "{err}");
        }
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let lookup = |key: &str| match key {
            "PORT" => Some("eighty".to_string()),
            other => lookup_without("")(other),
        };
        let err = ActivityConfig::from_lookup(&lookup).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn generator_does_not_need_port() {
        let config = GeneratorConfig::from_lookup(&lookup_without("PORT")).unwrap();
        assert_eq!(config.supabase.key.expose_secret(), "supabase-key");
    }

    #[test]
    fn generator_still_needs_credentials() {
        let err = GeneratorConfig::from_lookup(&lookup_without("SUPABASE_KEY")).unwrap_err();
        assert!(err.to_string().contains("SUPABASE_KEY"));
    }
}
