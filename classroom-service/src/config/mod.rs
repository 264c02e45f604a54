use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct ClassroomConfig {
    pub common: core_config::Config,
    pub anthropic: AnthropicConfig,
    pub sheet_store: SheetStoreConfig,
}

#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: Secret<String>,
    /// Value of the required `anthropic-version` header.
    pub api_version: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct SheetStoreConfig {
    /// Web-app URL of the spreadsheet store. Optional at startup: routes
    /// that need it answer with a configuration error instead.
    pub api_url: Option<String>,
}

impl ClassroomConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ClassroomConfig {
            common,
            anthropic: AnthropicConfig {
                api_key: Secret::new(get_env("ANTHROPIC_API_KEY", Some(""), is_prod)?),
                api_version: get_env("ANTHROPIC_VERSION", Some("2023-06-01"), is_prod)?,
                model: get_env("ANTHROPIC_MODEL", Some("claude-3-5-sonnet"), is_prod)?,
                base_url: get_env(
                    "ANTHROPIC_BASE_URL",
                    Some("https://api.anthropic.com"),
                    is_prod,
                )?,
            },
            sheet_store: SheetStoreConfig {
                api_url: env::var("SHEET_STORE_API_URL").ok(),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
