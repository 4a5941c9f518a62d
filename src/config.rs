//! Environment-driven configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::signals::validation::DecisionPolicy;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Deployment environment, read from `APP_ENV`.
///
/// Anything other than `production`/`prod` is treated as a sandbox.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Settings for the completion service and the decision policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerConfig {
    /// `None` disables the live completion path; every decision falls back.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub policy: DecisionPolicy,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            policy: DecisionPolicy::default(),
        }
    }
}

impl ManagerConfig {
    /// Load from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let temperature = match get("LLM_TEMPERATURE") {
            Some(raw) => parse_value("LLM_TEMPERATURE", &raw)?,
            None => defaults.temperature,
        };
        let timeout = match get("LLM_TIMEOUT_SECONDS") {
            Some(raw) => Duration::from_secs(parse_value("LLM_TIMEOUT_SECONDS", &raw)?),
            None => defaults.timeout,
        };
        let policy = match get("DECISION_POLICY") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "DECISION_POLICY",
                value: raw,
            })?,
            None => defaults.policy,
        };

        Ok(Self {
            api_key: get("OPENROUTER_API_KEY"),
            base_url: get("OPENROUTER_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: get("OPENROUTER_MODEL").unwrap_or(defaults.model),
            temperature,
            timeout,
            policy,
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
