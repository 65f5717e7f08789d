// src/config.rs
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the relay needs, resolved once at start-up.
#[derive(Clone)]
pub struct RelayConfig {
    /// Upstream credential. `None` puts the relay in fallback mode.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub upstream_timeout: Duration,
    pub bind_addr: String,
    pub static_dir: String,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("bind_addr", &self.bind_addr)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

impl RelayConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an explicit set of variables, ignoring the environment.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let temperature = parse_var::<f32>("CHAT_TEMPERATURE", non_blank("CHAT_TEMPERATURE"))?
            .unwrap_or(defaults.temperature);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid {
                var: "CHAT_TEMPERATURE",
                value: temperature.to_string(),
                reason: "must be between 0 and 2".to_string(),
            });
        }

        let upstream_timeout = parse_var::<u64>(
            "CHAT_UPSTREAM_TIMEOUT_SECS",
            non_blank("CHAT_UPSTREAM_TIMEOUT_SECS"),
        )?
        .map(Duration::from_secs)
        .unwrap_or(defaults.upstream_timeout);

        Ok(Self {
            api_key: non_blank("OPENAI_API_KEY"),
            api_url: non_blank("OPENAI_API_URL").unwrap_or(defaults.api_url),
            model: non_blank("OPENAI_MODEL").unwrap_or(defaults.model),
            max_tokens: parse_var("CHAT_MAX_TOKENS", non_blank("CHAT_MAX_TOKENS"))?
                .unwrap_or(defaults.max_tokens),
            temperature,
            upstream_timeout,
            bind_addr: non_blank("RELAY_BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: non_blank("RELAY_STATIC_DIR").unwrap_or(defaults.static_dir),
        })
    }

    pub fn is_live(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_var<T>(var: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.map(|value| {
        value.parse::<T>().map_err(|e| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        })
    })
    .transpose()
}
