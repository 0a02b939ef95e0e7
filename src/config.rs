use reqwest::Url;

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "OUTLINE_API_KEY";
/// Environment variable overriding the API base URL.
pub const API_URL_VAR: &str = "OUTLINE_API_URL";
/// Public Outline API used when no base URL is configured.
pub const DEFAULT_API_URL: &str = "https://app.getoutline.com/api";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0} environment variable is required")]
    MissingConfig(String),
}

/// Connection settings for the remote API. Immutable once loaded.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key =
            read(API_KEY_VAR).ok_or_else(|| ConfigError::MissingConfig(API_KEY_VAR.into()))?;
        let api_url = read(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidConfig(format!("{} '{}': {}", API_URL_VAR, api_url, e))
        })?;

        Ok(Self { api_key, api_url })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}
