use dotenv::dotenv;
use reqwest::Url;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Endpoint used when `API_URL` is unset or blank.
pub const DEFAULT_API_URL: &str = "https://app-250125232314.azurewebsites.net//api/bike/store";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API_URL is not a valid URL ({url}): {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Startup configuration for the form service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where rental submissions are POSTed.
    pub api_url: String,
}

impl AppConfig {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::resolve(env::var("API_URL").ok())
    }

    /// Like `from_env`, reading the given dotenv file instead of `./.env`.
    /// Variables already set in the process environment take precedence.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if let Err(err) = dotenv::from_path(path.as_ref()) {
            debug!("No env file at {}: {}", path.as_ref().display(), err);
        }
        Self::resolve(env::var("API_URL").ok())
    }

    pub fn resolve(api_url: Option<String>) -> Result<Self, ConfigError> {
        let api_url = match api_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => {
                info!("API_URL not set, using default submission endpoint");
                DEFAULT_API_URL.to_string()
            }
        };

        Url::parse(&api_url).map_err(|err| ConfigError::InvalidApiUrl {
            url: api_url.clone(),
            reason: err.to_string(),
        })?;
        debug!("Submission endpoint: {}", api_url);

        Ok(Self { api_url })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
