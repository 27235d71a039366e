use crate::constants::*;
use std::env;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub data_path: String,
    pub session_secret: String,
    /// Origin used when building share links for the debt page.
    pub public_base_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET environment variable is required")]
    MissingSessionSecret,

    #[error("Invalid session secret: {0}")]
    InvalidSessionSecret(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = var_or("SERVER_HOST", DEFAULT_HOST);
        let port = var_or("SERVER_PORT", DEFAULT_PORT);
        let data_path = var_or("DATABASE_PATH", DEFAULT_DATA_PATH);
        let public_base_url = var_or("PUBLIC_BASE_URL", DEFAULT_PUBLIC_BASE_URL);

        let session_secret =
            env::var("SESSION_SECRET").map_err(|_| ConfigError::MissingSessionSecret)?;

        Self::new(host, port, data_path, session_secret, public_base_url)
    }

    pub fn new(
        host: impl Into<String>,
        port: impl Into<String>,
        data_path: impl Into<String>,
        session_secret: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let port = port.into();
        if port.parse::<u16>().is_err() {
            return Err(ConfigError::InvalidPort(port));
        }

        let session_secret = session_secret.into();
        if session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            return Err(ConfigError::InvalidSessionSecret(format!(
                "must be at least {} bytes long",
                MIN_SESSION_SECRET_LENGTH
            )));
        }

        Ok(Config {
            host: host.into(),
            port,
            data_path: data_path.into(),
            session_secret,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
