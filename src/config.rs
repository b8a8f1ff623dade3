use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::utils::jwt::DEFAULT_TOKEN_TTL_SECS;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Process configuration, read once at startup.
///
/// | Env Var            | Default     |
/// |--------------------|-------------|
/// | `DATABASE_URL`     | required    |
/// | `SECRET_KEY`       | required    |
/// | `HOST`             | `0.0.0.0`   |
/// | `PORT`             | `3000`      |
/// | `PUBLIC_DIR`       | `public`    |
/// | `MEDIA_BASE_URL`   | unset       |
/// | `COOKIE_SECURE`    | `true`      |
/// | `MAX_UPLOAD_BYTES` | 500 MiB     |
/// | `TOKEN_TTL_SECS`   | `3600`      |
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub secret_key: String,
    pub public_dir: PathBuf,
    pub media_base_url: Option<String>,
    pub cookie_secure: bool,
    pub max_upload_bytes: usize,
    pub token_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let secret_key = get("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let public_dir = get("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

        let media_base_url = match get("MEDIA_BASE_URL") {
            Some(raw) => {
                let parsed = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                    key: "MEDIA_BASE_URL",
                    reason: e.to_string(),
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(ConfigError::Invalid {
                        key: "MEDIA_BASE_URL",
                        reason: format!("unsupported scheme {}", parsed.scheme()),
                    });
                }
                Some(raw)
            }
            None => None,
        };

        let cookie_secure = parse_or("COOKIE_SECURE", get("COOKIE_SECURE"), true)?;
        let max_upload_bytes = parse_or(
            "MAX_UPLOAD_BYTES",
            get("MAX_UPLOAD_BYTES"),
            DEFAULT_MAX_UPLOAD_BYTES,
        )?;
        let token_ttl_secs = parse_or("TOKEN_TTL_SECS", get("TOKEN_TTL_SECS"), DEFAULT_TOKEN_TTL_SECS)?;
        if token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_SECS",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            database_url,
            secret_key,
            public_dir,
            media_base_url,
            cookie_secure,
            max_upload_bytes,
            token_ttl_secs,
        })
    }
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
