use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use melo_openai::client::AzureOpenAiSettings;
use thiserror::Error;

pub const DEFAULT_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8000));
pub const DEFAULT_MAPPING_PATH: &str = "config/mapping.json";
pub const DEFAULT_PROMPTS_PATH: &str = "config/prompts.yaml";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_JWKS_REFRESH_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the service reads from its environment, resolved once at
/// startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub database_url: String,
    pub kinde_uri: String,
    pub addr: SocketAddr,
    pub mapping_path: PathBuf,
    pub prompts_path: PathBuf,
    pub db_max_connections: u32,
    pub llm_timeout: Duration,
    pub jwks_refresh_cooldown: Duration,
    /// Checked only when a summary actually needs text generation.
    pub openai: AzureOpenAiSettings,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            kinde_uri: required("KINDE_URI")?,
            addr: parsed(get("MELO_ADDR"), "MELO_ADDR", DEFAULT_ADDR)?,
            mapping_path: get("MELO_MAPPING_PATH")
                .unwrap_or_else(|| DEFAULT_MAPPING_PATH.to_string())
                .into(),
            prompts_path: get("MELO_PROMPTS_PATH")
                .unwrap_or_else(|| DEFAULT_PROMPTS_PATH.to_string())
                .into(),
            db_max_connections: parsed(
                get("MELO_DB_MAX_CONNECTIONS"),
                "MELO_DB_MAX_CONNECTIONS",
                DEFAULT_DB_MAX_CONNECTIONS,
            )?,
            llm_timeout: Duration::from_secs(parsed(
                get("MELO_LLM_TIMEOUT_SECS"),
                "MELO_LLM_TIMEOUT_SECS",
                DEFAULT_LLM_TIMEOUT_SECS,
            )?),
            jwks_refresh_cooldown: Duration::from_secs(parsed(
                get("MELO_JWKS_REFRESH_SECS"),
                "MELO_JWKS_REFRESH_SECS",
                DEFAULT_JWKS_REFRESH_SECS,
            )?),
            openai: AzureOpenAiSettings::from_lookup(&lookup),
        })
    }
}

fn parsed<T>(value: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => Ok(v),
            Err(e) => Err(ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value: raw,
            }),
        },
        None => Ok(default),
    }
}
