use chrono::FixedOffset;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::shared::core::clock::{DEFAULT_UTC_OFFSET_HOURS, offset_from_hours};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub directory_seed: PathBuf,
    pub utc_offset: FixedOffset,
}

impl AppConfig {
    /// Loads an optional `.env`, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("PORT") {
            None => 8000,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
        };

        let utc_offset = match lookup("UTC_OFFSET_HOURS") {
            None => offset_from_hours(DEFAULT_UTC_OFFSET_HOURS),
            Some(raw) => raw.trim().parse().ok().and_then(offset_from_hours),
        }
        .ok_or_else(|| ConfigError::Invalid {
            key: "UTC_OFFSET_HOURS",
            value: lookup("UTC_OFFSET_HOURS").unwrap_or_default(),
        })?;

        Ok(Self {
            host: text("HOST", "0.0.0.0"),
            port,
            data_dir: text("DATA_DIR", "./data/attendance").into(),
            export_dir: text("EXPORT_DIR", "./excel_reports").into(),
            directory_seed: text("DIRECTORY_SEED", "./data/directory.json").into(),
            utc_offset,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                key: "HOST",
                value: self.host.clone(),
            })
    }
}
