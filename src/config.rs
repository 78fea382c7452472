//! Configuration loading for the report server.
//!
//! Values come from (highest precedence first) `CRASH_REPORTER_`-prefixed
//! environment variables, a TOML file, and the defaults below.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::parties::MAX_PARTIES;
use crate::store::images::DEFAULT_MAX_IMAGE_BYTES;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "crash_reporter.toml";

const ENV_PREFIX: &str = "CRASH_REPORTER_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub form: FormConfig,
    pub remote: RemoteConfig,
    pub geocoding: GeocodingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub max_workers: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Reports live only as long as the process.
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_path: PathBuf,
    pub schema_path: PathBuf,
    /// Upper bound on photo bytes kept in memory.
    pub max_image_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Party count a fresh form starts with.
    pub default_party_count: u32,
}

/// Optional forwarding of accepted reports to an accident backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub enabled: bool,
    /// Reports are posted here; images go to `{base_url}/uploadimages`.
    pub base_url: String,
    pub daylight: String,
    pub event_data: String,
    /// Sent as `accidentId` on every party record.
    pub party_accident_id: String,
    /// No timeout when unset.
    pub timeout_secs: Option<u64>,
    /// The stock backend runs on a self-signed localhost certificate.
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// Geocoding is unavailable while this is empty.
    pub api_key: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
            max_workers: 8,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            database_path: PathBuf::from("crash_reporter.sqlite3"),
            schema_path: PathBuf::from("sql/schema.sql"),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_party_count: 2,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://localhost:44324/api/accidents".to_string(),
            daylight: "day".to_string(),
            event_data: "string".to_string(),
            party_accident_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_string(),
            timeout_secs: None,
            accept_invalid_certs: true,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "crash_reporter=info".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] when `None`.
    /// A missing file is not an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Validation { message });

        if self.server.address.parse::<SocketAddr>().is_err() {
            return invalid(format!(
                "server.address {:?} is not a socket address",
                self.server.address
            ));
        }
        if self.server.max_workers == 0 {
            return invalid("server.max_workers must be greater than 0".to_string());
        }
        if self.form.default_party_count == 0 || self.form.default_party_count > MAX_PARTIES {
            return invalid(format!(
                "form.default_party_count must be between 1 and {MAX_PARTIES}"
            ));
        }
        if self.storage.max_image_bytes == 0 {
            return invalid("storage.max_image_bytes must be greater than 0".to_string());
        }
        if self.remote.enabled {
            if let Err(e) = url::Url::parse(&self.remote.base_url) {
                return invalid(format!("remote.base_url: {e}"));
            }
        }
        if let Err(e) = url::Url::parse(&self.geocoding.endpoint) {
            return invalid(format!("geocoding.endpoint: {e}"));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .address
            .parse()
            .map_err(|e| ConfigError::Validation {
                message: format!("server.address: {e}"),
            })
    }
}
