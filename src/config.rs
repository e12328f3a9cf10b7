use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::storage::StoreOptions;

const DEFAULT_DATABASE_PATH: &str = "./database.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub pot: PotSection,
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    ///
    /// Environment keys use a double underscore between section and field,
    /// e.g. `CAREPOT_DATABASE__MAX_CONNECTIONS=8`.
    pub fn load() -> Result<Self> {
        let config_path = env::var("CAREPOT_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut builder = config::Config::builder();

        if Path::new(&config_path).exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(&config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CAREPOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Resolve the options used to open the store.
    pub fn database_runtime(&self) -> Result<StoreOptions> {
        self.database.to_runtime()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            permissive_cors: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub path: String,
    pub max_connections: u32,
}

impl DatabaseSection {
    pub fn to_runtime(&self) -> Result<StoreOptions> {
        let path = self.path.trim();
        if path.is_empty() {
            bail!("database.path must be specified");
        }
        if self.max_connections == 0 {
            bail!("database.max_connections must be at least 1");
        }

        Ok(StoreOptions {
            path: PathBuf::from(path),
            max_connections: self.max_connections,
        })
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_PATH.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Behaviour of the current-recipe endpoints.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PotSection {
    /// Reject free-text instructions that match no step instead of storing step 0.
    pub reject_unknown_instructions: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}
