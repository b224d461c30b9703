//! CLI configuration utilities

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tinyyummy_http::ClientConfig;

/// Settings file looked up in the working directory when `--config` is not given
const DEFAULT_CONFIG_NAME: &str = "tinyyummy";

const ENV_PREFIX: &str = "TINYYUMMY";

/// Everything the CLI reads from configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend connection settings
    pub client: ClientConfig,

    /// Where the durable session and logs are kept
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load defaults, then the config file, then `TINYYUMMY_*` environment variables
    ///
    /// An explicit `path` must exist; the default `tinyyummy.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.client.validate()?;
        Ok(config)
    }
}

/// `TINYYUMMY_CLIENT__BASE_URL` sets `client.base_url`
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Resolve the data directory: flag, then config, then env, then the system default
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    flag.or_else(|| config.data_dir.clone())
        .unwrap_or_else(default_data_dir)
}

fn default_data_dir() -> PathBuf {
    // Check environment variable first, then fall back to system data dir
    if let Ok(dir) = std::env::var("TINYYUMMY_STATE_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tinyyummy")
    }
}
