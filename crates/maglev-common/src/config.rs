//! Configuration loading for maglev.
//! Reads maglev.toml from the current directory or the path given on the
//! command line / in the MAGLEV_CONFIG env var. Every field has a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "maglev.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Verbose logging and error details in 500 responses
    #[serde(default)]
    pub debug: bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 5000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

/// How the trained model is obtained for each prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Reload the artifact from disk on every request
    #[default]
    PerRequest,
    /// Load once at startup and share the instance
    Cached,
}

impl std::fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadPolicy::PerRequest => write!(f, "per_request"),
            LoadPolicy::Cached => write!(f, "cached"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
    #[serde(default)]
    pub load_policy: LoadPolicy,
}

fn default_scaler_path() -> PathBuf { PathBuf::from("scaler_ran.json") }
fn default_model_dir()   -> PathBuf { PathBuf::from("trained_model_with_random") }

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            scaler_path: default_scaler_path(),
            model_dir: default_model_dir(),
            load_policy: LoadPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Image folder, relative to static_dir
    #[serde(default = "default_image_dir")]
    pub image_dir: String,
    #[serde(default = "default_figure")]
    pub figure: String,
    #[serde(default = "default_plus_arrow")]
    pub plus_arrow: String,
    #[serde(default = "default_minus_arrow")]
    pub minus_arrow: String,
}

fn default_static_dir()  -> PathBuf { PathBuf::from("static") }
fn default_image_dir()   -> String  { "images".to_string() }
fn default_figure()      -> String  { "levitated_cylinders.svg".to_string() }
fn default_plus_arrow()  -> String  { "plus_arrow.svg".to_string() }
fn default_minus_arrow() -> String  { "minus_arrow.svg".to_string() }

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            image_dir: default_image_dir(),
            figure: default_figure(),
            plus_arrow: default_plus_arrow(),
            minus_arrow: default_minus_arrow(),
        }
    }
}

impl AssetConfig {
    /// URL of an image under the /static mount.
    pub fn image_url(&self, file: &str) -> String {
        let dir = self.image_dir.trim_matches('/');
        if dir.is_empty() {
            format!("/static/{}", file)
        } else {
            format!("/static/{}/{}", dir, file)
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from MAGLEV_CONFIG / maglev.toml when `None`.
    /// Only a missing default maglev.toml falls back to defaults; a named
    /// file must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match std::env::var("MAGLEV_CONFIG") {
                Ok(p) => (PathBuf::from(p), true),
                Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::Invalid(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            info!("No {} in working directory, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host is empty".into()));
        }
        if self.artifacts.scaler_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("artifacts.scaler_path is empty".into()));
        }
        if self.artifacts.model_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("artifacts.model_dir is empty".into()));
        }
        Ok(())
    }
}
