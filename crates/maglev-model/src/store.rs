//! Where the regressor comes from on each request.

use std::path::PathBuf;
use std::sync::Arc;

use maglev_common::LoadPolicy;
use tracing::{debug, info};

use crate::regressor::{MlpRegressor, Regressor};
use crate::Result;

/// Produces a fresh regressor instance from some artifact.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Arc<dyn Regressor>>;

    /// Human-readable artifact location for logs.
    fn source(&self) -> String;
}

/// Loads an [`MlpRegressor`] from a directory on disk.
#[derive(Debug, Clone)]
pub struct SafetensorsLoader {
    dir: PathBuf,
}

impl SafetensorsLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ModelLoader for SafetensorsLoader {
    fn load(&self) -> Result<Arc<dyn Regressor>> {
        Ok(Arc::new(MlpRegressor::load(&self.dir)?))
    }

    fn source(&self) -> String {
        self.dir.display().to_string()
    }
}

/// Hands out regressors according to the configured [`LoadPolicy`].
pub struct ModelStore {
    loader: Box<dyn ModelLoader>,
    policy: LoadPolicy,
    cached: Option<Arc<dyn Regressor>>,
}

impl ModelStore {
    /// With [`LoadPolicy::Cached`] the model is loaded here, so a broken
    /// artifact fails at startup rather than on the first request.
    pub fn new(loader: Box<dyn ModelLoader>, policy: LoadPolicy) -> Result<Self> {
        let cached = match policy {
            LoadPolicy::Cached => {
                let model = loader.load()?;
                info!("Model loaded from {} (cached)", loader.source());
                Some(model)
            }
            LoadPolicy::PerRequest => {
                info!("Model will be reloaded from {} on every request", loader.source());
                None
            }
        };
        Ok(Self { loader, policy, cached })
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    pub fn acquire(&self) -> Result<Arc<dyn Regressor>> {
        match &self.cached {
            Some(model) => Ok(Arc::clone(model)),
            None => {
                debug!("Reloading model from {}", self.loader.source());
                self.loader.load()
            }
        }
    }
}

impl std::fmt::Debug for ModelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelStore")
            .field("source", &self.loader.source())
            .field("policy", &self.policy)
            .finish()
    }
}
