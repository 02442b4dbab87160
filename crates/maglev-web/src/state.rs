//! Shared application state for the web server.

use std::sync::Arc;

use maglev_common::{AppConfig, AssetConfig};
use maglev_model::regressor::describe;
use maglev_model::{FeatureScaler, ForcePredictor, ModelStore, SafetensorsLoader};
use tracing::{info, warn};

use crate::templates::Templates;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub predictor: Arc<ForcePredictor>,
    pub templates: Templates,
    pub assets: AssetConfig,
    /// Include error details in 500 responses
    pub debug: bool,
}

impl AppState {
    pub fn new(
        predictor: ForcePredictor,
        assets: AssetConfig,
        debug: bool,
    ) -> Result<Self, minijinja::Error> {
        Ok(Self {
            predictor: Arc::new(predictor),
            templates: Templates::new()?,
            assets,
            debug,
        })
    }

    /// Load the scaler and model artifacts named in the config.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let artifacts = &config.artifacts;
        let scaler = FeatureScaler::from_file(&artifacts.scaler_path)?;

        if let Err(e) = describe(&artifacts.model_dir) {
            warn!("Could not read model architecture: {e}");
        }
        let store = ModelStore::new(
            Box::new(SafetensorsLoader::new(&artifacts.model_dir)),
            artifacts.load_policy,
        )?;
        info!("Model load policy: {}", store.policy());

        let predictor = ForcePredictor::new(scaler, store);
        Ok(Self::new(predictor, config.assets.clone(), config.server.debug)?)
    }
}

pub type SharedState = Arc<AppState>;
