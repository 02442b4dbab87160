//! Parameters in, signed levitation force out.

use maglev_common::{levitation_force, ArrowSet, ModelFeatures, ParameterSet};
use serde::Serialize;
use tracing::debug;

use crate::scaler::FeatureScaler;
use crate::store::ModelStore;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub parameters: ParameterSet,
    /// Raw regressor output before the moment product is applied
    pub model_output: f32,
    pub force: f32,
    pub arrows: ArrowSet,
}

#[derive(Debug)]
pub struct ForcePredictor {
    scaler: FeatureScaler,
    store: ModelStore,
}

impl ForcePredictor {
    pub fn new(scaler: FeatureScaler, store: ModelStore) -> Self {
        Self { scaler, store }
    }

    /// Blocking; call from `spawn_blocking` inside async handlers.
    pub fn predict(&self, params: &ParameterSet) -> Result<Prediction> {
        let features = ModelFeatures::from_parameters(params);
        let scaled = self.scaler.transform(&features);
        let model = self.store.acquire()?;
        let model_output = model.predict(&scaled)?;

        let force = levitation_force(params.j, params.j1, model_output);
        debug!(?params, model_output, force, "Predicted levitation force");

        Ok(Prediction {
            parameters: *params,
            model_output,
            force,
            arrows: ArrowSet::from_signs(params.j, params.j1, force),
        })
    }
}
