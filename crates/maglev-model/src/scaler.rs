//! Pre-fitted feature scaler.
//!
//! The scaler is fitted in the training environment and exported as JSON:
//!
//! ```json
//! {"kind": "standard", "mean": [..5], "scale": [..5]}
//! {"kind": "min_max",  "min":  [..5], "scale": [..5]}
//! ```

use std::path::Path;

use maglev_common::{ModelFeatures, FEATURE_DIM};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ModelError, Result};

/// Feature vector that has been through the scaler.
///
/// No public constructor: the regressor can only ever see scaled input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFeatures([f32; FEATURE_DIM]);

impl ScaledFeatures {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f32>, scale: Vec<f32> },
    /// `x * scale + min`
    MinMax { min: Vec<f32>, scale: Vec<f32> },
}

impl FeatureScaler {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Scaler(format!("{}: {}", path.display(), e)))?;
        let scaler = Self::from_json(&content)?;
        info!("Loaded {} scaler from {}", scaler.kind(), path.display());
        Ok(scaler)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let scaler: FeatureScaler = serde_json::from_str(content)?;
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FeatureScaler::Standard { .. } => "standard",
            FeatureScaler::MinMax { .. } => "min_max",
        }
    }

    fn validate(&self) -> Result<()> {
        let (name, offset, scale) = match self {
            FeatureScaler::Standard { mean, scale } => ("mean", mean, scale),
            FeatureScaler::MinMax { min, scale } => ("min", min, scale),
        };
        for (label, v) in [(name, offset), ("scale", scale)] {
            if v.len() != FEATURE_DIM {
                return Err(ModelError::Scaler(format!(
                    "{} has {} entries, expected {}",
                    label,
                    v.len(),
                    FEATURE_DIM
                )));
            }
            if v.iter().any(|x| !x.is_finite()) {
                return Err(ModelError::Scaler(format!("{} contains non-finite values", label)));
            }
        }
        Ok(())
    }

    pub fn transform(&self, features: &ModelFeatures) -> ScaledFeatures {
        let mut out = features.to_array();
        match self {
            FeatureScaler::Standard { mean, scale } => {
                for (i, x) in out.iter_mut().enumerate() {
                    // constant features were fitted with zero variance
                    let s = if scale[i] == 0.0 { 1.0 } else { scale[i] };
                    *x = (*x - mean[i]) / s;
                }
            }
            FeatureScaler::MinMax { min, scale } => {
                for (i, x) in out.iter_mut().enumerate() {
                    *x = *x * scale[i] + min[i];
                }
            }
        }
        ScaledFeatures(out)
    }
}
