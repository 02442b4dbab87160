//! maglev-model — Scaling and inference for the levitation force predictor.
//!
//! The trained network is a small dense regressor exported as safetensors and
//! evaluated on the CPU with Candle. Inputs pass through a pre-fitted scaler
//! first; the regressor only accepts [`ScaledFeatures`], which only the scaler
//! can produce.
//!
//! # Example
//! ```no_run
//! use maglev_common::{LoadPolicy, ParameterSet};
//! use maglev_model::{FeatureScaler, ForcePredictor, ModelStore, SafetensorsLoader};
//!
//! fn main() -> maglev_model::Result<()> {
//!     let scaler = FeatureScaler::from_file("scaler_ran.json")?;
//!     let store = ModelStore::new(
//!         Box::new(SafetensorsLoader::new("trained_model_with_random")),
//!         LoadPolicy::Cached,
//!     )?;
//!     let predictor = ForcePredictor::new(scaler, store);
//!     let prediction = predictor.predict(&ParameterSet::default())?;
//!     println!("F = {}", prediction.force);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod predictor;
pub mod regressor;
pub mod scaler;
pub mod store;

pub use error::{ModelError, Result};
pub use predictor::{ForcePredictor, Prediction};
pub use regressor::{Activation, MlpConfig, MlpRegressor, Regressor};
pub use scaler::{FeatureScaler, ScaledFeatures};
pub use store::{ModelLoader, ModelStore, SafetensorsLoader};
