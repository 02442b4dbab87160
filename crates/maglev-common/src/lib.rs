//! maglev-common — Shared types for the levitation force predictor.
//!
//! Holds the named parameter set submitted by the form, the feature vector
//! handed to the model, the force/arrow derivation and the process
//! configuration.

pub mod config;
pub mod error;
pub mod force;
pub mod parameters;

// Re-export commonly used types
pub use config::{AppConfig, ArtifactConfig, AssetConfig, LoadPolicy, ServerConfig};
pub use error::{ConfigError, ParameterError};
pub use force::{levitation_force, round_to, Arrow, ArrowSet};
pub use parameters::{ModelFeatures, ParameterSet, FEATURE_DIM};
