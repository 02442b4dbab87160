//! Dense feed-forward regressor using Candle.

use std::path::Path;
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use maglev_common::FEATURE_DIM;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::scaler::ScaledFeatures;
use crate::{ModelError, Result};

/// A trained model mapping scaled features to a single output.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &ScaledFeatures) -> Result<f32>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Relu,
    Tanh,
    Sigmoid,
    Gelu,
    Linear,
}

impl Activation {
    fn apply(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        match self {
            Activation::Relu => xs.relu(),
            Activation::Tanh => xs.tanh(),
            Activation::Sigmoid => candle_nn::ops::sigmoid(xs),
            Activation::Gelu => xs.gelu(),
            Activation::Linear => Ok(xs.clone()),
        }
    }
}

/// Architecture description stored next to the weights as `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpConfig {
    #[serde(default = "default_input_dim")]
    pub input_dim: usize,

    /// Widths of the hidden layers, input side first
    #[serde(default)]
    pub hidden_layers: Vec<usize>,

    /// Activation after every hidden layer
    #[serde(default)]
    pub activation: Activation,

    /// Activation on the single output unit
    #[serde(default = "default_output_activation")]
    pub output_activation: Activation,
}

fn default_input_dim() -> usize { FEATURE_DIM }
fn default_output_activation() -> Activation { Activation::Linear }

impl MlpConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ModelError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        let config: MlpConfig = serde_json::from_str(&content)?;
        if config.input_dim != FEATURE_DIM {
            return Err(ModelError::Dimension {
                expected: FEATURE_DIM,
                actual: config.input_dim,
            });
        }
        if config.hidden_layers.contains(&0) {
            return Err(ModelError::ModelLoad("hidden layer of width 0".into()));
        }
        Ok(config)
    }

    /// (in, out) of every linear layer including the output layer.
    fn layer_dims(&self) -> Vec<(usize, usize)> {
        let mut dims = Vec::with_capacity(self.hidden_layers.len() + 1);
        let mut prev = self.input_dim;
        for &width in &self.hidden_layers {
            dims.push((prev, width));
            prev = width;
        }
        dims.push((prev, 1));
        dims
    }
}

/// Weights are `layers.{i}.weight` of shape (out, in) and `layers.{i}.bias`.
pub struct MlpRegressor {
    layers: Vec<Linear>,
    activation: Activation,
    output_activation: Activation,
    device: Device,
}

impl MlpRegressor {
    pub fn new(config: &MlpConfig, vb: VarBuilder) -> Result<Self> {
        let layers = config
            .layer_dims()
            .into_iter()
            .enumerate()
            .map(|(i, (d_in, d_out))| candle_nn::linear(d_in, d_out, vb.pp(format!("layers.{}", i))))
            .collect::<candle_core::Result<Vec<_>>>()
            .map_err(|e| ModelError::ModelLoad(e.to_string()))?;

        Ok(Self {
            layers,
            activation: config.activation,
            output_activation: config.output_activation,
            device: vb.device().clone(),
        })
    }

    /// Load `config.json` and `model.safetensors` from a model directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let start = Instant::now();
        let config = MlpConfig::from_file(&dir.join("config.json"))?;
        let weights = dir.join("model.safetensors");
        if !weights.exists() {
            return Err(ModelError::ModelLoad(format!("{} not found", weights.display())));
        }

        let device = Device::Cpu;
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[&weights], DType::F32, &device) }
            .map_err(|e| ModelError::ModelLoad(format!("{}: {}", weights.display(), e)))?;
        let model = Self::new(&config, vb)?;
        debug!(
            "Loaded regressor {:?} from {} in {:.1}ms",
            config.hidden_layers,
            dir.display(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(model)
    }

    fn forward(&self, xs: &Tensor) -> candle_core::Result<Tensor> {
        let last = self.layers.len() - 1;
        let mut xs = xs.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            xs = layer.forward(&xs)?;
            xs = if i == last {
                self.output_activation.apply(&xs)?
            } else {
                self.activation.apply(&xs)?
            };
        }
        Ok(xs)
    }
}

impl Regressor for MlpRegressor {
    fn predict(&self, features: &ScaledFeatures) -> Result<f32> {
        let input = Tensor::from_slice(features.as_slice(), (1, FEATURE_DIM), &self.device)?;
        let output = self.forward(&input)?;
        let value = output.flatten_all()?.to_vec1::<f32>()?;
        value.first().copied().ok_or_else(|| {
            ModelError::Inference("model produced no output".into())
        })
    }
}

impl std::fmt::Debug for MlpRegressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlpRegressor")
            .field("layers", &self.layers.len())
            .field("activation", &self.activation)
            .finish()
    }
}

/// Log line for startup: layer widths of a model directory.
pub fn describe(dir: &Path) -> Result<String> {
    let config = MlpConfig::from_file(&dir.join("config.json"))?;
    let widths: Vec<String> = config
        .layer_dims()
        .iter()
        .map(|(_, out)| out.to_string())
        .collect();
    let summary = format!("{} -> {}", config.input_dim, widths.join(" -> "));
    info!("Model architecture: {}", summary);
    Ok(summary)
}
