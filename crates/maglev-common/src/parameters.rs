//! Physical parameters of the levitated cylinder pair.
//!
//! The form submits seven values; the model consumes five of them in the
//! order it was trained on. Both shapes are named structs so the mapping
//! between them is written out once in [`ModelFeatures::from_parameters`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;

/// Number of inputs the trained model expects.
pub const FEATURE_DIM: usize = 5;

/// The seven user-supplied quantities, keyed by their form field names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Magnetic moment of the upper cylinder
    #[serde(rename = "J")]
    pub j: f32,

    /// Radius of the upper cylinder
    #[serde(rename = "R")]
    pub r: f32,

    /// Height of the upper cylinder
    pub h: f32,

    /// Magnetic moment of the lower cylinder
    #[serde(rename = "J_1")]
    pub j1: f32,

    /// Radius of the lower cylinder
    #[serde(rename = "R_1")]
    pub r1: f32,

    /// Height of the lower cylinder
    #[serde(rename = "h_1")]
    pub h1: f32,

    /// Separation / alignment ratio
    pub xi: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            j: 1.0,
            r: 10.0,
            h: 10.0,
            j1: -1.0,
            r1: 10.0,
            h1: 10.0,
            xi: 10.0,
        }
    }
}

impl ParameterSet {
    /// Form field names in the order the page lays them out.
    pub const FIELDS: [&'static str; 7] = ["J", "R", "h", "J_1", "R_1", "h_1", "xi"];

    /// Parse the submitted form. Every field is required; extra keys are ignored.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, ParameterError> {
        let field = |name: &'static str| -> Result<f32, ParameterError> {
            let raw = form.get(name).ok_or(ParameterError::MissingField(name))?;
            parse_value(name, raw)
        };

        Ok(Self {
            j: field("J")?,
            r: field("R")?,
            h: field("h")?,
            j1: field("J_1")?,
            r1: field("R_1")?,
            h1: field("h_1")?,
            xi: field("xi")?,
        })
    }
}

fn parse_value(field: &'static str, raw: &str) -> Result<f32, ParameterError> {
    raw.trim()
        .parse::<f32>()
        .map_err(|_| ParameterError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Model inputs in training order: lower cylinder radius and height, upper
/// cylinder radius and height, then the separation ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelFeatures {
    pub r1: f32,
    pub h1: f32,
    pub r: f32,
    pub h: f32,
    pub xi: f32,
}

impl ModelFeatures {
    pub fn from_parameters(params: &ParameterSet) -> Self {
        Self {
            r1: params.r1,
            h1: params.h1,
            r: params.r,
            h: params.h,
            xi: params.xi,
        }
    }

    pub fn to_array(&self) -> [f32; FEATURE_DIM] {
        [self.r1, self.h1, self.r, self.h, self.xi]
    }
}

impl From<&ParameterSet> for ModelFeatures {
    fn from(params: &ParameterSet) -> Self {
        Self::from_parameters(params)
    }
}
