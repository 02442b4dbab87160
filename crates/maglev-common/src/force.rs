//! Signed levitation force and the arrow icons derived from signs.

use serde::Serialize;

/// Direction icon shown next to a signed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrow {
    /// Upward arrow, strictly positive values
    Plus,
    /// Downward arrow, zero, negative or NaN values
    Minus,
}

impl Arrow {
    pub fn for_value(value: f32) -> Self {
        if value > 0.0 {
            Arrow::Plus
        } else {
            Arrow::Minus
        }
    }
}

/// Arrows for the two moments and the resulting force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrowSet {
    pub j: Arrow,
    pub j1: Arrow,
    pub force: Arrow,
}

impl ArrowSet {
    pub fn from_signs(j: f32, j1: f32, force: f32) -> Self {
        Self {
            j: Arrow::for_value(j),
            j1: Arrow::for_value(j1),
            force: Arrow::for_value(force),
        }
    }
}

/// Round to `decimals` places, ties to even, in single precision.
pub fn round_to(value: f32, decimals: u32) -> f32 {
    let factor = 10f32.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// `-J * J_1 * model_output` in f32, rounded to three decimals. Zero is
/// always positive zero so the page never shows `-0`.
pub fn levitation_force(j: f32, j1: f32, model_output: f32) -> f32 {
    let force = round_to(-j * j1 * model_output, 3);
    if force == 0.0 {
        0.0
    } else {
        force
    }
}
