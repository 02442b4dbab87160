//! maglev-web — Web form for the levitation force predictor.
//! Provides:
//!   - Parameter entry form with illustrative defaults
//!   - Prediction endpoint re-rendering the form with the computed force
//!   - Static figure and arrow images

pub mod cli;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;
