//! What-if and sensitivity analysis over an injected cost predictor.
//!
//! # Single-parameter sweeps
//!
//! [`analyze`] varies one dimension of a [`PredictionInput`](crate::model::PredictionInput)
//! across typed candidate values and reports each variant's percent change
//! against the baseline prediction:
//!
//! ```ignore
//! use costlens_core::analysis::analyze;
//! use costlens_core::model::{Parameter, ParameterValue, Quality};
//!
//! let candidates = Quality::ALL.map(ParameterValue::Quality);
//! let sweep = analyze(&input, Parameter::Quality, &candidates, &predictor)?;
//! println!("{}", sweep.entry.description);
//! ```
//!
//! # What-if requests
//!
//! [`perform_what_if_analysis`] takes raw `{parameter, values}` sets as they
//! arrive from a request, resolves them, and runs every set against one
//! shared baseline:
//!
//! ```ignore
//! use costlens_core::analysis::{ParameterSet, perform_what_if_analysis};
//!
//! let sets = [ParameterSet::new("quality", ["economy", "standard", "premium", "luxury"])];
//! let report = perform_what_if_analysis(&input, &sets, &predictor)?;
//! ```
//!
//! # Ranking
//!
//! [`generate_sensitivity_analysis`] sweeps all five dimensions over the
//! candidates in [`SensitivityConfig`] and ranks them by sensitivity.
//!
//! With the `parallel` feature, candidate predictions fan out on rayon's
//! global pool; results always come back in candidate order.

mod config;
mod sensitivity;
mod what_if;

pub use config::*;
pub use sensitivity::{analyze, impact_label, percent_change, sensitivity_score};
pub use what_if::*;
