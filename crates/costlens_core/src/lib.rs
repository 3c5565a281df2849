//! Building-cost analytics library
//!
//! Pure, stateless routines that turn building-cost records and cost
//! predictions into renderable analytics:
//! - Record completeness against a required-field schema
//! - Pearson correlation with a least-squares trendline
//! - Z-score outlier detection
//! - Confidence intervals around a point prediction
//! - Single-parameter sensitivity sweeps and multi-parameter what-if reports
//! - CSV export of any tabular result
//!
//! Nothing here performs I/O. Predictions come from a caller-supplied
//! [`CostPredictor`]:
//!
//! ```ignore
//! use costlens_core::{ParameterSet, perform_what_if_analysis};
//!
//! let sets = [ParameterSet::new("quality", ["economy", "luxury"])];
//! let report = perform_what_if_analysis(&input, &sets, &my_predictor)?;
//! for variation in &report.variations {
//!     println!("{} -> {:+.1}%", variation.parameter_value, variation.percent_change);
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod confidence;
pub mod correlation;
pub mod error;
pub mod export;
pub mod outliers;
pub mod predictor;
pub mod quality;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{
    ParameterSet, SensitivityConfig, analyze, generate_sensitivity_analysis,
    perform_what_if_analysis,
};
pub use confidence::estimate;
pub use correlation::{calculate_correlation, correlate, correlate_fields, describe_correlation};
pub use error::{AnalyticsError, PredictorError, Result};
pub use export::{Tabular, to_csv};
pub use outliers::{DEFAULT_Z_THRESHOLD, detect, detect_cost_outliers, detect_outliers, explain};
pub use predictor::{CostPredictor, predict_cost_with_confidence};
pub use quality::{validate, validate_data_completeness};
