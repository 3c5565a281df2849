//! Uncertainty bounds around a point prediction

use crate::error::{AnalyticsError, Result};
use crate::model::{BaseEstimate, PredictionResult};

fn unit_clamp(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Wrap a point estimate with multiplicative bounds.
///
/// The interval is `(cost * (1 - e), cost * (1 + e))` with the low end floored
/// at zero. `confidence` and `error_margin` are clamped to `[0, 1]`, so the
/// interval always brackets `base_cost`.
pub fn estimate(
    base_cost: f64,
    cost_per_sq_ft: f64,
    confidence: f64,
    error_margin: f64,
) -> Result<PredictionResult> {
    if !base_cost.is_finite() || base_cost < 0.0 {
        return Err(AnalyticsError::invalid(
            "estimate confidence",
            format!("base cost must be a non-negative number, got {base_cost}"),
        ));
    }

    let error = unit_clamp(error_margin);
    let low = (base_cost * (1.0 - error)).max(0.0).min(base_cost);
    let high = (base_cost * (1.0 + error)).max(base_cost);

    Ok(PredictionResult {
        cost: base_cost,
        cost_per_sq_ft,
        confidence: unit_clamp(confidence),
        error,
        confidence_interval: (low, high),
    })
}

/// [`estimate`] over a predictor's raw output
pub fn estimate_from(base: &BaseEstimate) -> Result<PredictionResult> {
    estimate(
        base.cost,
        base.cost_per_sq_ft,
        base.confidence,
        base.error_margin,
    )
}

impl PredictionResult {
    /// Half-width of the interval in currency units
    #[must_use]
    pub fn margin_amount(&self) -> f64 {
        (self.confidence_interval.1 - self.confidence_interval.0) / 2.0
    }
}
