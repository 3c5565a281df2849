//! The injected cost predictor and confidence-wrapped predictions
//!
//! The core never produces base estimates itself. Callers supply anything
//! implementing [`CostPredictor`]: an ML client, a heuristic table, or a
//! closure stub in tests.

use crate::confidence::estimate_from;
use crate::error::{PredictorError, Result};
use crate::model::{BaseEstimate, PredictionInput, PredictionResult};

/// Source of point estimates for a building configuration.
///
/// Implementations must be `Sync` because candidate evaluations may run on a
/// thread pool.
pub trait CostPredictor: Sync {
    fn predict(&self, input: &PredictionInput) -> std::result::Result<BaseEstimate, PredictorError>;
}

impl<F> CostPredictor for F
where
    F: Fn(&PredictionInput) -> std::result::Result<BaseEstimate, PredictorError> + Sync,
{
    fn predict(&self, input: &PredictionInput) -> std::result::Result<BaseEstimate, PredictorError> {
        self(input)
    }
}

/// Predict with the external predictor and attach confidence bounds.
///
/// Predictor failures are returned unmodified inside `AnalyticsError::Predictor`.
pub fn predict_cost_with_confidence<P>(input: &PredictionInput, predictor: &P) -> Result<PredictionResult>
where
    P: CostPredictor + ?Sized,
{
    let base = predictor.predict(input)?;
    tracing::trace!(
        building_type = %input.building_type,
        region = %input.region,
        cost = base.cost,
        "base estimate"
    );
    estimate_from(&base)
}
