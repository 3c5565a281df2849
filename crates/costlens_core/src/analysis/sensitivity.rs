//! Single-parameter sensitivity sweeps
//!
//! Each candidate value replaces one dimension of the baseline input, the
//! predictor is called for the variant, and the cost is compared against the
//! baseline prediction.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{AnalyticsError, Result};
use crate::model::{
    Parameter, ParameterValue, PredictionInput, PredictionResult, SensitivityEntry,
    SensitivitySweep, WhatIfVariation,
};
use crate::predictor::{CostPredictor, predict_cost_with_confidence};

/// Percent change of `cost` relative to `baseline_cost`; zero for a zero baseline
#[inline]
#[must_use]
pub fn percent_change(baseline_cost: f64, cost: f64) -> f64 {
    if baseline_cost == 0.0 {
        0.0
    } else {
        (cost - baseline_cost) / baseline_cost * 100.0
    }
}

/// Normalized spread of percent changes: `(max - min) / 100`, clamped to [0, 1]
#[must_use]
pub fn sensitivity_score(percent_changes: &[f64]) -> f64 {
    if percent_changes.len() < 2 {
        return 0.0;
    }
    let (min, max) = percent_changes
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    ((max - min) / 100.0).clamp(0.0, 1.0)
}

/// Coarse impact rating for a sensitivity score
#[must_use]
pub fn impact_label(sensitivity: f64) -> &'static str {
    if sensitivity >= 0.5 {
        "High"
    } else if sensitivity >= 0.2 {
        "Medium"
    } else {
        "Low"
    }
}

/// Predict every candidate variant. Output order matches `candidates`.
fn predict_variants<P>(
    baseline_input: &PredictionInput,
    candidates: &[ParameterValue],
    predictor: &P,
) -> Result<Vec<PredictionResult>>
where
    P: CostPredictor + ?Sized,
{
    #[cfg(feature = "parallel")]
    let predictions = candidates
        .par_iter()
        .map(|value| predict_cost_with_confidence(&baseline_input.with(value), predictor))
        .collect::<Result<Vec<_>>>();

    #[cfg(not(feature = "parallel"))]
    let predictions = candidates
        .iter()
        .map(|value| predict_cost_with_confidence(&baseline_input.with(value), predictor))
        .collect::<Result<Vec<_>>>();

    predictions
}

fn describe(
    parameter: Parameter,
    baseline_input: &PredictionInput,
    variations: &[WhatIfVariation],
    sensitivity: f64,
) -> String {
    let lowest = variations
        .iter()
        .min_by(|a, b| a.percent_change.total_cmp(&b.percent_change));
    let highest = variations
        .iter()
        .max_by(|a, b| a.percent_change.total_cmp(&b.percent_change));

    match (lowest, highest) {
        (Some(lo), Some(hi)) => format!(
            "{} impact: changing {} from {} moves cost between {:+.1}% ({}) and {:+.1}% ({})",
            impact_label(sensitivity),
            parameter.label(),
            baseline_input.value_of(parameter),
            lo.percent_change,
            lo.parameter_value,
            hi.percent_change,
            hi.parameter_value,
        ),
        _ => format!("{}: no candidate values evaluated", parameter.label()),
    }
}

/// Sweep `parameter` across `candidates` against an already computed baseline.
pub(crate) fn analyze_against<P>(
    baseline_input: &PredictionInput,
    baseline: &PredictionResult,
    parameter: Parameter,
    candidates: &[ParameterValue],
    predictor: &P,
) -> Result<SensitivitySweep>
where
    P: CostPredictor + ?Sized,
{
    if let Some(stray) = candidates.iter().find(|v| v.parameter() != parameter) {
        return Err(AnalyticsError::invalid(
            "sensitivity analysis",
            format!(
                "candidate '{stray}' is a {} value, expected {}",
                stray.parameter(),
                parameter
            ),
        ));
    }

    let predictions = predict_variants(baseline_input, candidates, predictor)?;

    let variations: Vec<WhatIfVariation> = candidates
        .iter()
        .zip(predictions)
        .map(|(value, prediction)| WhatIfVariation {
            parameter_value: value.clone(),
            percent_change: percent_change(baseline.cost, prediction.cost),
            prediction,
        })
        .collect();

    let changes: Vec<f64> = variations.iter().map(|v| v.percent_change).collect();
    let sensitivity = sensitivity_score(&changes);

    tracing::debug!(
        parameter = %parameter,
        candidates = candidates.len(),
        sensitivity,
        "sensitivity sweep complete"
    );

    Ok(SensitivitySweep {
        baseline: *baseline,
        entry: SensitivityEntry {
            parameter,
            sensitivity,
            description: describe(parameter, baseline_input, &variations, sensitivity),
        },
        variations,
    })
}

/// Measure how the predicted cost responds to one parameter.
///
/// Every candidate is evaluated with only `parameter` overridden. Candidate
/// evaluations may run concurrently; the returned variations always follow
/// the order of `candidates`.
pub fn analyze<P>(
    baseline_input: &PredictionInput,
    parameter: Parameter,
    candidates: &[ParameterValue],
    predictor: &P,
) -> Result<SensitivitySweep>
where
    P: CostPredictor + ?Sized,
{
    let baseline = predict_cost_with_confidence(baseline_input, predictor)?;
    analyze_against(baseline_input, &baseline, parameter, candidates, predictor)
}
