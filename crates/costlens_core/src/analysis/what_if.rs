//! What-if scenario runs and whole-input sensitivity ranking

use crate::error::Result;
use crate::model::{Parameter, PredictionInput, SensitivityEntry, WhatIfReport};
use crate::predictor::{CostPredictor, predict_cost_with_confidence};

use super::config::{ParameterSet, SensitivityConfig};
use super::sensitivity::analyze_against;

/// Run every parameter set against a single shared baseline.
///
/// All sets are resolved before the predictor is called, so an unknown
/// parameter or a bad value fails the whole request up front. Variations are
/// flattened in request order.
pub fn perform_what_if_analysis<P>(
    base_input: &PredictionInput,
    parameter_sets: &[ParameterSet],
    predictor: &P,
) -> Result<WhatIfReport>
where
    P: CostPredictor + ?Sized,
{
    let resolved = parameter_sets
        .iter()
        .map(ParameterSet::resolve)
        .collect::<Result<Vec<_>>>()?;

    let baseline = predict_cost_with_confidence(base_input, predictor)?;

    let mut variations = Vec::new();
    let mut sensitivities = Vec::with_capacity(resolved.len());
    for (parameter, candidates) in &resolved {
        let sweep = analyze_against(base_input, &baseline, *parameter, candidates, predictor)?;
        variations.extend(sweep.variations);
        sensitivities.push(sweep.entry);
    }

    tracing::debug!(
        sets = resolved.len(),
        variations = variations.len(),
        baseline_cost = baseline.cost,
        "what-if analysis complete"
    );

    Ok(WhatIfReport {
        baseline,
        variations,
        sensitivities,
    })
}

/// Sweep every input dimension over its configured candidates and rank the
/// dimensions by sensitivity, highest first.
///
/// Ties keep dimension order, so the output is fully deterministic for a
/// deterministic predictor.
pub fn generate_sensitivity_analysis<P>(
    input: &PredictionInput,
    predictor: &P,
    config: &SensitivityConfig,
) -> Result<Vec<SensitivityEntry>>
where
    P: CostPredictor + ?Sized,
{
    let baseline = predict_cost_with_confidence(input, predictor)?;

    let mut entries = Parameter::ALL
        .into_iter()
        .map(|parameter| {
            let candidates = config.candidates(input, parameter)?;
            analyze_against(input, &baseline, parameter, &candidates, predictor)
                .map(|sweep| sweep.entry)
        })
        .collect::<Result<Vec<_>>>()?;

    entries.sort_by(|a, b| b.sensitivity.total_cmp(&a.sensitivity));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalyticsError, PredictorError};
    use crate::model::{BaseEstimate, Complexity, ParameterValue, Quality};

    fn input() -> PredictionInput {
        PredictionInput {
            building_type: "commercial".to_string(),
            region: "Midwest".to_string(),
            square_footage: 2_000.0,
            quality: Quality::Standard,
            complexity: Complexity::Simple,
        }
    }

    fn linear_stub(input: &PredictionInput) -> std::result::Result<BaseEstimate, PredictorError> {
        let quality = match input.quality {
            Quality::Economy => 0.8,
            Quality::Standard => 1.0,
            Quality::Premium => 1.25,
            Quality::Luxury => 1.6,
        };
        let complexity = match input.complexity {
            Complexity::Simple => 1.0,
            Complexity::Moderate => 1.1,
            Complexity::Complex => 1.2,
        };
        let rate = 100.0 * quality * complexity;
        Ok(BaseEstimate {
            cost: rate * input.square_footage,
            cost_per_sq_ft: rate,
            confidence: 0.75,
            error_margin: 0.2,
        })
    }

    #[test]
    fn test_multiple_sets_flattened() {
        let sets = [
            ParameterSet::new("complexity", ["moderate", "complex"]),
            ParameterSet::new("squareFootage", ["1000", "4000"]),
        ];
        let report = perform_what_if_analysis(&input(), &sets, &linear_stub).unwrap();

        assert_eq!(report.variations.len(), 4);
        assert_eq!(report.sensitivities.len(), 2);
        assert_eq!(
            report.variations[2].parameter_value,
            ParameterValue::SquareFootage(1000.0)
        );
        assert_eq!(report.variations[2].percent_change, -50.0);
        assert_eq!(report.variations[3].percent_change, 100.0);
        assert_eq!(report.sensitivities[1].parameter, Parameter::SquareFootage);
    }

    #[test]
    fn test_unknown_parameter_fails_before_predicting() {
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let counting = |input: &PredictionInput| {
            calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            linear_stub(input)
        };
        let sets = [
            ParameterSet::new("quality", ["luxury"]),
            ParameterSet::new("roofType", ["flat"]),
        ];

        let err = perform_what_if_analysis(&input(), &sets, &counting).unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownParameter(ref name) if name == "roofType"));
        assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[test]
    fn test_ranking_orders_by_sensitivity() {
        let entries =
            generate_sensitivity_analysis(&input(), &linear_stub, &SensitivityConfig::default())
                .unwrap();

        assert_eq!(entries.len(), Parameter::ALL.len());
        assert_eq!(entries[0].parameter, Parameter::SquareFootage);
        assert_eq!(entries[1].parameter, Parameter::Quality);
        assert!(
            entries
                .windows(2)
                .all(|w| w[0].sensitivity >= w[1].sensitivity)
        );
        // Building type and region do not move the stub's cost
        assert_eq!(entries[3].parameter, Parameter::BuildingType);
        assert_eq!(entries[4].parameter, Parameter::Region);
        assert_eq!(entries[4].sensitivity, 0.0);
    }
}
