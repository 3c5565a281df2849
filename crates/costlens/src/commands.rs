//! Subcommand implementations
//!
//! Each command loads its inputs, runs the analysis and returns the
//! rendered report. Printing is left to the caller.

use std::path::Path;

use color_eyre::eyre::{Context, eyre};
use costlens_core::model::RecordField;
use costlens_core::stats::SeriesSummary;
use costlens_core::{
    ParameterSet, correlate_fields, detect_cost_outliers, generate_sensitivity_analysis,
    perform_what_if_analysis, predict_cost_with_confidence, validate,
};

use crate::config::AppConfig;
use crate::input::{load_prediction_input, load_records};
use crate::predictor::RateTablePredictor;
use crate::render::{CostOutliers, OutputFormat, render};

/// Parse `name=v1,v2,...` into a parameter set
pub fn parse_parameter_set(raw: &str) -> color_eyre::Result<ParameterSet> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| eyre!("expected NAME=VALUE[,VALUE...], got '{raw}'"))?;
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty());
    Ok(ParameterSet::new(name.trim(), values))
}

fn parse_fields(names: &[String]) -> color_eyre::Result<Vec<RecordField>> {
    Ok(names
        .iter()
        .map(|name| name.trim().parse())
        .collect::<Result<Vec<RecordField>, _>>()?)
}

pub fn quality(
    records: &Path,
    fields: &[String],
    format: OutputFormat,
) -> color_eyre::Result<String> {
    let fields = if fields.is_empty() {
        RecordField::ALL.to_vec()
    } else {
        parse_fields(fields)?
    };
    let records = load_records(records)?;
    let report = validate(&records, &fields);
    tracing::info!(
        completeness = report.completeness_score,
        missing = report.missing_fields.len(),
        "quality check finished"
    );
    render(format, &report)
}

pub fn correlate(
    records: &Path,
    x: &str,
    y: &str,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    let x: RecordField = x.parse()?;
    let y: RecordField = y.parse()?;
    let records = load_records(records)?;
    let result = correlate_fields(&records, x, y)?;
    tracing::info!(%x, %y, coefficient = result.coefficient, "correlation finished");
    render(format, &result)
}

pub fn outliers(
    records: &Path,
    threshold: Option<f64>,
    config: &AppConfig,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    let threshold = threshold.unwrap_or(config.outlier_threshold);
    let records = load_records(records)?;
    let costs: Vec<f64> = records
        .iter()
        .filter_map(|r| r.numeric(RecordField::Cost))
        .collect();

    let report = CostOutliers {
        threshold,
        summary: SeriesSummary::from_values(&costs),
        outliers: detect_cost_outliers(&records, Some(threshold))?,
    };
    tracing::info!(
        threshold,
        outliers = report.outliers.len(),
        "outlier detection finished"
    );
    render(format, &report)
}

pub fn predict(input: &Path, config: &AppConfig, format: OutputFormat) -> color_eyre::Result<String> {
    let input = load_prediction_input(input)?;
    let predictor = RateTablePredictor::new(config.predictor.clone());
    let prediction = predict_cost_with_confidence(&input, &predictor)
        .wrap_err("prediction failed")?;
    render(format, &prediction)
}

pub fn what_if(
    input: &Path,
    params: &[String],
    config: &AppConfig,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    let sets = params
        .iter()
        .map(|raw| parse_parameter_set(raw))
        .collect::<color_eyre::Result<Vec<_>>>()?;
    let input = load_prediction_input(input)?;
    let predictor = RateTablePredictor::new(config.predictor.clone());

    let report = perform_what_if_analysis(&input, &sets, &predictor)
        .wrap_err("what-if analysis failed")?;
    tracing::info!(
        parameters = sets.len(),
        variations = report.variations.len(),
        "what-if analysis finished"
    );
    render(format, &report)
}

pub fn sensitivity(
    input: &Path,
    config: &AppConfig,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    let input = load_prediction_input(input)?;
    let predictor = RateTablePredictor::new(config.predictor.clone());

    let ranking = generate_sensitivity_analysis(&input, &predictor, &config.sensitivity)
        .wrap_err("sensitivity analysis failed")?;
    if let Some(top) = ranking.first() {
        tracing::info!(parameter = %top.parameter, score = top.sensitivity, "most sensitive parameter");
    }
    render(format, ranking.as_slice())
}
