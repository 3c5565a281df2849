//! Result value objects returned by the analytics routines
//!
//! All of these are built fresh per call and never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::prediction::{Parameter, ParameterValue, PredictionResult};
use super::records::RecordField;

/// A required field missing from one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingField {
    /// Position of the record in the input slice
    pub record_index: usize,
    /// The record's own id, when it has one
    pub record_id: Option<String>,
    pub field: RecordField,
}

/// Completeness of a record set against a required-field schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    /// Fraction of required (record, field) pairs present, in [0, 1]
    pub completeness_score: f64,
    pub is_complete: bool,
    pub missing_fields: Vec<MissingField>,
}

/// Pearson correlation plus a renderable trendline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    /// Pearson coefficient in [-1, 1]
    pub coefficient: f64,
    pub scatter_pairs: Vec<(f64, f64)>,
    /// Two endpoints at min(x) and max(x), or empty when the signal is too weak
    pub trendline: Vec<(f64, f64)>,
    pub slope: f64,
    pub intercept: f64,
}

/// Z-score outlier analysis of a numeric series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierReport {
    pub values: Vec<f64>,
    pub z_scores: Vec<f64>,
    pub threshold: f64,
    /// Outlying values in original order
    pub outliers: Vec<f64>,
    /// Positions of `outliers` in `values`, parallel to `outliers`
    pub outlier_indices: Vec<usize>,
}

/// An outlying record, located by position rather than by value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutlier {
    pub record_index: usize,
    pub record_id: Option<String>,
    pub value: f64,
    pub z_score: f64,
}

/// How strongly predictions respond to one parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityEntry {
    pub parameter: Parameter,
    /// Normalized spread of percent change, in [0, 1]
    pub sensitivity: f64,
    pub description: String,
}

/// One candidate substitution and its outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfVariation {
    pub parameter_value: ParameterValue,
    pub prediction: PredictionResult,
    /// Percent change of cost against the baseline prediction
    pub percent_change: f64,
}

/// Variations of one parameter against a baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivitySweep {
    pub baseline: PredictionResult,
    pub variations: Vec<WhatIfVariation>,
    pub entry: SensitivityEntry,
}

/// Comparison report over one or more parameter sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfReport {
    pub baseline: PredictionResult,
    /// Variations of every parameter set, flattened in request order
    pub variations: Vec<WhatIfVariation>,
    /// One entry per parameter set, in request order
    pub sensitivities: Vec<SensitivityEntry>,
}
