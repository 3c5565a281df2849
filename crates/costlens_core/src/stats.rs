//! Descriptive statistics shared by the correlation and outlier engines

use serde::{Deserialize, Serialize};

/// Arithmetic mean, or `None` for an empty slice
#[inline]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Largest `|v - mean|`, used to scale deviations before they are squared
pub(crate) fn max_abs_deviation(values: &[f64], mean: f64) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max((v - mean).abs()))
}

/// Population standard deviation (divides by n), or `None` for an empty slice.
///
/// Deviations are scaled by the largest one before squaring so the result
/// stays finite for any finite input.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let scale = max_abs_deviation(values, mean);
    if scale == 0.0 {
        return Some(0.0);
    }
    let variance = values
        .iter()
        .map(|v| ((v - mean) / scale).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    Some(scale * variance.sqrt())
}

/// Summary of a numeric series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesSummary {
    /// Summarize `values`; `None` when empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let std_dev = population_std_dev(values)?;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Some(Self {
            count: values.len(),
            mean,
            std_dev,
            min,
            max,
        })
    }
}
