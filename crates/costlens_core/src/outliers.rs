//! Z-score outlier detection

use crate::error::{AnalyticsError, Result};
use crate::model::{BuildingRecord, OutlierReport, RecordField, RecordOutlier};
use crate::stats::{mean, population_std_dev};

/// Threshold used when the caller does not supply one
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(AnalyticsError::invalid(
            "detect outliers",
            format!("threshold must be a positive number, got {threshold}"),
        ))
    }
}

/// Flag values whose absolute z-score reaches `threshold`.
///
/// Uses the population standard deviation. A constant series has all
/// z-scores at zero and therefore no outliers.
pub fn detect(values: &[f64], threshold: f64) -> Result<OutlierReport> {
    check_threshold(threshold)?;

    let z_scores: Vec<f64> = match (mean(values), population_std_dev(values)) {
        (Some(mean), Some(std_dev)) if std_dev > 0.0 => {
            values.iter().map(|v| (v - mean) / std_dev).collect()
        }
        _ => vec![0.0; values.len()],
    };

    let outlier_indices: Vec<usize> = z_scores
        .iter()
        .enumerate()
        .filter(|(_, z)| z.abs() >= threshold)
        .map(|(i, _)| i)
        .collect();
    let outliers = outlier_indices.iter().map(|&i| values[i]).collect();

    tracing::debug!(
        values = values.len(),
        threshold,
        outliers = outlier_indices.len(),
        "detected outliers"
    );

    Ok(OutlierReport {
        values: values.to_vec(),
        z_scores,
        threshold,
        outliers,
        outlier_indices,
    })
}

/// Detect outliers, falling back to [`DEFAULT_Z_THRESHOLD`]
pub fn detect_outliers(values: &[f64], threshold: Option<f64>) -> Result<OutlierReport> {
    detect(values, threshold.unwrap_or(DEFAULT_Z_THRESHOLD))
}

/// Detect outlying costs and attribute them to their source records by position.
///
/// Records without a cost are left out of the statistics.
pub fn detect_cost_outliers(
    records: &[BuildingRecord],
    threshold: Option<f64>,
) -> Result<Vec<RecordOutlier>> {
    let (positions, costs): (Vec<usize>, Vec<f64>) = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.numeric(RecordField::Cost).map(|cost| (i, cost)))
        .unzip();

    let report = detect_outliers(&costs, threshold)?;

    Ok(report
        .outlier_indices
        .iter()
        .map(|&i| {
            let record_index = positions[i];
            RecordOutlier {
                record_index,
                record_id: records[record_index].id.clone(),
                value: report.values[i],
                z_score: report.z_scores[i],
            }
        })
        .collect())
}

/// Sentence describing an outlier run, e.g. for chart captions
#[must_use]
pub fn explain(outlier_count: usize, threshold: f64) -> String {
    format!(
        "{outlier_count} outlier(s) detected using the Z-score method with a threshold of {threshold}"
    )
}

impl OutlierReport {
    /// Human-readable description of the method used
    #[must_use]
    pub fn explanation(&self) -> String {
        explain(self.outliers.len(), self.threshold)
    }

    #[must_use]
    pub fn has_outliers(&self) -> bool {
        !self.outliers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_spike_flagged() {
        let report = detect(&[10.0, 10.0, 10.0, 10.0, 100.0], 2.0).unwrap();

        assert_eq!(report.outliers, vec![100.0]);
        assert_eq!(report.outlier_indices, vec![4]);
        assert_eq!(report.z_scores[4], 2.0);
        assert_eq!(report.z_scores[0], -0.5);
    }

    #[test]
    fn test_constant_series_has_no_outliers() {
        let report = detect(&[7.0; 6], 1.0).unwrap();
        assert!(report.outliers.is_empty());
        assert!(report.z_scores.iter().all(|&z| z == 0.0));
    }

    #[test]
    fn test_empty_series() {
        let report = detect_outliers(&[], None).unwrap();
        assert!(report.values.is_empty());
        assert!(!report.has_outliers());
        assert_eq!(report.threshold, DEFAULT_Z_THRESHOLD);
    }

    #[test]
    fn test_outliers_keep_original_order() {
        let values = [500.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0, -500.0];
        let report = detect(&values, 1.5).unwrap();
        assert_eq!(report.outliers, vec![500.0, -500.0]);
        assert_eq!(report.outlier_indices, vec![0, 9]);
    }

    #[test]
    fn test_huge_spike_still_flagged() {
        let report = detect(&[0.0, 0.0, 0.0, 0.0, 1e160], 1.9).unwrap();
        assert_eq!(report.outlier_indices, vec![4]);
        assert!((report.z_scores[4] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_z_scores_ignore_units() {
        let values = [3.0, 5.0, 4.0, 6.0, 5.0, 40.0];
        let base = detect(&values, 2.0).unwrap();

        // Power-of-two factors rescale exactly, so the z-scores must match bit for bit
        for factor in [2f64.powi(500), 2f64.powi(-500), 2f64.powi(1000)] {
            let scaled: Vec<f64> = values.iter().map(|v| v * factor).collect();
            let report = detect(&scaled, 2.0).unwrap();
            assert_eq!(report.z_scores, base.z_scores, "factor {factor:e}");
            assert_eq!(report.outlier_indices, base.outlier_indices);
        }
        assert_eq!(base.outlier_indices, vec![5]);
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(detect(&[1.0, 2.0], 0.0).is_err());
        assert!(detect(&[1.0, 2.0], f64::NAN).is_err());
    }

    #[test]
    fn test_explanation_reports_threshold() {
        let report = detect(&[10.0, 10.0, 10.0, 10.0, 100.0], 2.0).unwrap();
        assert_eq!(
            report.explanation(),
            "1 outlier(s) detected using the Z-score method with a threshold of 2"
        );
    }

    #[test]
    fn test_duplicate_costs_attributed_by_index() {
        let cost = |id: &str, c: Option<f64>| BuildingRecord {
            id: Some(id.to_string()),
            cost: c,
            ..Default::default()
        };
        // Two identical outlying costs, with a cost-less record shifting positions
        let records = vec![
            cost("a", Some(100.0)),
            cost("b", Some(900.0)),
            cost("c", None),
            cost("d", Some(100.0)),
            cost("e", Some(100.0)),
            cost("f", Some(100.0)),
            cost("g", Some(100.0)),
            cost("h", Some(100.0)),
            cost("i", Some(100.0)),
            cost("j", Some(900.0)),
        ];

        let outliers = detect_cost_outliers(&records, Some(1.5)).unwrap();
        let ids: Vec<_> = outliers.iter().map(|o| o.record_id.as_deref()).collect();
        assert_eq!(ids, vec![Some("b"), Some("j")]);
        assert_eq!(outliers[0].record_index, 1);
        assert_eq!(outliers[1].record_index, 9);
    }
}
