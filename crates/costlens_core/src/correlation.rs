//! Pearson correlation and least-squares trendlines between two series

use crate::error::{AnalyticsError, Result};
use crate::model::{BuildingRecord, CorrelationResult, RecordField};
use crate::stats::{max_abs_deviation, mean};

/// Below this absolute coefficient no trendline is drawn
pub const TRENDLINE_MIN_COEFFICIENT: f64 = 0.1;

/// Sums of centred products needed by both the coefficient and the fit.
///
/// Deviations are divided by each series' largest absolute deviation before
/// they are multiplied, so the sums stay finite for any finite input.
struct Moments {
    x_mean: f64,
    y_mean: f64,
    x_scale: f64,
    y_scale: f64,
    sxy: f64,
    sxx: f64,
    syy: f64,
}

impl Moments {
    fn from_series(xs: &[f64], ys: &[f64]) -> Option<Self> {
        let x_mean = mean(xs)?;
        let y_mean = mean(ys)?;
        let x_scale = max_abs_deviation(xs, x_mean);
        let y_scale = max_abs_deviation(ys, y_mean);
        let scaled = |v: f64, mean: f64, scale: f64| {
            if scale > 0.0 { (v - mean) / scale } else { 0.0 }
        };

        let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = scaled(x, x_mean, x_scale);
            let dy = scaled(y, y_mean, y_scale);
            sxy += dx * dy;
            sxx += dx * dx;
            syy += dy * dy;
        }
        Some(Self {
            x_mean,
            y_mean,
            x_scale,
            y_scale,
            sxy,
            sxx,
            syy,
        })
    }

    fn coefficient(&self) -> f64 {
        if self.sxx == 0.0 || self.syy == 0.0 {
            return 0.0;
        }
        (self.sxy / (self.sxx * self.syy).sqrt()).clamp(-1.0, 1.0)
    }

    fn slope(&self) -> f64 {
        if self.sxx == 0.0 {
            0.0
        } else {
            self.sxy / self.sxx * (self.y_scale / self.x_scale)
        }
    }
}

fn check_series(xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.is_empty() || ys.is_empty() {
        return Err(AnalyticsError::invalid(
            "correlate",
            "at least one (x, y) pair is required",
        ));
    }
    if xs.len() != ys.len() {
        return Err(AnalyticsError::invalid(
            "correlate",
            format!("xs has {} values but ys has {}", xs.len(), ys.len()),
        ));
    }
    Ok(())
}

fn moments(xs: &[f64], ys: &[f64]) -> Result<Moments> {
    check_series(xs, ys)?;
    Moments::from_series(xs, ys)
        .ok_or_else(|| AnalyticsError::invalid("correlate", "empty series"))
}

/// Correlate two equal-length series and fit a trendline.
///
/// The trendline is the OLS line evaluated at `min(xs)` and `max(xs)`; it is
/// left empty for fewer than two pairs or when `|r| < 0.1`.
pub fn correlate(xs: &[f64], ys: &[f64]) -> Result<CorrelationResult> {
    let moments = moments(xs, ys)?;

    let coefficient = moments.coefficient();
    let slope = moments.slope();
    let intercept = moments.y_mean - slope * moments.x_mean;

    let weak = coefficient.is_nan() || coefficient.abs() < TRENDLINE_MIN_COEFFICIENT;
    let trendline = if xs.len() < 2 || weak {
        Vec::new()
    } else {
        let (min_x, max_x) = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        vec![
            (min_x, slope * min_x + intercept),
            (max_x, slope * max_x + intercept),
        ]
    };

    tracing::debug!(
        points = xs.len(),
        coefficient,
        slope,
        intercept,
        "computed correlation"
    );

    Ok(CorrelationResult {
        coefficient,
        scatter_pairs: xs.iter().copied().zip(ys.iter().copied()).collect(),
        trendline,
        slope,
        intercept,
    })
}

/// Pearson coefficient only
pub fn calculate_correlation(xs: &[f64], ys: &[f64]) -> Result<f64> {
    moments(xs, ys).map(|m| m.coefficient())
}

/// Correlate two numeric record fields.
///
/// Records lacking either field are skipped, so the pairs stay aligned.
pub fn correlate_fields(
    records: &[BuildingRecord],
    x_field: RecordField,
    y_field: RecordField,
) -> Result<CorrelationResult> {
    for field in [x_field, y_field] {
        if !field.is_numeric() {
            return Err(AnalyticsError::invalid(
                "correlate fields",
                format!("'{field}' is not a numeric field"),
            ));
        }
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = records
        .iter()
        .filter_map(|r| Some((r.numeric(x_field)?, r.numeric(y_field)?)))
        .unzip();

    correlate(&xs, &ys)
}

/// Narrative strength label for a coefficient, e.g. "Strong Positive"
#[must_use]
pub fn describe_correlation(coefficient: f64) -> String {
    let magnitude = coefficient.abs();
    let strength = if magnitude >= 0.9 {
        "Very Strong"
    } else if magnitude >= 0.7 {
        "Strong"
    } else if magnitude >= 0.5 {
        "Moderate"
    } else if magnitude >= 0.3 {
        "Weak"
    } else {
        "Very Weak"
    };
    let direction = if coefficient < 0.0 {
        "Negative"
    } else {
        "Positive"
    };
    format!("{strength} {direction}")
}

impl CorrelationResult {
    #[must_use]
    pub fn description(&self) -> String {
        describe_correlation(self.coefficient)
    }

    #[must_use]
    pub fn has_trendline(&self) -> bool {
        !self.trendline.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trendline_through_exact_points() {
        let result = correlate(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();

        assert_eq!(result.coefficient, 1.0);
        assert_eq!(result.slope, 2.0);
        assert_eq!(result.intercept, 0.0);
        assert_eq!(result.trendline, vec![(1.0, 2.0), (3.0, 6.0)]);
        assert_eq!(result.scatter_pairs.len(), 3);
    }

    #[test]
    fn test_identical_and_negated_series() {
        let xs = [3.5, 1.25, 9.0, 4.0, 7.75];
        let neg: Vec<f64> = xs.iter().map(|x| -x).collect();

        assert_eq!(calculate_correlation(&xs, &xs).unwrap(), 1.0);
        assert_eq!(calculate_correlation(&xs, &neg).unwrap(), -1.0);
    }

    #[test]
    fn test_constant_series_is_zero_not_nan() {
        let result = correlate(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(result.coefficient, 0.0);
        assert!(result.trendline.is_empty());
        assert_eq!(result.slope, 0.0);
        assert_eq!(result.intercept, 5.0);
    }

    #[test]
    fn test_single_point_has_no_trendline() {
        let result = correlate(&[4.0], &[8.0]).unwrap();
        assert_eq!(result.coefficient, 0.0);
        assert!(!result.has_trendline());
    }

    #[test]
    fn test_weak_signal_suppresses_trendline() {
        // Symmetric V shape: zero linear association
        let result = correlate(&[-2.0, -1.0, 0.0, 1.0, 2.0], &[4.0, 1.0, 0.0, 1.0, 4.0]).unwrap();
        assert!(result.coefficient.abs() < TRENDLINE_MIN_COEFFICIENT);
        assert!(result.trendline.is_empty());
    }

    #[test]
    fn test_huge_magnitudes_stay_finite() {
        assert_eq!(
            calculate_correlation(&[0.0, 2e100, 4e100], &[0.0, 2e100, 4e100]).unwrap(),
            1.0
        );

        let result = correlate(&[0.0, 1e160], &[0.0, 1e160]).unwrap();
        assert_eq!(result.coefficient, 1.0);
        assert_eq!(result.slope, 1.0);
        assert_eq!(result.trendline, vec![(0.0, 0.0), (1e160, 1e160)]);
    }

    #[test]
    fn test_slope_recovers_scale_difference() {
        let result = correlate(&[1.0, 2.0, 3.0], &[-3e200, -6e200, -9e200]).unwrap();
        assert!((result.coefficient + 1.0).abs() < 1e-12);
        assert!((result.slope / -3e200 - 1.0).abs() < 1e-12);
        assert!(result.has_trendline());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            correlate(&[], &[]),
            Err(AnalyticsError::InvalidInput { .. })
        ));
        assert!(matches!(
            calculate_correlation(&[1.0, 2.0], &[1.0]),
            Err(AnalyticsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_strength_bands() {
        assert_eq!(describe_correlation(0.95), "Very Strong Positive");
        assert_eq!(describe_correlation(0.9), "Very Strong Positive");
        assert_eq!(describe_correlation(-0.75), "Strong Negative");
        assert_eq!(describe_correlation(0.5), "Moderate Positive");
        assert_eq!(describe_correlation(-0.3), "Weak Negative");
        assert_eq!(describe_correlation(0.29), "Very Weak Positive");
        assert_eq!(describe_correlation(0.0), "Very Weak Positive");
    }

    #[test]
    fn test_correlate_fields_skips_incomplete_records() {
        let records = vec![
            BuildingRecord {
                square_footage: Some(1000.0),
                cost: Some(150_000.0),
                ..Default::default()
            },
            BuildingRecord {
                square_footage: Some(2000.0),
                ..Default::default()
            },
            BuildingRecord {
                square_footage: Some(3000.0),
                cost: Some(450_000.0),
                ..Default::default()
            },
        ];

        let result = correlate_fields(&records, RecordField::SquareFootage, RecordField::Cost).unwrap();
        assert_eq!(result.scatter_pairs, vec![(1000.0, 150_000.0), (3000.0, 450_000.0)]);
        assert_eq!(result.coefficient, 1.0);

        assert!(correlate_fields(&records, RecordField::Region, RecordField::Cost).is_err());
    }
}
