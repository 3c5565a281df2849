//! Seeded randomized checks of the statistical invariants
//!
//! These tests verify, over many generated series, that:
//! - A series correlates perfectly with itself and its negation
//! - Coefficients stay in [-1, 1], even for magnitudes whose squares overflow
//! - Z-scores do not depend on the units of the series
//! - Constant series never produce outliers
//! - Confidence intervals always bracket the point estimate

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::confidence::estimate;
use crate::correlation::{calculate_correlation, correlate};
use crate::outliers::detect;

const CASES: usize = 200;

fn random_series(rng: &mut SmallRng) -> Vec<f64> {
    let len = rng.random_range(2..60);
    let spread = rng.random_range(1.0..10_000.0);
    let normal = Normal::new(0.0, spread).unwrap();
    let mut series: Vec<f64> = (0..len).map(|_| normal.sample(rng)).collect();
    // Guarantee non-zero variance
    series[0] += spread;
    series
}

#[test]
fn test_self_correlation_is_one() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..CASES {
        let xs = random_series(&mut rng);
        assert_eq!(calculate_correlation(&xs, &xs).unwrap(), 1.0, "xs={xs:?}");
    }
}

#[test]
fn test_negated_correlation_is_minus_one() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..CASES {
        let xs = random_series(&mut rng);
        let ys: Vec<f64> = xs.iter().map(|x| -x).collect();
        assert_eq!(calculate_correlation(&xs, &ys).unwrap(), -1.0, "xs={xs:?}");
    }
}

#[test]
fn test_coefficient_bounded() {
    let mut rng = SmallRng::seed_from_u64(13);
    for _ in 0..CASES {
        let xs = random_series(&mut rng);
        let ys: Vec<f64> = xs
            .iter()
            .map(|x| 3.0 * x + rng.random_range(-500.0..500.0))
            .collect();
        let result = correlate(&xs, &ys).unwrap();
        assert!((-1.0..=1.0).contains(&result.coefficient));
        assert!(result.trendline.is_empty() || result.trendline.len() == 2);
    }
}

/// A random series shifted into a magnitude between 1e100 and 1e300
fn huge_series(rng: &mut SmallRng) -> Vec<f64> {
    let magnitude = 10f64.powi(rng.random_range(100..=300));
    random_series(rng)
        .into_iter()
        .map(|v| v / 10_000.0 * magnitude)
        .collect()
}

#[test]
fn test_huge_series_correlate_within_bounds() {
    let mut rng = SmallRng::seed_from_u64(23);
    for _ in 0..CASES {
        let xs = huge_series(&mut rng);
        assert_eq!(calculate_correlation(&xs, &xs).unwrap(), 1.0, "xs={xs:?}");

        let ys: Vec<f64> = xs
            .iter()
            .map(|x| x * rng.random_range(0.5..1.5))
            .collect();
        let result = correlate(&xs, &ys).unwrap();
        assert!(result.coefficient.is_finite(), "xs={xs:?} ys={ys:?}");
        assert!((-1.0..=1.0).contains(&result.coefficient));
        assert!(result.slope.is_finite() && result.intercept.is_finite());
    }
}

#[test]
fn test_z_scores_scale_free() {
    let mut rng = SmallRng::seed_from_u64(29);
    for _ in 0..CASES {
        let values = random_series(&mut rng);
        let base = detect(&values, 2.0).unwrap();

        // 2^k rescales exactly in binary floating point
        let factor = 2f64.powi(rng.random_range(300..=900));
        let scaled: Vec<f64> = values.iter().map(|v| v * factor).collect();
        let report = detect(&scaled, 2.0).unwrap();

        assert_eq!(report.z_scores, base.z_scores, "values={values:?}");
        assert_eq!(report.outlier_indices, base.outlier_indices);
    }
}

#[test]
fn test_constant_series_never_flags() {
    let mut rng = SmallRng::seed_from_u64(17);
    for _ in 0..CASES {
        let value = rng.random_range(-1e6..1e6);
        let len = rng.random_range(1..40);
        let threshold = rng.random_range(0.1..4.0);

        let report = detect(&vec![value; len], threshold).unwrap();
        assert!(report.outliers.is_empty());
        assert!(report.z_scores.iter().all(|&z| z == 0.0));
    }
}

#[test]
fn test_interval_always_brackets_cost() {
    let mut rng = SmallRng::seed_from_u64(19);
    for _ in 0..CASES {
        let cost = rng.random_range(0.0..5e7);
        let margin = rng.random_range(0.0..=1.0);
        let result = estimate(cost, 0.0, 0.5, margin).unwrap();
        let (low, high) = result.confidence_interval;
        assert!(low <= result.cost, "low {low} > cost {cost} at e={margin}");
        assert!(high >= result.cost, "high {high} < cost {cost} at e={margin}");
        assert!(low >= 0.0);
    }
}
