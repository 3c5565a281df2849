//! Rate-table cost predictor
//!
//! Prices a building as `square_footage * base_rate * region * quality *
//! complexity`. Building types and regions missing from the table fall
//! back to neutral values and lower the reported confidence.

use std::collections::BTreeMap;
use std::fmt;

use costlens_core::CostPredictor;
use costlens_core::error::PredictorError;
use costlens_core::model::{BaseEstimate, Complexity, PredictionInput, Quality};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateTable {
    /// Base $/sq ft keyed by building type
    pub base_rates: BTreeMap<String, f64>,
    /// Used for building types absent from `base_rates`
    pub default_rate: f64,
    pub region_factors: BTreeMap<String, f64>,
    pub quality_factors: BTreeMap<Quality, f64>,
    pub complexity_factors: BTreeMap<Complexity, f64>,
    pub base_confidence: f64,
    pub base_error_margin: f64,
    /// Confidence lost and error margin gained per unrecognised lookup
    pub unknown_penalty: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        let owned = |pairs: &[(&str, f64)]| -> BTreeMap<String, f64> {
            pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
        };
        Self {
            base_rates: owned(&[
                ("residential", 150.0),
                ("commercial", 180.0),
                ("industrial", 120.0),
                ("institutional", 220.0),
            ]),
            default_rate: 160.0,
            region_factors: owned(&[
                ("Northeast", 1.2),
                ("Midwest", 0.95),
                ("South", 0.9),
                ("West", 1.15),
            ]),
            quality_factors: BTreeMap::from([
                (Quality::Economy, 0.8),
                (Quality::Standard, 1.0),
                (Quality::Premium, 1.3),
                (Quality::Luxury, 1.8),
            ]),
            complexity_factors: BTreeMap::from([
                (Complexity::Simple, 0.9),
                (Complexity::Moderate, 1.0),
                (Complexity::Complex, 1.25),
            ]),
            base_confidence: 0.85,
            base_error_margin: 0.1,
            unknown_penalty: 0.1,
        }
    }
}

fn lookup(table: &BTreeMap<String, f64>, key: &str) -> Option<f64> {
    table
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key.trim()))
        .map(|(_, &v)| v)
}

#[derive(Debug, Clone, PartialEq)]
pub enum RateTableError {
    InvalidSquareFootage(f64),
}

impl fmt::Display for RateTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateTableError::InvalidSquareFootage(v) => {
                write!(f, "square footage must be a positive number, got {v}")
            }
        }
    }
}

impl std::error::Error for RateTableError {}

/// [`CostPredictor`] backed by a [`RateTable`]
#[derive(Debug, Clone, Default)]
pub struct RateTablePredictor {
    table: RateTable,
}

impl RateTablePredictor {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }
}

impl CostPredictor for RateTablePredictor {
    fn predict(&self, input: &PredictionInput) -> Result<BaseEstimate, PredictorError> {
        if !(input.square_footage.is_finite() && input.square_footage > 0.0) {
            return Err(Box::new(RateTableError::InvalidSquareFootage(
                input.square_footage,
            )));
        }

        let t = &self.table;
        let base_rate = lookup(&t.base_rates, &input.building_type);
        let region = lookup(&t.region_factors, &input.region);
        let unknowns = [base_rate.is_none(), region.is_none()]
            .iter()
            .filter(|&&missing| missing)
            .count() as f64;

        let rate = base_rate.unwrap_or(t.default_rate)
            * region.unwrap_or(1.0)
            * t.quality_factors.get(&input.quality).copied().unwrap_or(1.0)
            * t.complexity_factors
                .get(&input.complexity)
                .copied()
                .unwrap_or(1.0);

        if unknowns > 0.0 {
            tracing::debug!(
                building_type = %input.building_type,
                region = %input.region,
                "rate table fell back to defaults"
            );
        }

        Ok(BaseEstimate {
            cost: rate * input.square_footage,
            cost_per_sq_ft: rate,
            confidence: (t.base_confidence - unknowns * t.unknown_penalty).max(0.0),
            error_margin: (t.base_error_margin + unknowns * t.unknown_penalty).min(1.0),
        })
    }
}
