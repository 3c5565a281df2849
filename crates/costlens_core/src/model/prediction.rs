//! Prediction inputs, outputs and the parameter dimensions they vary over

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Finish quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Economy,
    Standard,
    Premium,
    Luxury,
}

impl Quality {
    pub const ALL: [Quality; 4] = [
        Quality::Economy,
        Quality::Standard,
        Quality::Premium,
        Quality::Luxury,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Economy => "economy",
            Quality::Standard => "standard",
            Quality::Premium => "premium",
            Quality::Luxury => "luxury",
        }
    }
}

impl FromStr for Quality {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quality::ALL
            .into_iter()
            .find(|q| q.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AnalyticsError::invalid("quality", format!("'{s}' is not a quality tier"))
            })
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Simple, Complexity::Moderate, Complexity::Complex];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

impl FromStr for Complexity {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Complexity::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AnalyticsError::invalid("complexity", format!("'{s}' is not a complexity level"))
            })
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five dimensions a prediction is evaluated across
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    pub building_type: String,
    pub region: String,
    pub square_footage: f64,
    pub quality: Quality,
    pub complexity: Complexity,
}

impl PredictionInput {
    /// Copy of this input with a single dimension overridden
    #[must_use]
    pub fn with(&self, value: &ParameterValue) -> PredictionInput {
        let mut variant = self.clone();
        match value {
            ParameterValue::BuildingType(v) => variant.building_type = v.clone(),
            ParameterValue::Region(v) => variant.region = v.clone(),
            ParameterValue::SquareFootage(v) => variant.square_footage = *v,
            ParameterValue::Quality(v) => variant.quality = *v,
            ParameterValue::Complexity(v) => variant.complexity = *v,
        }
        variant
    }

    /// Current value of one dimension
    #[must_use]
    pub fn value_of(&self, parameter: Parameter) -> ParameterValue {
        match parameter {
            Parameter::BuildingType => ParameterValue::BuildingType(self.building_type.clone()),
            Parameter::Region => ParameterValue::Region(self.region.clone()),
            Parameter::SquareFootage => ParameterValue::SquareFootage(self.square_footage),
            Parameter::Quality => ParameterValue::Quality(self.quality),
            Parameter::Complexity => ParameterValue::Complexity(self.complexity),
        }
    }
}

/// A dimension of [`PredictionInput`] that what-if analysis can vary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Parameter {
    BuildingType,
    Region,
    SquareFootage,
    Quality,
    Complexity,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::BuildingType,
        Parameter::Region,
        Parameter::SquareFootage,
        Parameter::Quality,
        Parameter::Complexity,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Parameter::BuildingType => "buildingType",
            Parameter::Region => "region",
            Parameter::SquareFootage => "squareFootage",
            Parameter::Quality => "quality",
            Parameter::Complexity => "complexity",
        }
    }

    /// Human-readable label for reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Parameter::BuildingType => "Building Type",
            Parameter::Region => "Region",
            Parameter::SquareFootage => "Square Footage",
            Parameter::Quality => "Quality",
            Parameter::Complexity => "Complexity",
        }
    }

    /// Parse a raw candidate value for this dimension
    pub fn parse_value(self, raw: &str) -> crate::error::Result<ParameterValue> {
        let raw = raw.trim();
        match self {
            Parameter::BuildingType | Parameter::Region if raw.is_empty() => Err(
                AnalyticsError::invalid("parameter value", format!("empty {}", self.name())),
            ),
            Parameter::BuildingType => Ok(ParameterValue::BuildingType(raw.to_string())),
            Parameter::Region => Ok(ParameterValue::Region(raw.to_string())),
            Parameter::SquareFootage => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => Ok(ParameterValue::SquareFootage(v)),
                _ => Err(AnalyticsError::invalid(
                    "parameter value",
                    format!("'{raw}' is not a positive square footage"),
                )),
            },
            Parameter::Quality => raw.parse().map(ParameterValue::Quality),
            Parameter::Complexity => raw.parse().map(ParameterValue::Complexity),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "buildingType" | "building_type" => Ok(Parameter::BuildingType),
            "region" => Ok(Parameter::Region),
            "squareFootage" | "square_footage" => Ok(Parameter::SquareFootage),
            "quality" => Ok(Parameter::Quality),
            "complexity" => Ok(Parameter::Complexity),
            other => Err(AnalyticsError::UnknownParameter(other.to_string())),
        }
    }
}

/// A typed value for exactly one [`Parameter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "parameter", content = "value", rename_all = "camelCase")]
pub enum ParameterValue {
    BuildingType(String),
    Region(String),
    SquareFootage(f64),
    Quality(Quality),
    Complexity(Complexity),
}

impl ParameterValue {
    /// The dimension this value belongs to
    #[must_use]
    pub fn parameter(&self) -> Parameter {
        match self {
            ParameterValue::BuildingType(_) => Parameter::BuildingType,
            ParameterValue::Region(_) => Parameter::Region,
            ParameterValue::SquareFootage(_) => Parameter::SquareFootage,
            ParameterValue::Quality(_) => Parameter::Quality,
            ParameterValue::Complexity(_) => Parameter::Complexity,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::BuildingType(v) | ParameterValue::Region(v) => f.write_str(v),
            ParameterValue::SquareFootage(v) => write!(f, "{v}"),
            ParameterValue::Quality(v) => write!(f, "{v}"),
            ParameterValue::Complexity(v) => write!(f, "{v}"),
        }
    }
}

/// Point estimate produced by an external predictor, before bounds are applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEstimate {
    pub cost: f64,
    pub cost_per_sq_ft: f64,
    pub confidence: f64,
    pub error_margin: f64,
}

/// A prediction with its uncertainty bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub cost: f64,
    pub cost_per_sq_ft: f64,
    /// Confidence score in [0, 1]
    pub confidence: f64,
    /// Relative error margin in [0, 1]
    pub error: f64,
    /// (low, high), always bracketing `cost`
    pub confidence_interval: (f64, f64),
}
