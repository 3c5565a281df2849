//! Request and configuration types for what-if and sensitivity analysis.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};
use crate::model::{Complexity, Parameter, ParameterValue, PredictionInput, Quality};

/// One what-if request: a parameter name and raw candidate values, as they
/// arrive from the request layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    pub parameter: String,
    pub values: Vec<String>,
}

impl ParameterSet {
    pub fn new<I, S>(parameter: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameter: parameter.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve the parameter name and parse every candidate for it.
    ///
    /// Fails with `UnknownParameter` for a name outside `PredictionInput` and
    /// with `InvalidInput` for an empty or unparseable candidate list.
    pub fn resolve(&self) -> Result<(Parameter, Vec<ParameterValue>)> {
        let parameter: Parameter = self.parameter.parse()?;
        if self.values.is_empty() {
            return Err(AnalyticsError::invalid(
                "what-if analysis",
                format!("no candidate values given for '{parameter}'"),
            ));
        }
        let values = self
            .values
            .iter()
            .map(|raw| parameter.parse_value(raw))
            .collect::<Result<Vec<_>>>()?;
        Ok((parameter, values))
    }
}

/// Candidate sets used when sweeping every dimension at once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensitivityConfig {
    /// Building types to substitute
    pub building_types: Vec<String>,
    /// Regions to substitute
    pub regions: Vec<String>,
    /// Multiples of the baseline square footage
    pub square_footage_factors: Vec<f64>,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            building_types: ["residential", "commercial", "industrial", "institutional"]
                .map(String::from)
                .to_vec(),
            regions: ["Northeast", "Midwest", "South", "West"]
                .map(String::from)
                .to_vec(),
            square_footage_factors: vec![0.5, 0.75, 1.25, 1.5],
        }
    }
}

impl SensitivityConfig {
    /// Candidate values for one dimension around `baseline`
    pub fn candidates(
        &self,
        baseline: &PredictionInput,
        parameter: Parameter,
    ) -> Result<Vec<ParameterValue>> {
        let values = match parameter {
            Parameter::BuildingType => self
                .building_types
                .iter()
                .cloned()
                .map(ParameterValue::BuildingType)
                .collect(),
            Parameter::Region => self
                .regions
                .iter()
                .cloned()
                .map(ParameterValue::Region)
                .collect(),
            Parameter::SquareFootage => self
                .square_footage_factors
                .iter()
                .map(|&factor| {
                    let sq_ft = baseline.square_footage * factor;
                    if sq_ft.is_finite() && sq_ft > 0.0 {
                        Ok(ParameterValue::SquareFootage(sq_ft))
                    } else {
                        Err(AnalyticsError::invalid(
                            "sensitivity analysis",
                            format!("square footage factor {factor} gives {sq_ft} sq ft"),
                        ))
                    }
                })
                .collect::<Result<Vec<_>>>()?,
            Parameter::Quality => Quality::ALL.map(ParameterValue::Quality).to_vec(),
            Parameter::Complexity => Complexity::ALL.map(ParameterValue::Complexity).to_vec(),
        };
        Ok(values)
    }
}
