//! Raw building-cost records as supplied by the record source
//!
//! Every field is optional. Absence is exactly what the completeness
//! validator measures, so records are never rejected for missing data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// One building-cost record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildingRecord {
    pub id: Option<String>,
    pub region: Option<String>,
    pub building_type: Option<String>,
    pub square_footage: Option<f64>,
    pub quality: Option<String>,
    pub complexity: Option<String>,
    pub cost: Option<f64>,
    pub cost_per_sq_ft: Option<f64>,
    pub year_built: Option<i32>,
}

/// Names one field of a [`BuildingRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Id,
    Region,
    BuildingType,
    SquareFootage,
    Quality,
    Complexity,
    Cost,
    CostPerSqFt,
    YearBuilt,
}

impl RecordField {
    pub const ALL: [RecordField; 9] = [
        RecordField::Id,
        RecordField::Region,
        RecordField::BuildingType,
        RecordField::SquareFootage,
        RecordField::Quality,
        RecordField::Complexity,
        RecordField::Cost,
        RecordField::CostPerSqFt,
        RecordField::YearBuilt,
    ];

    /// Field name as it appears on the wire
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            RecordField::Id => "id",
            RecordField::Region => "region",
            RecordField::BuildingType => "buildingType",
            RecordField::SquareFootage => "squareFootage",
            RecordField::Quality => "quality",
            RecordField::Complexity => "complexity",
            RecordField::Cost => "cost",
            RecordField::CostPerSqFt => "costPerSqFt",
            RecordField::YearBuilt => "yearBuilt",
        }
    }

    /// Whether the field holds a number that can feed the statistics engines
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            RecordField::SquareFootage
                | RecordField::Cost
                | RecordField::CostPerSqFt
                | RecordField::YearBuilt
        )
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordField {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim() {
            "id" => RecordField::Id,
            "region" => RecordField::Region,
            "buildingType" | "building_type" => RecordField::BuildingType,
            "squareFootage" | "square_footage" => RecordField::SquareFootage,
            "quality" => RecordField::Quality,
            "complexity" => RecordField::Complexity,
            "cost" => RecordField::Cost,
            "costPerSqFt" | "cost_per_sq_ft" => RecordField::CostPerSqFt,
            "yearBuilt" | "year_built" => RecordField::YearBuilt,
            other => {
                return Err(AnalyticsError::invalid(
                    "record field",
                    format!("'{other}' is not a building record field"),
                ));
            }
        };
        Ok(field)
    }
}

fn text_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn number_present(value: Option<f64>) -> bool {
    value.is_some_and(f64::is_finite)
}

impl BuildingRecord {
    /// Whether `field` carries a usable value.
    ///
    /// Blank strings and non-finite numbers count as absent.
    #[must_use]
    pub fn has(&self, field: RecordField) -> bool {
        match field {
            RecordField::Id => text_present(&self.id),
            RecordField::Region => text_present(&self.region),
            RecordField::BuildingType => text_present(&self.building_type),
            RecordField::SquareFootage => number_present(self.square_footage),
            RecordField::Quality => text_present(&self.quality),
            RecordField::Complexity => text_present(&self.complexity),
            RecordField::Cost => number_present(self.cost),
            RecordField::CostPerSqFt => number_present(self.cost_per_sq_ft),
            RecordField::YearBuilt => self.year_built.is_some(),
        }
    }

    /// Numeric value of `field`, if the field is numeric and present
    #[must_use]
    pub fn numeric(&self, field: RecordField) -> Option<f64> {
        let value = match field {
            RecordField::SquareFootage => self.square_footage,
            RecordField::Cost => self.cost,
            RecordField::CostPerSqFt => self.cost_per_sq_ft,
            RecordField::YearBuilt => self.year_built.map(f64::from),
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_camel_case_with_gaps() {
        let json = r#"{"id":"b-1","buildingType":"office","squareFootage":1200.5,"costPerSqFt":210}"#;
        let record: BuildingRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id.as_deref(), Some("b-1"));
        assert_eq!(record.building_type.as_deref(), Some("office"));
        assert_eq!(record.square_footage, Some(1200.5));
        assert_eq!(record.cost_per_sq_ft, Some(210.0));
        assert!(record.region.is_none());
        assert!(record.year_built.is_none());
    }

    #[test]
    fn test_presence_rules() {
        let record = BuildingRecord {
            region: Some("   ".to_string()),
            quality: Some("premium".to_string()),
            cost: Some(f64::NAN),
            square_footage: Some(0.0),
            ..Default::default()
        };

        assert!(!record.has(RecordField::Region));
        assert!(record.has(RecordField::Quality));
        assert!(!record.has(RecordField::Cost));
        assert!(record.has(RecordField::SquareFootage));
        assert!(!record.has(RecordField::Id));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in RecordField::ALL {
            assert_eq!(field.name().parse::<RecordField>().unwrap(), field);
        }
        assert_eq!(
            "cost_per_sq_ft".parse::<RecordField>().unwrap(),
            RecordField::CostPerSqFt
        );
        assert!("footprint".parse::<RecordField>().is_err());
    }

    #[test]
    fn test_numeric_extraction() {
        let record = BuildingRecord {
            year_built: Some(1998),
            cost: Some(250_000.0),
            region: Some("West".to_string()),
            ..Default::default()
        };

        assert_eq!(record.numeric(RecordField::YearBuilt), Some(1998.0));
        assert_eq!(record.numeric(RecordField::Cost), Some(250_000.0));
        assert_eq!(record.numeric(RecordField::Region), None);
        assert_eq!(record.numeric(RecordField::SquareFootage), None);
    }
}
