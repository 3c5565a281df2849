//! CSV export of tabular results
//!
//! Cells are joined with commas and rows with newlines. Values are
//! comma-free primitives, so no quoting is applied.

use crate::model::{
    CorrelationResult, DataQualityReport, OutlierReport, PredictionResult, RecordOutlier,
    SensitivityEntry, WhatIfReport, WhatIfVariation,
};

/// A result that can be laid out as a header row plus data rows
pub trait Tabular {
    fn headers(&self) -> Vec<&'static str>;
    fn rows(&self) -> Vec<Vec<String>>;
}

/// Header-join plus row-join
#[must_use]
pub fn to_csv<T: Tabular + ?Sized>(table: &T) -> String {
    let mut out = table.headers().join(",");
    for row in table.rows() {
        out.push('\n');
        out.push_str(&row.join(","));
    }
    out.push('\n');
    out
}

fn opt(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

impl Tabular for DataQualityReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["recordIndex", "recordId", "field"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.missing_fields
            .iter()
            .map(|m| {
                vec![
                    m.record_index.to_string(),
                    opt(m.record_id.as_deref()),
                    m.field.to_string(),
                ]
            })
            .collect()
    }
}

impl Tabular for CorrelationResult {
    fn headers(&self) -> Vec<&'static str> {
        vec!["x", "y"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.scatter_pairs
            .iter()
            .map(|(x, y)| vec![x.to_string(), y.to_string()])
            .collect()
    }
}

impl Tabular for OutlierReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["index", "value", "zScore", "isOutlier"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.values
            .iter()
            .zip(&self.z_scores)
            .enumerate()
            .map(|(i, (value, z))| {
                vec![
                    i.to_string(),
                    value.to_string(),
                    format!("{z:.4}"),
                    self.outlier_indices.contains(&i).to_string(),
                ]
            })
            .collect()
    }
}

impl Tabular for [RecordOutlier] {
    fn headers(&self) -> Vec<&'static str> {
        vec!["recordIndex", "recordId", "value", "zScore"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|o| {
                vec![
                    o.record_index.to_string(),
                    opt(o.record_id.as_deref()),
                    o.value.to_string(),
                    format!("{:.4}", o.z_score),
                ]
            })
            .collect()
    }
}

impl Tabular for PredictionResult {
    fn headers(&self) -> Vec<&'static str> {
        vec!["cost", "costPerSqFt", "confidence", "error", "low", "high"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            format!("{:.2}", self.cost),
            format!("{:.2}", self.cost_per_sq_ft),
            format!("{:.2}", self.confidence),
            format!("{:.2}", self.error),
            format!("{:.2}", self.confidence_interval.0),
            format!("{:.2}", self.confidence_interval.1),
        ]]
    }
}

impl Tabular for [WhatIfVariation] {
    fn headers(&self) -> Vec<&'static str> {
        vec![
            "parameter",
            "value",
            "cost",
            "costPerSqFt",
            "confidence",
            "low",
            "high",
            "percentChange",
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|v| {
                let p = &v.prediction;
                vec![
                    v.parameter_value.parameter().to_string(),
                    v.parameter_value.to_string(),
                    format!("{:.2}", p.cost),
                    format!("{:.2}", p.cost_per_sq_ft),
                    format!("{:.2}", p.confidence),
                    format!("{:.2}", p.confidence_interval.0),
                    format!("{:.2}", p.confidence_interval.1),
                    format!("{:.2}", v.percent_change),
                ]
            })
            .collect()
    }
}

impl Tabular for WhatIfReport {
    fn headers(&self) -> Vec<&'static str> {
        self.variations.as_slice().headers()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.variations.as_slice().rows()
    }
}

impl Tabular for [SensitivityEntry] {
    fn headers(&self) -> Vec<&'static str> {
        vec!["parameter", "sensitivity"]
    }

    // Descriptions contain commas, so they stay out of the CSV
    fn rows(&self) -> Vec<Vec<String>> {
        self.iter()
            .map(|e| vec![e.parameter.to_string(), format!("{:.4}", e.sensitivity)])
            .collect()
    }
}
