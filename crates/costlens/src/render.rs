//! Report output in table, JSON or CSV form

use clap::ValueEnum;
use costlens_core::model::{
    CorrelationResult, DataQualityReport, PredictionResult, RecordOutlier, SensitivityEntry,
    WhatIfReport, WhatIfVariation,
};
use costlens_core::stats::SeriesSummary;
use costlens_core::{Tabular, explain, to_csv};
use serde::Serialize;

use crate::format::{format_change, format_currency, format_percentage, format_rate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable text
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated rows with a header
    Csv,
}

/// Plain-text rendering for terminal output
pub trait TextReport {
    fn text(&self) -> String;
}

pub fn render<T>(format: OutputFormat, report: &T) -> color_eyre::Result<String>
where
    T: Serialize + Tabular + TextReport + ?Sized,
{
    Ok(match format {
        OutputFormat::Table => report.text(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => to_csv(report),
    })
}

fn lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn interval(prediction: &PredictionResult) -> String {
    let (low, high) = prediction.confidence_interval;
    format!("{} - {}", format_currency(low), format_currency(high))
}

impl TextReport for DataQualityReport {
    fn text(&self) -> String {
        let mut out = vec![format!(
            "Completeness: {} ({} missing value(s))",
            format_percentage(self.completeness_score),
            self.missing_fields.len()
        )];
        if self.is_complete {
            return lines(out);
        }

        out.push(String::new());
        out.push("Missing by field:".to_string());
        for (field, count) in self.missing_by_field() {
            out.push(format!("  {:<16}{count:>6}", field.name()));
        }

        out.push(String::new());
        out.push("Missing values:".to_string());
        for missing in &self.missing_fields {
            let record = match &missing.record_id {
                Some(id) => format!("#{} ({id})", missing.record_index),
                None => format!("#{}", missing.record_index),
            };
            out.push(format!("  {record:<16}{}", missing.field));
        }
        lines(out)
    }
}

impl TextReport for CorrelationResult {
    fn text(&self) -> String {
        let trendline = if self.has_trendline() {
            format!("y = {:.4}x {:+.4}", self.slope, self.intercept)
        } else {
            "none".to_string()
        };
        lines(vec![
            format!("Coefficient: {:.4} ({})", self.coefficient, self.description()),
            format!("Points:      {}", self.scatter_pairs.len()),
            format!("Trendline:   {trendline}"),
        ])
    }
}

impl TextReport for PredictionResult {
    fn text(&self) -> String {
        lines(vec![
            format!("Estimated cost: {}", format_currency(self.cost)),
            format!("Per sq ft:      {}", format_rate(self.cost_per_sq_ft)),
            format!("Confidence:     {}", format_percentage(self.confidence)),
            format!(
                "Range:          {} (+/- {}, {})",
                interval(self),
                format_currency(self.margin_amount()),
                format_percentage(self.error)
            ),
        ])
    }
}

fn variation_rows(variations: &[WhatIfVariation]) -> Vec<String> {
    let mut out = vec![format!(
        "{:<16}{:<16}{:>14}  {:<27}{:>8}",
        "Parameter", "Value", "Cost", "Range", "Change"
    )];
    for v in variations {
        out.push(format!(
            "{:<16}{:<16}{:>14}  {:<27}{:>8}",
            v.parameter_value.parameter().label(),
            v.parameter_value.to_string(),
            format_currency(v.prediction.cost),
            interval(&v.prediction),
            format_change(v.percent_change)
        ));
    }
    out
}

impl TextReport for WhatIfReport {
    fn text(&self) -> String {
        let mut out = vec![
            format!(
                "Baseline: {} ({}/sq ft, {} confidence)",
                format_currency(self.baseline.cost),
                format_rate(self.baseline.cost_per_sq_ft),
                format_percentage(self.baseline.confidence)
            ),
            String::new(),
        ];
        out.extend(variation_rows(&self.variations));
        if !self.sensitivities.is_empty() {
            out.push(String::new());
            out.push("Sensitivity:".to_string());
            out.extend(self.sensitivities.iter().map(|e| format!("  {}", e.description)));
        }
        lines(out)
    }
}

impl TextReport for [SensitivityEntry] {
    fn text(&self) -> String {
        if self.is_empty() {
            return lines(vec!["No parameters evaluated".to_string()]);
        }
        let out = self
            .iter()
            .enumerate()
            .map(|(rank, e)| {
                format!(
                    "{:>2}. {:<16}{:>7.3}  {}",
                    rank + 1,
                    e.parameter.label(),
                    e.sensitivity,
                    e.description
                )
            })
            .collect();
        lines(out)
    }
}

/// Cost outliers together with the statistics they were measured against
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOutliers {
    pub threshold: f64,
    pub summary: Option<SeriesSummary>,
    pub outliers: Vec<RecordOutlier>,
}

impl Tabular for CostOutliers {
    fn headers(&self) -> Vec<&'static str> {
        self.outliers.as_slice().headers()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.outliers.as_slice().rows()
    }
}

impl TextReport for CostOutliers {
    fn text(&self) -> String {
        let mut out = vec![explain(self.outliers.len(), self.threshold)];
        if let Some(s) = &self.summary {
            out.push(format!(
                "Costs: {} record(s), mean {}, std dev {}, range {} - {}",
                s.count,
                format_currency(s.mean),
                format_currency(s.std_dev),
                format_currency(s.min),
                format_currency(s.max)
            ));
        }
        if !self.outliers.is_empty() {
            out.push(String::new());
            out.push(format!("{:<16}{:>14}{:>10}", "Record", "Cost", "Z-score"));
            for o in &self.outliers {
                let record = match &o.record_id {
                    Some(id) => id.clone(),
                    None => format!("#{}", o.record_index),
                };
                out.push(format!(
                    "{record:<16}{:>14}{:>10.2}",
                    format_currency(o.value),
                    o.z_score
                ));
            }
        }
        lines(out)
    }
}
