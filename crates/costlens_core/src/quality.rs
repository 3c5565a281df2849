//! Record completeness validation

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::model::{BuildingRecord, DataQualityReport, MissingField, RecordField};

/// Check every record for every required field.
///
/// Missing values never raise; they are collected into `missing_fields`.
/// With no records (or no required fields) the set is vacuously complete.
pub fn validate(records: &[BuildingRecord], required_fields: &[RecordField]) -> DataQualityReport {
    let missing_fields: Vec<MissingField> = records
        .iter()
        .enumerate()
        .flat_map(|(record_index, record)| {
            required_fields
                .iter()
                .filter(|field| !record.has(**field))
                .map(move |&field| MissingField {
                    record_index,
                    record_id: record.id.clone(),
                    field,
                })
        })
        .collect();

    let expected = records.len() * required_fields.len();
    let completeness_score = if expected == 0 {
        1.0
    } else {
        (1.0 - missing_fields.len() as f64 / expected as f64).clamp(0.0, 1.0)
    };

    tracing::debug!(
        records = records.len(),
        required = required_fields.len(),
        missing = missing_fields.len(),
        completeness_score,
        "validated record completeness"
    );

    DataQualityReport {
        completeness_score,
        is_complete: missing_fields.is_empty(),
        missing_fields,
    }
}

/// Validate against field names as supplied by a request.
///
/// Unknown field names are rejected with `InvalidInput`.
pub fn validate_data_completeness(
    records: &[BuildingRecord],
    required_fields: &[&str],
) -> Result<DataQualityReport> {
    let fields = required_fields
        .iter()
        .map(|name| name.parse::<RecordField>())
        .collect::<Result<Vec<_>>>()?;
    Ok(validate(records, &fields))
}

impl DataQualityReport {
    /// Number of missing values per field, ordered by field
    #[must_use]
    pub fn missing_by_field(&self) -> Vec<(RecordField, usize)> {
        let mut counts: FxHashMap<RecordField, usize> = FxHashMap::default();
        for missing in &self.missing_fields {
            *counts.entry(missing.field).or_insert(0) += 1;
        }
        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_unstable_by_key(|(field, _)| *field);
        counts
    }
}
