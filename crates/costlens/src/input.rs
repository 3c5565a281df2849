//! Reading records and prediction inputs from disk

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, bail};
use costlens_core::model::{BuildingRecord, PredictionInput};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Json,
    Yaml,
}

impl FileKind {
    fn of(path: &Path) -> color_eyre::Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(FileKind::Json),
            Some("yaml" | "yml") => Ok(FileKind::Yaml),
            _ => bail!(
                "{}: expected a .json, .yaml or .yml file",
                path.display()
            ),
        }
    }
}

/// Deserialize `path` as JSON or YAML depending on its extension
pub fn load<T: DeserializeOwned>(path: &Path) -> color_eyre::Result<T> {
    let kind = FileKind::of(path)?;
    let content =
        fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;

    let value = match kind {
        FileKind::Json => serde_json::from_str(&content)
            .wrap_err_with(|| format!("parsing {}", path.display()))?,
        FileKind::Yaml => serde_saphyr::from_str(&content)
            .wrap_err_with(|| format!("parsing {}", path.display()))?,
    };
    Ok(value)
}

pub fn load_records(path: &Path) -> color_eyre::Result<Vec<BuildingRecord>> {
    let records: Vec<BuildingRecord> = load(path)?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

pub fn load_prediction_input(path: &Path) -> color_eyre::Result<PredictionInput> {
    let input: PredictionInput = load(path)?;
    tracing::info!(
        path = %path.display(),
        building_type = %input.building_type,
        "loaded prediction input"
    );
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use costlens_core::model::{Complexity, Quality};

    #[test]
    fn test_records_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(
            &path,
            r#"[{"id": "a", "squareFootage": 1200, "cost": 180000}, {"id": "b"}]"#,
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].square_footage, Some(1200.0));
        assert_eq!(records[1].cost, None);
    }

    #[test]
    fn test_input_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.YML");
        fs::write(
            &path,
            "buildingType: commercial\n\
             region: West\n\
             squareFootage: 12000\n\
             quality: premium\n\
             complexity: complex\n",
        )
        .unwrap();

        let input = load_prediction_input(&path).unwrap();
        assert_eq!(input.building_type, "commercial");
        assert_eq!(input.square_footage, 12_000.0);
        assert_eq!(input.quality, Quality::Premium);
        assert_eq!(input.complexity, Complexity::Complex);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        fs::write(&path, "id,cost\n").unwrap();

        let err = load_records(&path).unwrap_err();
        assert!(err.to_string().contains("expected a .json"));
    }
}
