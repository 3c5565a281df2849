use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, ensure};
use costlens_core::{DEFAULT_Z_THRESHOLD, SensitivityConfig};
use serde::{Deserialize, Serialize};

use crate::predictor::RateTable;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Settings read from `config.yaml`. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub predictor: RateTable,
    pub sensitivity: SensitivityConfig,
    pub outlier_threshold: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            predictor: RateTable::default(),
            sensitivity: SensitivityConfig::default(),
            outlier_threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults if the file does not exist.
    ///
    /// A file that exists but fails to parse is an error rather than a
    /// silent fallback.
    pub fn load_or_default(path: &Path) -> color_eyre::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("reading {}", path.display()));
            }
        };

        let config: Self = serde_saphyr::from_str(&content)
            .wrap_err_with(|| format!("parsing {}", path.display()))?;
        ensure!(
            config.outlier_threshold.is_finite() && config.outlier_threshold > 0.0,
            "outlierThreshold must be a positive number, got {}",
            config.outlier_threshold
        );

        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// `~/.costlens`, or `./.costlens` without a home directory
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".costlens")
}
