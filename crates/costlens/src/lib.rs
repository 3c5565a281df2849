//! Command-line front end for the costlens analytics library
//!
//! Loads records and prediction inputs from JSON or YAML, prices buildings
//! with a configurable rate table and prints reports as text, JSON or CSV.

pub mod commands;
pub mod config;
pub mod format;
pub mod input;
pub mod logging;
pub mod predictor;
pub mod render;

pub use config::{AppConfig, CONFIG_FILE_NAME, default_data_dir};
pub use logging::init_logging;
pub use predictor::{RateTable, RateTablePredictor};
pub use render::OutputFormat;
