use std::path::PathBuf;

use clap::{Parser, Subcommand};
use costlens::{AppConfig, CONFIG_FILE_NAME, OutputFormat, commands, default_data_dir, init_logging};

#[derive(Parser, Debug)]
#[command(name = "costlens")]
#[command(about = "Building-cost analytics: data quality, correlation, outliers and what-if analysis")]
struct Args {
    /// Path to the data directory (default: ~/.costlens/)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check records for missing required fields
    Quality {
        #[arg(short, long)]
        records: PathBuf,
        /// Required fields (default: all)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },
    /// Correlate two numeric record fields
    Correlate {
        #[arg(short, long)]
        records: PathBuf,
        /// Field on the x axis, e.g. squareFootage
        #[arg(short, long)]
        x: String,
        /// Field on the y axis, e.g. cost
        #[arg(short, long)]
        y: String,
    },
    /// Flag records with outlying costs
    Outliers {
        #[arg(short, long)]
        records: PathBuf,
        /// Absolute z-score at which a cost is flagged (default from config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Predict the cost of one building with confidence bounds
    Predict {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Re-price a building across alternative parameter values
    WhatIf {
        #[arg(short, long)]
        input: PathBuf,
        /// NAME=VALUE[,VALUE...], repeatable
        #[arg(short, long = "param", required = true)]
        params: Vec<String>,
    },
    /// Rank every parameter by its effect on cost
    Sensitivity {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let config_path = args.config.unwrap_or_else(|| data_dir.join(CONFIG_FILE_NAME));
    let config = AppConfig::load_or_default(&config_path)?;
    let format = args.format;

    let output = match &args.command {
        Command::Quality { records, fields } => commands::quality(records, fields, format)?,
        Command::Correlate { records, x, y } => commands::correlate(records, x, y, format)?,
        Command::Outliers { records, threshold } => {
            commands::outliers(records, *threshold, &config, format)?
        }
        Command::Predict { input } => commands::predict(input, &config, format)?,
        Command::WhatIf { input, params } => commands::what_if(input, params, &config, format)?,
        Command::Sensitivity { input } => commands::sensitivity(input, &config, format)?,
    };
    print!("{output}");

    tracing::debug!(command = ?args.command, "command finished");
    Ok(())
}
