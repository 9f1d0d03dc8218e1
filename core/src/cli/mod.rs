pub mod report;

use crate::types::{
    AggregationConfig, DominanceStrategy, PreviewConfig, DEFAULT_MODERATE_THRESHOLD,
    DEFAULT_SEVERE_THRESHOLD,
};
use crate::upload::DEFAULT_ENDPOINT;
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for stenoscope
#[derive(Parser, Debug)]
#[command(name = "stenoscope")]
#[command(about = "Lumbar spinal stenosis prediction and DICOM preview tool")]
#[command(version)]
pub struct Cli {
    /// Path to DICOM file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Prediction service endpoint
    #[arg(short, long, env = "STENOSCOPE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Read a saved prediction response instead of calling the service
    #[arg(short, long, value_name = "JSON")]
    pub response: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Dominant class strategy
    #[arg(short, long, default_value = "priority-rule")]
    pub strategy: StrategyArg,

    /// Severe wins above this probability (priority rule)
    #[arg(long, default_value_t = DEFAULT_SEVERE_THRESHOLD, value_parser = parse_probability)]
    pub severe_threshold: f64,

    /// Moderate wins above this probability (priority rule)
    #[arg(long, default_value_t = DEFAULT_MODERATE_THRESHOLD, value_parser = parse_probability)]
    pub moderate_threshold: f64,

    /// Primary render timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub preview_timeout_ms: u64,

    /// Write the rendered preview to this PNG file
    #[arg(long, value_name = "PNG")]
    pub snapshot: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn aggregation_config(&self) -> AggregationConfig {
        AggregationConfig::default()
            .with_strategy(self.strategy.into())
            .with_severe_threshold(self.severe_threshold)
            .with_moderate_threshold(self.moderate_threshold)
    }

    pub fn preview_config(&self) -> PreviewConfig {
        PreviewConfig::default().with_primary_timeout(Duration::from_millis(self.preview_timeout_ms))
    }
}

/// Parses a probability threshold in `[0, 1]`
pub fn parse_probability(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is not in [0, 1]", value))
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Dominant class strategy
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    /// Severe > 0.5, then Moderate > 0.3, else Normal/Mild
    PriorityRule,
    /// Highest probability wins
    ArgMax,
}

impl From<StrategyArg> for DominanceStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::PriorityRule => DominanceStrategy::PriorityRule,
            StrategyArg::ArgMax => DominanceStrategy::ArgMax,
        }
    }
}

/// Drives `future` on a current-thread runtime
///
/// The runtime is shut down without waiting for blocking tasks, so a pixel
/// decode abandoned by the preview timeout cannot keep the process alive.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn run_to_completion<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

/// Initialises env_logger at Info, or Debug when verbose
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
