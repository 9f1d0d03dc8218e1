use clap::Parser;
use log::{error, info, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use stenoscope_core::cli::{parse_probability, setup_logging, OutputFormat, StrategyArg};
use stenoscope_core::types::{DEFAULT_MODERATE_THRESHOLD, DEFAULT_SEVERE_THRESHOLD};
use stenoscope_core::{
    AggregationConfig, Diagnosis, NoPredictionReport, PredictionResponse, ResultAggregator,
    StenosisLookup, TextReport,
};

/// CLI tool for aggregating saved prediction responses
#[derive(Parser, Debug)]
#[command(name = "stenorank")]
#[command(about = "Compute final stenosis diagnoses from saved prediction responses")]
#[command(version)]
struct Cli {
    /// Prediction response JSON files ("-" reads standard input)
    #[arg(value_name = "RESPONSE", required = true)]
    responses: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Dominant class strategy
    #[arg(short, long, default_value = "priority-rule")]
    strategy: StrategyArg,

    /// Severe wins above this probability (priority rule)
    #[arg(long, default_value_t = DEFAULT_SEVERE_THRESHOLD, value_parser = parse_probability)]
    severe_threshold: f64,

    /// Moderate wins above this probability (priority rule)
    #[arg(long, default_value_t = DEFAULT_MODERATE_THRESHOLD, value_parser = parse_probability)]
    moderate_threshold: f64,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let config = AggregationConfig::default()
        .with_strategy(cli.strategy.into())
        .with_severe_threshold(cli.severe_threshold)
        .with_moderate_threshold(cli.moderate_threshold);
    info!("Using {:?}", config);
    let aggregator = ResultAggregator::new(config, StenosisLookup::default());

    let mut failures = 0;
    for path in &cli.responses {
        let response = match load_response(path) {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                eprintln!("Error: Failed to load {}: {}", path.display(), e);
                failures += 1;
                continue;
            }
        };

        let diagnosis = aggregator.aggregate(&response);
        if let Err(e) = &diagnosis {
            warn!("{}: {}", path.display(), e);
        }
        output_diagnosis(path, &diagnosis, cli.format);
    }

    if failures == cli.responses.len() {
        process::exit(1);
    }
}

fn load_response(path: &Path) -> stenoscope_core::Result<PredictionResponse> {
    let body = if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        body
    } else {
        std::fs::read_to_string(path)?
    };
    PredictionResponse::from_json_str(&body)
}

fn output_diagnosis(
    path: &Path,
    diagnosis: &stenoscope_core::Result<Diagnosis>,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Text => {
            println!("# {}", path.display());
            match diagnosis {
                Ok(diagnosis) => println!("{}", TextReport::new(diagnosis)),
                Err(e) => println!("{}", NoPredictionReport::new(e)),
            }
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                let value = match diagnosis {
                    Ok(diagnosis) => serde_json::json!({
                        "source": path.display().to_string(),
                        "diagnosis": diagnosis,
                    }),
                    Err(e) => serde_json::json!({
                        "source": path.display().to_string(),
                        "error": e.to_string(),
                    }),
                };
                println!("{}", value);
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = diagnosis;
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}
