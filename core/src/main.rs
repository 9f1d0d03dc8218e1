use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;
use stenoscope_core::cli::{run_to_completion, setup_logging, Cli, OutputFormat};
use stenoscope_core::upload::PredictionService;
use stenoscope_core::{
    run_session, Diagnosis, DicomMetadataReader, NoPredictionReport, PixelDataRenderer,
    PredictionClient, PredictionResponse, PreviewPipeline, PreviewReport, PreviewState, Result,
    ResultAggregator, SelectedFile, StenosisLookup, TextReport, UploadController,
};

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    if let Err(e) = run_to_completion(run(cli)) {
        error!("Failed to start runtime: {}", e);
        eprintln!("Error: Failed to start runtime: {}", e);
        process::exit(1);
    }
}

/// Where predictions come from: the live service or a saved response
enum PredictionSource {
    Service(PredictionClient),
    Saved(PathBuf),
}

impl PredictionService for PredictionSource {
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResponse> {
        match self {
            PredictionSource::Service(client) => client.predict(file).await,
            PredictionSource::Saved(path) => {
                info!("Reading saved prediction from {}", path.display());
                let body = std::fs::read_to_string(path)?;
                PredictionResponse::from_json_str(&body)
            }
        }
    }
}

async fn run(cli: Cli) {
    let file = match SelectedFile::open(&cli.file) {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to read {}: {}", cli.file.display(), e);
            eprintln!("Error: Failed to read {}: {}", cli.file.display(), e);
            process::exit(1);
        }
    };
    if !file.has_dicom_header() {
        warn!("{} has no DICM header", file.name());
    }

    let source = match &cli.response {
        Some(path) => PredictionSource::Saved(path.clone()),
        None => PredictionSource::Service(PredictionClient::new(cli.endpoint.clone())),
    };
    let mut controller = UploadController::new(source);
    controller.select(file);
    let aggregator = ResultAggregator::new(cli.aggregation_config(), StenosisLookup::default());
    let mut pipeline = PreviewPipeline::new(cli.preview_config());

    info!("Using {:?}", aggregator.config());

    let diagnosis = run_session(
        &controller,
        &aggregator,
        &mut pipeline,
        &PixelDataRenderer,
        &DicomMetadataReader,
    )
    .await;

    if let Some(path) = &cli.snapshot {
        match pipeline.state() {
            PreviewState::PrimaryRendered(snapshot) => match snapshot.save(path) {
                Ok(()) => info!("Wrote preview to {}", path.display()),
                Err(e) => error!("Failed to write preview: {}", e),
            },
            other => warn!("No rendered preview to write ({})", other),
        }
    }

    output_report(&diagnosis, &pipeline, cli.format);
}

fn output_report(diagnosis: &Result<Diagnosis>, pipeline: &PreviewPipeline, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            match diagnosis {
                Ok(diagnosis) => println!("{}", TextReport::new(diagnosis)),
                Err(e) => {
                    warn!("{}", e);
                    println!("{}", NoPredictionReport::new(e));
                }
            }
            println!(
                "{}",
                PreviewReport::new(pipeline.state(), pipeline.last_render_failure())
            );
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match output_json(diagnosis, pipeline) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = (diagnosis, pipeline);
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(feature = "json")]
fn output_json(
    diagnosis: &Result<Diagnosis>,
    pipeline: &PreviewPipeline,
) -> std::result::Result<String, serde_json::Error> {
    use serde::Serialize;
    use stenoscope_core::FallbackMetadata;

    #[derive(Serialize)]
    struct ReportJson<'a> {
        diagnosis: Option<&'a Diagnosis>,
        error: Option<String>,
        preview: PreviewJson<'a>,
    }

    #[derive(Serialize)]
    struct PreviewJson<'a> {
        state: &'static str,
        width: Option<u32>,
        height: Option<u32>,
        metadata: Option<&'a FallbackMetadata>,
        error: Option<&'a str>,
        render_failure: Option<&'a str>,
    }

    let state = pipeline.state();
    let (width, height) = match state {
        PreviewState::PrimaryRendered(snapshot) => (Some(snapshot.width()), Some(snapshot.height())),
        _ => (None, None),
    };
    let metadata = match state {
        PreviewState::FallbackRendered(metadata) => Some(metadata),
        _ => None,
    };

    let output = ReportJson {
        diagnosis: diagnosis.as_ref().ok(),
        error: diagnosis.as_ref().err().map(|e| e.to_string()),
        preview: PreviewJson {
            state: state.simple_name(),
            width,
            height,
            metadata,
            error: state.error_message(),
            render_failure: pipeline.last_render_failure(),
        },
    };

    serde_json::to_string_pretty(&output)
}
