pub mod api;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod policy;
pub mod preview;
pub mod response;
pub mod types;
pub mod upload;

pub use api::{run_session, Diagnosis, ResultAggregator};
pub use cli::report::{NoPredictionReport, PreviewReport, TextReport};
pub use error::{Result, StenosisError};
pub use extraction::{DicomMetadataReader, FallbackMetadata, PixelDataRenderer};
pub use policy::{dominant_class_of, rank_verdicts};
pub use preview::{PreviewPipeline, PreviewState, RasterSnapshot};
pub use response::PredictionResponse;
pub use types::*;
pub use upload::{PredictionClient, SelectedFile, UploadController};
