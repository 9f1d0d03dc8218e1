use crate::error::Result;
use crate::response::PredictionResponse;
use crate::upload::SelectedFile;
use log::{debug, info};
use serde_json::Value;

/// Default prediction endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict";

/// Multipart field carrying the file
pub const FILE_FIELD: &str = "file";

/// Remote model inference
#[allow(async_fn_in_trait)]
pub trait PredictionService {
    /// Submits one file and returns the per-model outputs
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResponse>;
}

/// HTTP client for the prediction service
///
/// Posts the file as `multipart/form-data` with a single `file` field and
/// parses the JSON body into a [`PredictionResponse`].
#[derive(Debug, Clone)]
pub struct PredictionClient {
    endpoint: String,
    client: reqwest::Client,
}

impl Default for PredictionClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl PredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PredictionService for PredictionClient {
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResponse> {
        info!("Submitting {} ({} bytes) to {}", file.name(), file.len(), self.endpoint);

        let part = reqwest::multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str("application/dicom")?;
        let form = reqwest::multipart::Form::new().part(FILE_FIELD, part);

        let body: Value = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("Prediction result: {}", body);

        PredictionResponse::try_from(body)
    }
}
