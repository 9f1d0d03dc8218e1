use thiserror::Error;

/// Result type for stenoscope operations
pub type Result<T> = std::result::Result<T, StenosisError>;

/// Error types for stenoscope operations
#[derive(Error, Debug)]
pub enum StenosisError {
    /// A model reported a class map with no entries
    #[error("Empty probability distribution")]
    EmptyDistribution,

    /// No model produced a usable verdict
    #[error("No prediction available: no model produced a usable verdict")]
    NoVerdicts,

    /// The prediction response contained no models
    #[error("No prediction available: the response contained no models")]
    EmptyResponse,

    /// The prediction response did not have the expected shape
    #[error("Invalid prediction response: {0}")]
    InvalidResponse(String),

    /// Primary renderer could not produce a frame
    #[error("Render failure: {0}")]
    RenderFailure(String),

    /// Fallback metadata reader could not parse the file
    #[error("Cannot parse DICOM: {0}")]
    ParseFailure(String),

    /// Submission attempted without a selected file
    #[error("Please select a DICOM file first.")]
    NoFileSelected,

    /// Prediction service transport error
    #[error("Prediction request failed: {0}")]
    HttpError(String),

    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StenosisError {
    /// Whether the error means "no prediction available" rather than a fault
    pub fn is_no_prediction(&self) -> bool {
        matches!(
            self,
            StenosisError::NoVerdicts | StenosisError::EmptyResponse
        )
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for StenosisError {
    fn from(e: dicom_object::ReadError) -> Self {
        StenosisError::DicomError(format!("{}", e))
    }
}

impl From<serde_json::Error> for StenosisError {
    fn from(e: serde_json::Error) -> Self {
        StenosisError::InvalidResponse(format!("{}", e))
    }
}

impl From<reqwest::Error> for StenosisError {
    fn from(e: reqwest::Error) -> Self {
        StenosisError::HttpError(format!("{}", e))
    }
}
