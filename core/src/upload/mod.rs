//! Upload controller
//!
//! Holds the selected file and submits it to the prediction service.

mod client;
mod file;

pub use client::{PredictionClient, PredictionService, DEFAULT_ENDPOINT, FILE_FIELD};
pub use file::SelectedFile;

use crate::error::{Result, StenosisError};
use crate::response::PredictionResponse;
use log::warn;

/// Owns the selected-file state for one session
pub struct UploadController<S> {
    service: S,
    selected: Option<SelectedFile>,
}

impl<S: PredictionService> UploadController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            selected: None,
        }
    }

    /// Replaces the current selection
    ///
    /// Files without a `.dcm`/`.dicom` extension are accepted with a warning.
    pub fn select(&mut self, file: SelectedFile) -> &SelectedFile {
        if !file.has_dicom_extension() {
            warn!("{} does not have a DICOM extension", file.name());
        }
        self.selected.insert(file)
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Submits the selected file
    ///
    /// # Errors
    ///
    /// Returns [`StenosisError::NoFileSelected`] when nothing is selected,
    /// otherwise whatever the service reports.
    pub async fn submit(&self) -> Result<PredictionResponse> {
        let file = self.selected.as_ref().ok_or(StenosisError::NoFileSelected)?;
        self.service.predict(file).await
    }
}
