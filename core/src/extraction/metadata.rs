use crate::error::{Result, StenosisError};
use crate::preview::FallbackReader;
use dicom_object::InMemDicomObject;

use super::object::open_from_bytes;
use super::tags::{
    get_string_value, get_u16_value, COLUMNS, MODALITY, PATIENT_ID, PATIENT_NAME, ROWS, STUDY_DATE,
};

/// Placeholder for missing identification fields
pub const UNKNOWN_VALUE: &str = "Unknown";

/// Identification fields shown when the image itself cannot be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FallbackMetadata {
    pub patient_name: String,
    pub patient_id: String,
    pub study_date: String,
    pub modality: String,

    /// Image height in pixels (0 when absent)
    pub rows: u16,

    /// Image width in pixels (0 when absent)
    pub columns: u16,
}

impl Default for FallbackMetadata {
    fn default() -> Self {
        Self {
            patient_name: UNKNOWN_VALUE.to_string(),
            patient_id: UNKNOWN_VALUE.to_string(),
            study_date: UNKNOWN_VALUE.to_string(),
            modality: UNKNOWN_VALUE.to_string(),
            rows: 0,
            columns: 0,
        }
    }
}

impl FallbackMetadata {
    /// Image size as "columns x rows pixels"
    pub fn image_size(&self) -> String {
        format!("{} x {} pixels", self.columns, self.rows)
    }
}

/// Extracts the fallback fields from a data set
///
/// Missing strings become "Unknown", missing dimensions become 0.
pub fn extract_fallback_metadata(dcm: &InMemDicomObject) -> FallbackMetadata {
    let text = |tag| get_string_value(dcm, tag).unwrap_or_else(|| UNKNOWN_VALUE.to_string());

    FallbackMetadata {
        patient_name: text(PATIENT_NAME),
        patient_id: text(PATIENT_ID),
        study_date: text(STUDY_DATE),
        modality: text(MODALITY),
        rows: get_u16_value(dcm, ROWS).unwrap_or(0),
        columns: get_u16_value(dcm, COLUMNS).unwrap_or(0),
    }
}

/// Fallback reader backed by the DICOM tag parser
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomMetadataReader;

impl DicomMetadataReader {
    /// Parses bytes synchronously
    ///
    /// # Errors
    ///
    /// Returns [`StenosisError::ParseFailure`] if the bytes are empty or not
    /// a DICOM file.
    pub fn parse(bytes: &[u8]) -> Result<FallbackMetadata> {
        if bytes.is_empty() {
            return Err(StenosisError::ParseFailure("file is empty".to_string()));
        }
        let obj = open_from_bytes(bytes).map_err(|e| match e {
            StenosisError::DicomError(msg) => StenosisError::ParseFailure(msg),
            other => other,
        })?;
        Ok(extract_fallback_metadata(&obj))
    }
}

impl FallbackReader for DicomMetadataReader {
    async fn read(&self, bytes: &[u8]) -> Result<FallbackMetadata> {
        Self::parse(bytes)
    }
}
