use crate::error::Result;
use dicom_object::DefaultDicomObject;

use super::tags::{has_preamble, PREAMBLE_LEN};

/// Opens a DICOM file held in memory
///
/// Accepts files with the standard 128-byte preamble as well as files that
/// start directly with the "DICM" magic code.
///
/// # Errors
///
/// Returns [`crate::StenosisError::DicomError`] if the bytes are not a
/// DICOM file.
pub fn open_from_bytes(bytes: &[u8]) -> Result<DefaultDicomObject> {
    let body = if has_preamble(bytes) {
        &bytes[PREAMBLE_LEN..]
    } else {
        bytes
    };
    Ok(dicom_object::from_reader(body)?)
}
