use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Identification tags shown by the metadata-only preview
pub use dicom_dictionary_std::tags::{
    COLUMNS, MODALITY, PATIENT_ID, PATIENT_NAME, ROWS, STUDY_DATE,
};

/// Offset of the "DICM" magic code in a file with a preamble
pub const PREAMBLE_LEN: usize = 128;

/// Magic code preceding the file meta group
pub const DICM_MAGIC: &[u8; 4] = b"DICM";

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present, cannot be converted to string,
/// or is blank
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Helper to get u16 value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to u16
pub fn get_u16_value(dcm: &InMemDicomObject, tag: Tag) -> Option<u16> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<u16>().ok())
}

/// Checks whether bytes start with a 128-byte preamble followed by "DICM"
pub fn has_preamble(bytes: &[u8]) -> bool {
    bytes.len() >= PREAMBLE_LEN + DICM_MAGIC.len()
        && &bytes[PREAMBLE_LEN..PREAMBLE_LEN + DICM_MAGIC.len()] == DICM_MAGIC
}

/// Checks whether bytes look like a DICOM file, with or without preamble
pub fn looks_like_dicom(bytes: &[u8]) -> bool {
    has_preamble(bytes) || bytes.starts_with(DICM_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    #[test]
    fn test_tag_values() {
        assert_eq!(PATIENT_NAME, Tag(0x0010, 0x0010));
        assert_eq!(PATIENT_ID, Tag(0x0010, 0x0020));
        assert_eq!(STUDY_DATE, Tag(0x0008, 0x0020));
        assert_eq!(MODALITY, Tag(0x0008, 0x0060));
        assert_eq!(ROWS, Tag(0x0028, 0x0010));
        assert_eq!(COLUMNS, Tag(0x0028, 0x0011));
    }

    #[test]
    fn test_get_values() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            PATIENT_ID,
            VR::LO,
            PrimitiveValue::from("PID-42 "),
        ));
        dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("  ")));
        dcm.put(DataElement::new(ROWS, VR::US, PrimitiveValue::from(512_u16)));

        assert_eq!(get_string_value(&dcm, PATIENT_ID), Some("PID-42".to_string()));
        assert_eq!(get_string_value(&dcm, MODALITY), None);
        assert_eq!(get_string_value(&dcm, PATIENT_NAME), None);
        assert_eq!(get_u16_value(&dcm, ROWS), Some(512));
        assert_eq!(get_u16_value(&dcm, COLUMNS), None);
    }

    #[test]
    fn test_magic_detection() {
        let mut with_preamble = vec![0u8; PREAMBLE_LEN];
        with_preamble.extend_from_slice(b"DICM");
        assert!(has_preamble(&with_preamble));
        assert!(looks_like_dicom(&with_preamble));

        assert!(!has_preamble(b"DICMxxxx"));
        assert!(looks_like_dicom(b"DICMxxxx"));

        let mut wrong_magic = vec![0u8; PREAMBLE_LEN];
        wrong_magic.extend_from_slice(b"NOTM");
        assert!(!looks_like_dicom(&wrong_magic));
        assert!(!looks_like_dicom(b"small"));
    }
}
