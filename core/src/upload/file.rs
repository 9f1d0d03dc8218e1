use crate::error::Result;
use crate::extraction::tags::looks_like_dicom;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// File chosen for upload and preview
///
/// Immutable once selected. Cloning shares the underlying bytes, so the
/// upload path and the preview pipeline read the same buffer independently.
#[derive(Clone, PartialEq)]
pub struct SelectedFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// File name used for the multipart upload
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle on the bytes, for work that outlives a borrow
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Accepts .dcm and .dicom extensions (case-insensitive)
    pub fn has_dicom_extension(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom"))
            .unwrap_or(false)
    }

    /// Checks for the "DICM" magic code
    pub fn has_dicom_header(&self) -> bool {
        looks_like_dicom(&self.bytes)
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
