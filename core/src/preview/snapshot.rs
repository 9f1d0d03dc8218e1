use crate::error::{Result, StenosisError};
use std::fmt;
use std::path::Path;

/// Still RGBA8 image captured from the primary renderer
#[derive(Clone, PartialEq, Eq)]
pub struct RasterSnapshot {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RasterSnapshot {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self { width, height, rgba }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }

    /// A frame is renderable when it has an area and a full RGBA buffer
    pub fn is_renderable(&self) -> bool {
        let expected = self.width as usize * self.height as usize * 4;
        expected > 0 && self.rgba.len() == expected
    }

    /// Writes the snapshot as an image file (format from the extension)
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is not renderable or encoding fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let image = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| {
                StenosisError::RenderFailure("snapshot buffer does not match its size".to_string())
            })?;
        image
            .save(path)
            .map_err(|e| StenosisError::RenderFailure(format!("cannot write snapshot: {}", e)))
    }
}

// Pixel buffers are not worth printing
impl fmt::Debug for RasterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSnapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_renderable() {
        assert!(RasterSnapshot::new(2, 1, vec![0; 8]).is_renderable());
        assert!(!RasterSnapshot::new(0, 0, Vec::new()).is_renderable());
        assert!(!RasterSnapshot::new(2, 2, vec![0; 8]).is_renderable());
    }

    #[test]
    fn test_save_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preview.png");
        RasterSnapshot::new(1, 1, vec![255, 0, 0, 255])
            .save(&path)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_mismatched_buffer() {
        let temp_dir = TempDir::new().unwrap();
        let result = RasterSnapshot::new(4, 4, vec![0; 3]).save(&temp_dir.path().join("x.png"));
        assert!(matches!(result, Err(StenosisError::RenderFailure(_))));
    }
}
