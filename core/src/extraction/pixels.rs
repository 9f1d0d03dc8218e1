use crate::error::{Result, StenosisError};
use crate::preview::{FileHandle, PrimaryRenderer, RasterSnapshot};
use dicom_pixeldata::PixelDecoder;
use log::debug;

use super::object::open_from_bytes;

/// Primary renderer backed by the DICOM pixel data decoder
///
/// Decodes the first frame on tokio's blocking pool so the preview timeout
/// can still fire while a slow codec runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelDataRenderer;

impl PixelDataRenderer {
    /// Decodes the first frame into an RGBA snapshot
    ///
    /// # Errors
    ///
    /// Returns [`StenosisError::RenderFailure`] if the file cannot be opened,
    /// has no pixel data, or uses a transfer syntax without a decoder.
    pub fn decode_first_frame(bytes: &[u8]) -> Result<RasterSnapshot> {
        let obj = open_from_bytes(bytes).map_err(|e| render_failure(&e))?;
        debug!(
            "Decoding pixel data (transfer syntax {})",
            obj.meta().transfer_syntax()
        );

        let decoded = obj.decode_pixel_data().map_err(|e| render_failure(&e))?;
        let image = decoded.to_dynamic_image(0).map_err(|e| render_failure(&e))?;
        let rgba = image.to_rgba8();

        Ok(RasterSnapshot::new(rgba.width(), rgba.height(), rgba.into_raw()))
    }
}

impl PrimaryRenderer for PixelDataRenderer {
    async fn render(&self, handle: &FileHandle) -> Result<RasterSnapshot> {
        let bytes = handle.file().shared_bytes();
        tokio::task::spawn_blocking(move || Self::decode_first_frame(&bytes))
            .await
            .map_err(|e| StenosisError::RenderFailure(format!("decoder task failed: {}", e)))?
    }
}

fn render_failure(e: &dyn std::fmt::Display) -> StenosisError {
    StenosisError::RenderFailure(e.to_string())
}
