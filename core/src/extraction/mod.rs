pub mod metadata;
pub mod object;
pub mod pixels;
pub mod tags;

pub use metadata::{extract_fallback_metadata, DicomMetadataReader, FallbackMetadata};
pub use object::open_from_bytes;
pub use pixels::PixelDataRenderer;
pub use tags::*;
