//! Image preview pipeline
//!
//! Attempts a full render of the selected file and degrades to a
//! metadata-only view when rendering fails or takes too long.

mod handle;
mod pipeline;
mod snapshot;
mod state;

pub use handle::{FileHandle, HandleRegistry};
pub use pipeline::{FallbackReader, PreviewPipeline, PreviewTicket, PrimaryRenderer, Transition};
pub use snapshot::RasterSnapshot;
pub use state::PreviewState;
