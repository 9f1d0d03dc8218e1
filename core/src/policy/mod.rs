//! Severity policy
//!
//! Picks the dominant class for a single model and ranks models against each
//! other. A single model reporting `Severe`
//! outranks any number of `Normal/Mild` reports.

mod dominant;
mod ranking;

pub use dominant::dominant_class_of;
pub use ranking::rank_verdicts;
