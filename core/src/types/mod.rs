//! Core type definitions for stenosis prediction results
//!
//! This module provides the fundamental types used throughout the stenoscope library:
//! - [`SeverityLabel`]: Severity classes reported by the models (Normal/Mild, Moderate, Severe)
//! - [`StenosisType`]: Clinical stenosis category of an imaging sequence
//! - [`DominanceStrategy`]: Strategies for picking one model's dominant class
//! - [`ProbabilityDistribution`]: Normalized class → probability table
//! - [`ModelResult`], [`ModelVerdict`], [`FinalDiagnosis`]: Per-model and overall results
//! - [`AggregationConfig`], [`PreviewConfig`]: Tunables for aggregation and preview
//! - [`StenosisLookup`]: Model name → stenosis type table

mod config;
mod distribution;
mod enums;
mod lookup;
mod verdict;

pub use config::{
    AggregationConfig, PreviewConfig, DEFAULT_MODERATE_THRESHOLD, DEFAULT_PRIMARY_TIMEOUT,
    DEFAULT_SEVERE_THRESHOLD,
};
pub use distribution::ProbabilityDistribution;
pub use enums::{DominanceStrategy, SeverityLabel, StenosisType};
pub use lookup::{StenosisLookup, DEFAULT_STENOSIS_TABLE};
pub use verdict::{FinalDiagnosis, ModelResult, ModelVerdict};
