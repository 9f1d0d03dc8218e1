use crate::types::DominanceStrategy;
use std::time::Duration;

/// Default Severe threshold for the priority rule
pub const DEFAULT_SEVERE_THRESHOLD: f64 = 0.5;

/// Default Moderate threshold for the priority rule
pub const DEFAULT_MODERATE_THRESHOLD: f64 = 0.3;

/// Default primary render timeout
pub const DEFAULT_PRIMARY_TIMEOUT: Duration = Duration::from_millis(1000);

/// Configuration for picking each model's dominant class
///
/// Thresholds are strict: `Severe` wins only when its probability is
/// greater than `severe_threshold`.
///
/// # Example
///
/// ```
/// use stenoscope_core::{AggregationConfig, DominanceStrategy};
///
/// let config = AggregationConfig::default()
///     .with_strategy(DominanceStrategy::ArgMax)
///     .with_severe_threshold(0.6);
///
/// assert_eq!(config.strategy, DominanceStrategy::ArgMax);
/// assert_eq!(config.severe_threshold, 0.6);
/// assert_eq!(config.moderate_threshold, 0.3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregationConfig {
    /// Dominant class strategy
    pub strategy: DominanceStrategy,

    /// Severe wins above this probability (priority rule only)
    pub severe_threshold: f64,

    /// Moderate wins above this probability (priority rule only)
    pub moderate_threshold: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            strategy: DominanceStrategy::PriorityRule,
            severe_threshold: DEFAULT_SEVERE_THRESHOLD,
            moderate_threshold: DEFAULT_MODERATE_THRESHOLD,
        }
    }
}

impl AggregationConfig {
    /// Builder: Set the dominant class strategy
    pub fn with_strategy(mut self, strategy: DominanceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder: Set the Severe threshold
    pub fn with_severe_threshold(mut self, threshold: f64) -> Self {
        self.severe_threshold = threshold;
        self
    }

    /// Builder: Set the Moderate threshold
    pub fn with_moderate_threshold(mut self, threshold: f64) -> Self {
        self.moderate_threshold = threshold;
        self
    }
}

/// Configuration for the image preview pipeline
///
/// # Example
///
/// ```
/// use stenoscope_core::PreviewConfig;
/// use std::time::Duration;
///
/// let config = PreviewConfig::default().with_primary_timeout(Duration::from_millis(250));
/// assert_eq!(config.primary_timeout, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewConfig {
    /// How long the primary renderer may take before falling back
    pub primary_timeout: Duration,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            primary_timeout: DEFAULT_PRIMARY_TIMEOUT,
        }
    }
}

impl PreviewConfig {
    /// Builder: Set the primary render timeout
    pub fn with_primary_timeout(mut self, timeout: Duration) -> Self {
        self.primary_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_defaults() {
        let config = AggregationConfig::default();
        assert_eq!(config.strategy, DominanceStrategy::PriorityRule);
        assert_eq!(config.severe_threshold, 0.5);
        assert_eq!(config.moderate_threshold, 0.3);
    }

    #[test]
    fn test_preview_default_timeout_is_one_second() {
        assert_eq!(
            PreviewConfig::default().primary_timeout,
            Duration::from_secs(1)
        );
    }
}
