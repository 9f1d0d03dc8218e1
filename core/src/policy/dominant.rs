use crate::error::{Result, StenosisError};
use crate::types::{AggregationConfig, DominanceStrategy, ProbabilityDistribution, SeverityLabel};
use log::debug;

/// Selects the representative severity label for one model
///
/// Dispatches on [`AggregationConfig::strategy`].
///
/// # Errors
///
/// Returns [`StenosisError::EmptyDistribution`] if the distribution has no
/// entries.
pub fn dominant_class_of(
    distribution: &ProbabilityDistribution,
    config: &AggregationConfig,
) -> Result<(SeverityLabel, f64)> {
    if distribution.is_empty() {
        return Err(StenosisError::EmptyDistribution);
    }

    let dominant = match config.strategy {
        DominanceStrategy::PriorityRule => priority_rule(distribution, config),
        DominanceStrategy::ArgMax => arg_max(distribution),
    };
    debug!(
        "Dominant class {} at {:.4} ({:?})",
        dominant.0, dominant.1, config.strategy
    );
    Ok(dominant)
}

/// Clinically conservative rule
///
/// # Algorithm
///
/// 1. Severe if P(Severe) > severe threshold
/// 2. Moderate if P(Moderate) > moderate threshold
/// 3. Normal/Mild otherwise, with P(Normal/Mild) (0 when absent)
fn priority_rule(
    distribution: &ProbabilityDistribution,
    config: &AggregationConfig,
) -> (SeverityLabel, f64) {
    let severe = distribution.probability(&SeverityLabel::Severe);
    if severe > config.severe_threshold {
        return (SeverityLabel::Severe, severe);
    }

    let moderate = distribution.probability(&SeverityLabel::Moderate);
    if moderate > config.moderate_threshold {
        return (SeverityLabel::Moderate, moderate);
    }

    (
        SeverityLabel::NormalMild,
        distribution.probability(&SeverityLabel::NormalMild),
    )
}

/// Plain arg-max; exact ties go to the higher severity rank
fn arg_max(distribution: &ProbabilityDistribution) -> (SeverityLabel, f64) {
    let mut best: Option<(&SeverityLabel, f64)> = None;
    for (label, p) in distribution.iter() {
        best = match best {
            Some((best_label, best_p))
                if best_p > p || (best_p == p && best_label.rank() >= label.rank()) =>
            {
                Some((best_label, best_p))
            }
            _ => Some((label, p)),
        };
    }

    // Non-empty is checked by the caller
    best.map(|(label, p)| (label.clone(), p))
        .unwrap_or((SeverityLabel::NormalMild, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dist(pairs: &[(&str, f64)]) -> ProbabilityDistribution {
        ProbabilityDistribution::from_pairs(pairs.iter().copied())
    }

    #[rstest]
    #[case(&[("Severe", 0.51), ("Moderate", 0.49)], SeverityLabel::Severe)]
    #[case(&[("Severe", 0.6), ("Normal/Mild", 0.99)], SeverityLabel::Severe)]
    #[case(&[("Severe", 0.5), ("Moderate", 0.31)], SeverityLabel::Moderate)]
    #[case(&[("Severe", 0.45), ("Moderate", 0.35), ("Normal/Mild", 0.2)], SeverityLabel::Moderate)]
    #[case(&[("Severe", 0.5), ("Moderate", 0.3), ("Normal/Mild", 0.2)], SeverityLabel::NormalMild)]
    #[case(&[("Normal/Mild", 0.9), ("Moderate", 0.05), ("Severe", 0.05)], SeverityLabel::NormalMild)]
    #[case(&[("Other", 0.9)], SeverityLabel::NormalMild)]
    fn test_priority_rule(#[case] pairs: &[(&str, f64)], #[case] expected: SeverityLabel) {
        let (label, _) = dominant_class_of(&dist(pairs), &AggregationConfig::default()).unwrap();
        assert_eq!(label, expected);
    }

    #[test]
    fn test_priority_rule_reports_label_probability() {
        let d = dist(&[("Severe", 0.1), ("Moderate", 0.2)]);
        let (label, p) = dominant_class_of(&d, &AggregationConfig::default()).unwrap();
        assert_eq!(label, SeverityLabel::NormalMild);
        assert_eq!(p, 0.0);

        let d = dist(&[("Severe", 0.6), ("Moderate", 0.3), ("Normal/Mild", 0.1)]);
        let (label, p) = dominant_class_of(&d, &AggregationConfig::default()).unwrap();
        assert_eq!(label, SeverityLabel::Severe);
        assert_eq!(p, 0.6);
    }

    #[test]
    fn test_priority_rule_respects_configured_thresholds() {
        let config = AggregationConfig::default().with_severe_threshold(0.7);
        let d = dist(&[("Severe", 0.6), ("Moderate", 0.35)]);
        let (label, _) = dominant_class_of(&d, &config).unwrap();
        assert_eq!(label, SeverityLabel::Moderate);
    }

    #[test]
    fn test_arg_max() {
        let config = AggregationConfig::default().with_strategy(DominanceStrategy::ArgMax);
        let d = dist(&[("Severe", 0.6), ("Normal/Mild", 0.1), ("Moderate", 0.3)]);
        assert_eq!(
            dominant_class_of(&d, &config).unwrap(),
            (SeverityLabel::Severe, 0.6)
        );

        let d = dist(&[("Severe", 0.2), ("Normal/Mild", 0.7)]);
        assert_eq!(
            dominant_class_of(&d, &config).unwrap(),
            (SeverityLabel::NormalMild, 0.7)
        );
    }

    #[test]
    fn test_arg_max_tie_prefers_more_severe() {
        let config = AggregationConfig::default().with_strategy(DominanceStrategy::ArgMax);
        let d = dist(&[("Normal/Mild", 0.4), ("Moderate", 0.4), ("Severe", 0.2)]);
        let (label, _) = dominant_class_of(&d, &config).unwrap();
        assert_eq!(label, SeverityLabel::Moderate);
    }

    #[test]
    fn test_strategies_can_disagree() {
        let d = dist(&[("Severe", 0.35), ("Moderate", 0.31), ("Normal/Mild", 0.34)]);
        let priority = dominant_class_of(&d, &AggregationConfig::default()).unwrap();
        let argmax = dominant_class_of(
            &d,
            &AggregationConfig::default().with_strategy(DominanceStrategy::ArgMax),
        )
        .unwrap();
        assert_eq!(priority.0, SeverityLabel::Moderate);
        assert_eq!(argmax.0, SeverityLabel::Severe);
    }

    #[rstest]
    #[case(DominanceStrategy::PriorityRule)]
    #[case(DominanceStrategy::ArgMax)]
    fn test_empty_distribution(#[case] strategy: DominanceStrategy) {
        let config = AggregationConfig::default().with_strategy(strategy);
        let result = dominant_class_of(&ProbabilityDistribution::new(), &config);
        assert!(matches!(result, Err(StenosisError::EmptyDistribution)));
    }
}
