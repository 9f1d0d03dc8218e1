use crate::types::{ProbabilityDistribution, SeverityLabel, StenosisType};
use std::fmt;

/// One model's output from a prediction response
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ModelResult {
    /// Imaging sequence / model identifier (e.g. "Sagittal T1")
    pub model_name: String,

    /// Clinical type resolved from the model name
    pub stenosis_type: StenosisType,

    /// Normalized class probabilities
    pub distribution: ProbabilityDistribution,
}

/// Dominant class chosen for a single model
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ModelVerdict {
    pub model_name: String,
    pub dominant_class: SeverityLabel,
    pub dominant_probability: f64,
    pub stenosis_type: StenosisType,
}

impl ModelVerdict {
    pub fn new(
        model_name: impl Into<String>,
        dominant_class: SeverityLabel,
        dominant_probability: f64,
        stenosis_type: StenosisType,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            dominant_class,
            dominant_probability,
            stenosis_type,
        }
    }

    /// Checks if this verdict outranks another
    ///
    /// Priority order:
    /// 1. Higher severity rank
    /// 2. Higher dominant probability
    ///
    /// Returns `false` on an exact tie, so callers keep the verdict they saw
    /// first.
    pub fn outranks(&self, other: &ModelVerdict) -> bool {
        let (self_rank, other_rank) = (self.dominant_class.rank(), other.dominant_class.rank());
        if self_rank != other_rank {
            return self_rank > other_rank;
        }
        self.dominant_probability
            .partial_cmp(&other.dominant_probability)
            .is_some_and(|ordering| ordering.is_gt())
    }
}

impl fmt::Display for ModelVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({:.2}%)",
            self.model_name,
            self.dominant_class,
            self.dominant_probability * 100.0
        )
    }
}

/// Overall result selected across all models
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct FinalDiagnosis {
    pub stenosis_type: StenosisType,
    pub severity_class: SeverityLabel,
    pub supporting_model_name: String,
}

impl From<&ModelVerdict> for FinalDiagnosis {
    fn from(verdict: &ModelVerdict) -> Self {
        Self {
            stenosis_type: verdict.stenosis_type,
            severity_class: verdict.dominant_class.clone(),
            supporting_model_name: verdict.model_name.clone(),
        }
    }
}

impl fmt::Display for FinalDiagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (from {})",
            self.stenosis_type, self.severity_class, self.supporting_model_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(label: SeverityLabel, p: f64) -> ModelVerdict {
        ModelVerdict::new("m", label, p, StenosisType::Unknown)
    }

    #[test]
    fn test_outranks_by_severity_before_probability() {
        let severe = verdict(SeverityLabel::Severe, 0.51);
        let moderate = verdict(SeverityLabel::Moderate, 0.99);
        assert!(severe.outranks(&moderate));
        assert!(!moderate.outranks(&severe));
    }

    #[test]
    fn test_outranks_by_probability_within_rank() {
        let high = verdict(SeverityLabel::Moderate, 0.6);
        let low = verdict(SeverityLabel::Moderate, 0.4);
        assert!(high.outranks(&low));
        assert!(!low.outranks(&high));
    }

    #[test]
    fn test_exact_tie_does_not_outrank() {
        let a = verdict(SeverityLabel::Severe, 0.7);
        let b = verdict(SeverityLabel::Severe, 0.7);
        assert!(!a.outranks(&b));
        assert!(!b.outranks(&a));
    }

    #[test]
    fn test_signed_zeros_are_a_tie() {
        let positive = verdict(SeverityLabel::NormalMild, 0.0);
        let negative = verdict(SeverityLabel::NormalMild, -0.0);
        assert!(!positive.outranks(&negative));
        assert!(!negative.outranks(&positive));
    }

    #[test]
    fn test_unknown_label_ranks_lowest() {
        let unknown = verdict(SeverityLabel::Other("Indeterminate".to_string()), 1.0);
        let normal = verdict(SeverityLabel::NormalMild, 0.1);
        assert!(normal.outranks(&unknown));
    }

    #[test]
    fn test_final_diagnosis_from_verdict() {
        let v = ModelVerdict::new(
            "Sagittal T1",
            SeverityLabel::Severe,
            0.6,
            StenosisType::NeuralForaminal,
        );
        let diagnosis = FinalDiagnosis::from(&v);
        assert_eq!(diagnosis.severity_class, SeverityLabel::Severe);
        assert_eq!(diagnosis.supporting_model_name, "Sagittal T1");
        assert_eq!(
            diagnosis.to_string(),
            "Neural Foraminal Narrowing - Severe (from Sagittal T1)"
        );
    }
}
