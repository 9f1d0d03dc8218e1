use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Severity label reported by a stenosis model
///
/// The closed set is `Normal/Mild`, `Moderate` and `Severe`. Labels outside
/// that set are kept verbatim so new model outputs never get dropped, but they
/// rank below every known label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(into = "String"))]
pub enum SeverityLabel {
    NormalMild,
    Moderate,
    Severe,
    Other(String),
}

impl SeverityLabel {
    /// Fixed clinical severity rank used to compare models
    ///
    /// `Severe`=3, `Moderate`=2, `Normal/Mild`=1, anything else 0.
    pub fn rank(&self) -> u8 {
        match self {
            SeverityLabel::Severe => 3,
            SeverityLabel::Moderate => 2,
            SeverityLabel::NormalMild => 1,
            SeverityLabel::Other(_) => 0,
        }
    }

    /// Returns whether this label is outside the known set
    pub fn is_unknown(&self) -> bool {
        matches!(self, SeverityLabel::Other(_))
    }

    /// Display name as produced by the prediction service
    pub fn simple_name(&self) -> &str {
        match self {
            SeverityLabel::NormalMild => "Normal/Mild",
            SeverityLabel::Moderate => "Moderate",
            SeverityLabel::Severe => "Severe",
            SeverityLabel::Other(s) => s.as_str(),
        }
    }

    /// Parses a severity label, tolerating case and separator variations
    ///
    /// Accepts `Normal/Mild`, `normal_mild`, `Normal - Mild`, `MODERATE`, ...
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        static NORMAL_MILD: OnceLock<Regex> = OnceLock::new();
        let normal_mild = NORMAL_MILD.get_or_init(|| {
            Regex::new(r"(?i)^normal\s*[/_\-\s]?\s*mild$").expect("Failed to compile regex")
        });

        let trimmed = s.trim();
        if normal_mild.is_match(trimmed) {
            return SeverityLabel::NormalMild;
        }
        match trimmed.to_lowercase().as_str() {
            "moderate" => SeverityLabel::Moderate,
            "severe" => SeverityLabel::Severe,
            _ => SeverityLabel::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

impl From<SeverityLabel> for String {
    fn from(label: SeverityLabel) -> Self {
        label.simple_name().to_string()
    }
}

/// Clinical stenosis category associated with an imaging sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum StenosisType {
    /// Sentinel for model names missing from the lookup table
    Unknown,
    SpinalCanal,
    Subarticular,
    NeuralForaminal,
}

impl StenosisType {
    /// Returns whether this type is the unknown sentinel
    pub fn is_unknown(&self) -> bool {
        matches!(self, StenosisType::Unknown)
    }

    /// Returns the clinical display name
    pub fn simple_name(&self) -> &'static str {
        match self {
            StenosisType::Unknown => "Unknown",
            StenosisType::SpinalCanal => "Spinal Canal Stenosis",
            StenosisType::Subarticular => "Subarticular Stenosis",
            StenosisType::NeuralForaminal => "Neural Foraminal Narrowing",
        }
    }
}

impl fmt::Display for StenosisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Strategy for picking the dominant class of a single model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "kebab-case"))]
pub enum DominanceStrategy {
    /// Severe above its threshold wins, then Moderate above its threshold,
    /// otherwise Normal/Mild
    #[default]
    PriorityRule,

    /// Plain arg-max over the distribution; exact ties go to the more
    /// severe label
    ArgMax,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Normal/Mild", SeverityLabel::NormalMild)]
    #[case("normal_mild", SeverityLabel::NormalMild)]
    #[case("Normal - Mild", SeverityLabel::NormalMild)]
    #[case(" NORMAL MILD ", SeverityLabel::NormalMild)]
    #[case("Moderate", SeverityLabel::Moderate)]
    #[case("moderate", SeverityLabel::Moderate)]
    #[case("SEVERE", SeverityLabel::Severe)]
    #[case("Critical", SeverityLabel::Other("Critical".to_string()))]
    fn test_severity_label_from_str(#[case] input: &str, #[case] expected: SeverityLabel) {
        assert_eq!(SeverityLabel::from_str(input), expected);
    }

    #[test]
    fn test_severity_rank() {
        assert_eq!(SeverityLabel::Severe.rank(), 3);
        assert_eq!(SeverityLabel::Moderate.rank(), 2);
        assert_eq!(SeverityLabel::NormalMild.rank(), 1);
        assert_eq!(SeverityLabel::Other("x".to_string()).rank(), 0);
    }

    #[test]
    fn test_severity_display_roundtrips_service_names() {
        for name in ["Normal/Mild", "Moderate", "Severe"] {
            assert_eq!(SeverityLabel::from_str(name).to_string(), name);
        }
    }

    #[test]
    fn test_stenosis_type_display() {
        assert_eq!(StenosisType::Unknown.to_string(), "Unknown");
        assert_eq!(
            StenosisType::SpinalCanal.to_string(),
            "Spinal Canal Stenosis"
        );
        assert!(StenosisType::Unknown.is_unknown());
        assert!(!StenosisType::Subarticular.is_unknown());
    }

    #[test]
    fn test_default_strategy_is_priority_rule() {
        assert_eq!(DominanceStrategy::default(), DominanceStrategy::PriorityRule);
    }
}
