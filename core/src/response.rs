//! Prediction service response shape
//!
//! The service answers with a JSON object keyed by model name:
//!
//! ```json
//! {
//!   "Sagittal T1": { "Probabilities": { "Normal/Mild": 0.1, "Moderate": 0.3, "Severe": 0.6 } },
//!   "Axial T2":    { "Probabilities": { "Normal/Mild": 0.9 } }
//! }
//! ```

use crate::error::{Result, StenosisError};
use crate::types::ProbabilityDistribution;
use log::warn;
use serde_json::Value;
use std::collections::BTreeMap;

/// Key holding a model's class map
pub const PROBABILITIES_KEY: &str = "Probabilities";

/// Raw per-model outputs of one prediction request
///
/// Models are kept sorted by name so that iteration, and therefore any
/// first-wins tie-break downstream, does not depend on JSON key order.
/// A model entry without a usable `Probabilities` object is kept with an
/// empty distribution rather than rejecting the whole response.
#[derive(Debug, Clone, PartialEq, Default, serde::Deserialize)]
#[serde(try_from = "Value")]
pub struct PredictionResponse {
    models: BTreeMap<String, ProbabilityDistribution>,
}

impl PredictionResponse {
    /// Creates an empty response
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the service's JSON body
    ///
    /// # Errors
    ///
    /// Returns [`StenosisError::InvalidResponse`] if the text is not JSON or
    /// the top level is not an object.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::try_from(value)
    }

    /// Builder: Add a model's distribution
    pub fn with_model(mut self, model_name: impl Into<String>, dist: ProbabilityDistribution) -> Self {
        self.models.insert(model_name.into(), dist);
        self
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Distribution for one model
    pub fn get(&self, model_name: &str) -> Option<&ProbabilityDistribution> {
        self.models.get(model_name)
    }

    /// Iterates models in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProbabilityDistribution)> {
        self.models.iter().map(|(name, dist)| (name.as_str(), dist))
    }
}

impl TryFrom<Value> for PredictionResponse {
    type Error = StenosisError;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(StenosisError::InvalidResponse(
                "expected a JSON object keyed by model name".to_string(),
            ));
        };

        let mut response = Self::new();
        for (model_name, entry) in entries {
            let dist = match entry.get(PROBABILITIES_KEY) {
                Some(probabilities) => ProbabilityDistribution::from_json(probabilities),
                None => {
                    warn!("Model {:?} has no {} entry", model_name, PROBABILITIES_KEY);
                    ProbabilityDistribution::new()
                }
            };
            response.models.insert(model_name, dist);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SeverityLabel;

    #[test]
    fn test_parse_service_body() {
        let body = r#"{
            "Sagittal T1": {"Probabilities": {"Normal/Mild": 0.1, "Moderate": 0.3, "Severe": 0.6}},
            "Axial T2": {"Probabilities": {"Normal/Mild": 0.9}}
        }"#;
        let response = PredictionResponse::from_json_str(body).unwrap();

        assert_eq!(response.len(), 2);
        let t1 = response.get("Sagittal T1").unwrap();
        assert_eq!(t1.probability(&SeverityLabel::Severe), 0.6);

        let names: Vec<_> = response.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Axial T2", "Sagittal T1"]);
    }

    #[test]
    fn test_malformed_entry_is_empty_distribution() {
        let body = r#"{
            "Sagittal T1": {"probs": {"Severe": 0.9}},
            "Axial T2": "oops",
            "Sagittal T2/STIR": {"Probabilities": {"Moderate": 0.4}}
        }"#;
        let response = PredictionResponse::from_json_str(body).unwrap();

        assert_eq!(response.len(), 3);
        assert!(response.get("Sagittal T1").unwrap().is_empty());
        assert!(response.get("Axial T2").unwrap().is_empty());
        assert!(!response.get("Sagittal T2/STIR").unwrap().is_empty());
    }

    #[test]
    fn test_non_object_top_level_is_invalid() {
        let result = PredictionResponse::from_json_str("[1, 2, 3]");
        assert!(matches!(result, Err(StenosisError::InvalidResponse(_))));

        let result = PredictionResponse::from_json_str("not json");
        assert!(matches!(result, Err(StenosisError::InvalidResponse(_))));
    }

    #[test]
    fn test_empty_object() {
        let response = PredictionResponse::from_json_str("{}").unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_deserialize_via_serde() {
        let response: PredictionResponse =
            serde_json::from_str(r#"{"Axial T2": {"Probabilities": {"Severe": 0.7}}}"#).unwrap();
        assert_eq!(response.len(), 1);
    }
}
