use crate::types::SeverityLabel;
use log::{debug, warn};
use serde_json::Value;
use std::collections::BTreeMap;

/// Normalized class → probability table for a single model
///
/// Labels are parsed into [`SeverityLabel`], probabilities are clamped to
/// `[0, 1]` and non-finite values are dropped. The table may be partial:
/// absent labels read as probability 0 and the entries need not sum to 1.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(transparent))]
pub struct ProbabilityDistribution {
    entries: BTreeMap<SeverityLabel, f64>,
}

impl ProbabilityDistribution {
    /// Creates an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a distribution from raw `(label, probability)` pairs
    ///
    /// When two raw labels normalize to the same [`SeverityLabel`] the larger
    /// probability is kept.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut dist = Self::new();
        for (label, probability) in pairs {
            dist.insert(SeverityLabel::from_str(label.as_ref()), probability);
        }
        dist
    }

    /// Builds a distribution from the `Probabilities` JSON object
    ///
    /// Anything other than an object yields an empty distribution, and
    /// non-numeric entries are skipped.
    pub fn from_json(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::new();
        };

        let mut dist = Self::new();
        for (label, raw) in map {
            match raw.as_f64() {
                Some(p) => dist.insert(SeverityLabel::from_str(label), p),
                None => debug!("Ignoring non-numeric probability for label {:?}", label),
            }
        }
        dist
    }

    /// Inserts a single probability, normalizing it
    pub fn insert(&mut self, label: SeverityLabel, probability: f64) {
        if !probability.is_finite() {
            debug!("Dropping non-finite probability for {}", label);
            return;
        }
        // Adding 0.0 turns -0.0 into 0.0
        let p = probability.clamp(0.0, 1.0) + 0.0;
        if p != probability {
            warn!(
                "Probability {} for {} is outside [0, 1], clamped to {}",
                probability, label, p
            );
        }
        self.entries
            .entry(label)
            .and_modify(|existing| *existing = existing.max(p))
            .or_insert(p);
    }

    /// Probability of a label, 0 when absent
    pub fn probability(&self, label: &SeverityLabel) -> f64 {
        self.entries.get(label).copied().unwrap_or(0.0)
    }

    /// Whether the label is explicitly present
    pub fn contains(&self, label: &SeverityLabel) -> bool {
        self.entries.contains_key(label)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates entries in label order (Normal/Mild, Moderate, Severe, others)
    pub fn iter(&self) -> impl Iterator<Item = (&SeverityLabel, f64)> {
        self.entries.iter().map(|(label, p)| (label, *p))
    }

    /// Sum of all probabilities present
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }
}
