use crate::types::StenosisType;
use std::collections::HashMap;

/// Default model name → stenosis type table
pub const DEFAULT_STENOSIS_TABLE: [(&str, StenosisType); 3] = [
    ("Sagittal T1", StenosisType::NeuralForaminal),
    ("Sagittal T2/STIR", StenosisType::SpinalCanal),
    ("Axial T2", StenosisType::Subarticular),
];

/// Model name → clinical stenosis type lookup
///
/// Keys are matched case-insensitively after trimming. Names missing from the
/// table resolve to [`StenosisType::Unknown`].
///
/// # Example
///
/// ```
/// use stenoscope_core::{StenosisLookup, StenosisType};
///
/// let lookup = StenosisLookup::default().with_entry("Axial STIR", StenosisType::Subarticular);
///
/// assert_eq!(lookup.resolve("sagittal t1"), StenosisType::NeuralForaminal);
/// assert_eq!(lookup.resolve("Axial STIR"), StenosisType::Subarticular);
/// assert_eq!(lookup.resolve("Coronal T2"), StenosisType::Unknown);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StenosisLookup {
    table: HashMap<String, StenosisType>,
}

impl Default for StenosisLookup {
    fn default() -> Self {
        DEFAULT_STENOSIS_TABLE
            .iter()
            .fold(Self::empty(), |lookup, (name, kind)| {
                lookup.with_entry(name, *kind)
            })
    }
}

impl StenosisLookup {
    /// Creates a lookup with no entries (everything resolves to Unknown)
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Builder: Add or replace a mapping
    pub fn with_entry(mut self, model_name: &str, stenosis_type: StenosisType) -> Self {
        self.table.insert(normalize_key(model_name), stenosis_type);
        self
    }

    /// Resolves a model name, never failing
    pub fn resolve(&self, model_name: &str) -> StenosisType {
        self.table
            .get(&normalize_key(model_name))
            .copied()
            .unwrap_or(StenosisType::Unknown)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn normalize_key(model_name: &str) -> String {
    model_name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let lookup = StenosisLookup::default();
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.resolve("Sagittal T2/STIR"), StenosisType::SpinalCanal);
        assert_eq!(lookup.resolve("  AXIAL T2 "), StenosisType::Subarticular);
    }

    #[test]
    fn test_unknown_model_is_sentinel() {
        assert_eq!(
            StenosisLookup::default().resolve("Experimental DWI"),
            StenosisType::Unknown
        );
        assert_eq!(StenosisLookup::empty().resolve("Sagittal T1"), StenosisType::Unknown);
    }
}
