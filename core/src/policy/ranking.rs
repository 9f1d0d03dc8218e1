use crate::error::{Result, StenosisError};
use crate::types::ModelVerdict;

/// Selects the verdict that drives the final diagnosis
///
/// Verdicts are compared with [`ModelVerdict::outranks`]: severity rank
/// first, then dominant probability. On an exact tie the verdict that appears
/// first in `verdicts` is kept.
///
/// # Errors
///
/// Returns [`StenosisError::NoVerdicts`] if `verdicts` is empty.
pub fn rank_verdicts(verdicts: &[ModelVerdict]) -> Result<&ModelVerdict> {
    let mut iter = verdicts.iter();
    let first = iter.next().ok_or(StenosisError::NoVerdicts)?;

    Ok(iter.fold(first, |best, candidate| {
        if candidate.outranks(best) {
            candidate
        } else {
            best
        }
    }))
}
