use crate::extraction::FallbackMetadata;
use crate::preview::RasterSnapshot;
use std::fmt;

/// Image preview lifecycle for the currently selected file
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PreviewState {
    #[default]
    Idle,
    LoadingPrimary,
    PrimaryRendered(RasterSnapshot),
    /// Transient; the pipeline moves on to the fallback immediately
    PrimaryFailed(String),
    LoadingFallback,
    FallbackRendered(FallbackMetadata),
    FallbackFailed(String),
}

impl PreviewState {
    /// Returns short name for logging
    pub fn simple_name(&self) -> &'static str {
        match self {
            PreviewState::Idle => "idle",
            PreviewState::LoadingPrimary => "loading-primary",
            PreviewState::PrimaryRendered(_) => "primary-rendered",
            PreviewState::PrimaryFailed(_) => "primary-failed",
            PreviewState::LoadingFallback => "loading-fallback",
            PreviewState::FallbackRendered(_) => "fallback-rendered",
            PreviewState::FallbackFailed(_) => "fallback-failed",
        }
    }

    /// Whether this file's preview has settled
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PreviewState::PrimaryRendered(_)
                | PreviewState::FallbackRendered(_)
                | PreviewState::FallbackFailed(_)
        )
    }

    /// Whether a renderer or reader is still running
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            PreviewState::LoadingPrimary | PreviewState::LoadingFallback
        )
    }

    /// User-facing error text for the terminal failure state
    pub fn error_message(&self) -> Option<&str> {
        match self {
            PreviewState::FallbackFailed(message) => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for PreviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!PreviewState::Idle.is_terminal());
        assert!(!PreviewState::LoadingPrimary.is_terminal());
        assert!(!PreviewState::PrimaryFailed("x".to_string()).is_terminal());
        assert!(PreviewState::FallbackFailed("x".to_string()).is_terminal());
        assert!(PreviewState::FallbackRendered(FallbackMetadata::default()).is_terminal());
    }

    #[test]
    fn test_loading_states() {
        assert!(PreviewState::LoadingPrimary.is_loading());
        assert!(PreviewState::LoadingFallback.is_loading());
        assert!(!PreviewState::Idle.is_loading());
        assert!(!PreviewState::FallbackFailed("x".to_string()).is_loading());
    }

    #[test]
    fn test_error_message_only_for_fallback_failure() {
        let failed = PreviewState::FallbackFailed("Cannot parse DICOM: bad magic".to_string());
        assert_eq!(failed.error_message(), Some("Cannot parse DICOM: bad magic"));
        assert_eq!(
            PreviewState::PrimaryFailed("codec".to_string()).error_message(),
            None
        );
    }
}
