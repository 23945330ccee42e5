//! Archive errors

use super::AnalyzerError;

/// Creates an archive not found error
pub fn not_found(path: impl Into<String>) -> AnalyzerError {
    AnalyzerError::ArchiveNotFound { path: path.into() }
}

/// Creates an archive extraction failed error
pub fn extract_failed(path: impl Into<String>, reason: impl Into<String>) -> AnalyzerError {
    AnalyzerError::ArchiveExtractFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
