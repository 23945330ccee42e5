//! Bundle layout errors

use super::AnalyzerError;

/// Creates a payload not found error
pub fn payload_not_found(path: impl Into<String>) -> AnalyzerError {
    AnalyzerError::PayloadNotFound { path: path.into() }
}

/// Creates an app bundle not found error
pub fn app_not_found(path: impl Into<String>) -> AnalyzerError {
    AnalyzerError::AppBundleNotFound { path: path.into() }
}
