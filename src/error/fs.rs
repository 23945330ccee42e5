//! File system errors

use super::AnalyzerError;

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> AnalyzerError {
    AnalyzerError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> AnalyzerError {
    AnalyzerError::IoError {
        message: message.into(),
    }
}
