//! Error types and handling for ipa-analyze
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`bundle`]: Bundle layout errors (the only fatal analysis errors)
//! - [`archive`]: Archive access and extraction errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors
//!
//! Soft failures met during an analysis (unresolved dependencies, unreadable
//! files, a missing introspection tool) are not errors; they are recorded as
//! [`crate::analysis::AnalysisWarning`] values inside the report.

pub mod archive;
pub mod bundle;
pub mod config;
pub mod fs;

pub use archive::{extract_failed as archive_extract_failed, not_found as archive_not_found};
pub use bundle::{app_not_found, payload_not_found};
pub use config::{
    not_found as config_not_found, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
pub use fs::{io_error, write_failed as file_write_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for ipa-analyze operations
#[derive(Error, Diagnostic, Debug)]
pub enum AnalyzerError {
    // Bundle layout errors
    #[error("Payload directory not found in {path}")]
    #[diagnostic(
        code(ipa_analyze::bundle::payload_not_found),
        help("An .ipa archive must contain a top-level Payload/ directory")
    )]
    PayloadNotFound { path: String },

    #[error(".app directory not found in {path}")]
    #[diagnostic(
        code(ipa_analyze::bundle::app_not_found),
        help("Payload/ must contain the application bundle, e.g. Payload/MyApp.app")
    )]
    AppBundleNotFound { path: String },

    // Archive errors
    #[error("Archive not found: {path}")]
    #[diagnostic(code(ipa_analyze::archive::not_found))]
    ArchiveNotFound { path: String },

    #[error("Failed to extract archive {path}: {reason}")]
    #[diagnostic(
        code(ipa_analyze::archive::extract_failed),
        help("Check that the file is a valid .ipa (zip) archive, or pass --extracted")
    )]
    ArchiveExtractFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(ipa_analyze::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(ipa_analyze::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(ipa_analyze::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to write file: {path}")]
    #[diagnostic(code(ipa_analyze::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(ipa_analyze::fs::io_error))]
    IoError { message: String },
}

impl AnalyzerError {
    /// Whether the error means the extracted tree is not an analyzable bundle
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AnalyzerError::PayloadNotFound { .. } | AnalyzerError::AppBundleNotFound { .. }
        )
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        AnalyzerError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AnalyzerError {
    fn from(err: serde_yaml::Error) -> Self {
        AnalyzerError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        AnalyzerError::IoError {
            message: format!("JSON serialization failed: {err}"),
        }
    }
}

impl From<zip::result::ZipError> for AnalyzerError {
    fn from(err: zip::result::ZipError) -> Self {
        AnalyzerError::ArchiveExtractFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, AnalyzerError>;
