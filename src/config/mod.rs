//! Configuration file handling
//!
//! The optional `config.yaml` configures the introspection tool and the
//! extension lists used to classify payload files. Every field has a default,
//! so an empty or missing file yields [`AnalyzerConfig::default`].
//!
//! ```yaml
//! introspection:
//!   program: otool
//!   args: ["-L"]
//!   timeout_secs: 30
//! classification:
//!   native_library_extensions: [dylib, so]
//!   resource_extensions: [png, jpg, jpeg, json, plist, nib, svg, ttf]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config_not_found, config_parse_failed, config_read_failed};

/// Directory name under the platform config directory
const CONFIG_DIR: &str = "ipa-analyze";

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub introspection: IntrospectionConfig,
    pub classification: ClassificationConfig,
}

/// External dependency-listing tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntrospectionConfig {
    /// Program to run; the executable path is appended after `args`
    pub program: String,
    pub args: Vec<String>,
    /// Seconds before the tool is killed and treated as unavailable
    pub timeout_secs: u64,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            program: "otool".to_string(),
            args: vec!["-L".to_string()],
            timeout_secs: 30,
        }
    }
}

/// File extensions (without the dot, matched case-insensitively)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationConfig {
    pub native_library_extensions: Vec<String>,
    pub resource_extensions: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            native_library_extensions: to_strings(&["dylib", "so"]),
            resource_extensions: to_strings(&[
                "png", "jpg", "jpeg", "json", "plist", "nib", "svg", "ttf",
            ]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl AnalyzerConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(config_not_found(display));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_read_failed(display.clone(), e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| config_parse_failed(display, e.to_string()))
    }

    /// Load the explicit config file, or the default one if present
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            log::info!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                log::debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Get the configuration directory path
///
/// Returns `~/.config/ipa-analyze` on Linux or equivalent on other platforms.
///
/// Can be overridden with the `IPA_ANALYZE_CONFIG_DIR` environment variable.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("IPA_ANALYZE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|base| base.join(CONFIG_DIR))
}

/// Path of the default configuration file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}
