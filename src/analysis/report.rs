//! Size report model
//!
//! The [`SizeReport`] is the single output of an analysis run. It is built
//! once by the classifier and only exposes accessors afterwards.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Download size is estimated as this fraction (numerator / denominator) of
/// the archive size. A fixed approximation, not a measurement.
const DOWNLOAD_ESTIMATE_NUMERATOR: u128 = 3;
const DOWNLOAD_ESTIMATE_DENOMINATOR: u128 = 5;

/// Estimated download size: `floor(archive_size * 0.6)`, in exact integer math
pub fn estimate_download_size(archive_size: u64) -> u64 {
    let estimate =
        u128::from(archive_size) * DOWNLOAD_ESTIMATE_NUMERATOR / DOWNLOAD_ESTIMATE_DENOMINATOR;
    // 0.6 * u64::MAX still fits in u64
    u64::try_from(estimate).unwrap_or(u64::MAX)
}

/// Classification bucket for files in the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Frameworks,
    NativeLibraries,
    Resources,
    Others,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Frameworks => "Frameworks",
            Category::NativeLibraries => "Libraries",
            Category::Resources => "Resources",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One named, sized item in a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeEntry {
    pub name: String,
    pub size: u64,
}

impl SizeEntry {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Entries of one category with their sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    category: Category,
    entries: Vec<SizeEntry>,
    total: u64,
}

impl CategoryTotal {
    /// Build a total from entries, keeping their order
    pub fn from_entries(category: Category, entries: Vec<SizeEntry>) -> Self {
        let total = entries.iter().map(|e| e.size).sum();
        Self {
            category,
            entries,
            total,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn entries(&self) -> &[SizeEntry] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One dynamic dependency of the main executable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLibrary {
    /// Resolved path when resolved, otherwise the raw token
    pub name: String,
    /// Raw token as emitted by the introspection tool
    pub token: String,
    /// Size on disk; always 0 when unresolved
    pub size: u64,
    pub resolved: bool,
    /// Later tokens that resolved to the same file
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl ResolvedLibrary {
    pub fn resolved(token: impl Into<String>, path: &Path, size: u64) -> Self {
        Self {
            name: path.display().to_string(),
            token: token.into(),
            size,
            resolved: true,
            aliases: Vec::new(),
        }
    }

    pub fn unresolved(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            name: token.clone(),
            token,
            size: 0,
            resolved: false,
            aliases: Vec::new(),
        }
    }
}

/// Dynamic dependency inventory of one executable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyInventory {
    executable: Option<PathBuf>,
    executable_size: u64,
    libraries: Vec<ResolvedLibrary>,
    embedded_size: u64,
}

impl DependencyInventory {
    /// Inventory for a bundle without an analyzable executable
    pub fn empty() -> Self {
        Self::default()
    }

    /// Degraded inventory: the executable is known but could not be inspected
    pub fn degraded(executable: PathBuf) -> Self {
        Self {
            executable: Some(executable),
            ..Self::default()
        }
    }

    pub fn new(
        executable: PathBuf,
        executable_size: u64,
        libraries: Vec<ResolvedLibrary>,
        embedded_size: u64,
    ) -> Self {
        Self {
            executable: Some(executable),
            executable_size,
            libraries,
            embedded_size,
        }
    }

    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    pub fn executable_size(&self) -> u64 {
        self.executable_size
    }

    pub fn libraries(&self) -> &[ResolvedLibrary] {
        &self.libraries
    }

    /// Sum of resolved library sizes, each distinct file counted once
    pub fn embedded_size(&self) -> u64 {
        self.embedded_size
    }

    pub fn unresolved_count(&self) -> usize {
        self.libraries.iter().filter(|l| !l.resolved).count()
    }
}

/// A soft failure met during analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// The introspection tool is missing, failed, or timed out
    ToolUnavailable { tool: String, reason: String },
    /// A dependency token that does not map to an existing file
    UnresolvedDependency { token: String },
    /// A file or directory that could not be read during a size walk
    UnreadableFile { path: PathBuf, reason: String },
    /// The app bundle has no main executable named after it
    MissingExecutable { expected: PathBuf },
    /// Payload holds more than one `.app`; only the first is analyzed as the app
    ExtraAppBundle { path: PathBuf },
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisWarning::ToolUnavailable { tool, reason } => {
                write!(f, "introspection tool '{tool}' unavailable: {reason}")
            }
            AnalysisWarning::UnresolvedDependency { token } => {
                write!(f, "unresolved dependency: {token}")
            }
            AnalysisWarning::UnreadableFile { path, reason } => {
                write!(f, "skipped unreadable entry {}: {reason}", path.display())
            }
            AnalysisWarning::MissingExecutable { expected } => {
                write!(f, "main executable not found at {}", expected.display())
            }
            AnalysisWarning::ExtraAppBundle { path } => {
                write!(f, "additional app bundle classified as plain files: {}", path.display())
            }
        }
    }
}

/// Collects warnings and logs each one as it is recorded
///
/// The payload is walked more than once, so the same unreadable entry can be
/// reported repeatedly; it is kept once.
#[derive(Debug, Default)]
pub struct Warnings(Vec<AnalysisWarning>);

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: AnalysisWarning) {
        if self.0.contains(&warning) {
            return;
        }
        log::warn!("{warning}");
        self.0.push(warning);
    }

    pub fn as_slice(&self) -> &[AnalysisWarning] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<AnalysisWarning> {
        self.0
    }
}

/// Measurements gathered by the classifier, assembled into a report
pub(crate) struct ReportParts {
    pub app_name: String,
    pub archive_size: u64,
    pub payload_size: u64,
    pub frameworks: CategoryTotal,
    pub native_libraries: CategoryTotal,
    pub resources: CategoryTotal,
    pub others: CategoryTotal,
    pub dependencies: DependencyInventory,
    pub warnings: Vec<AnalysisWarning>,
}

/// Size breakdown of one application bundle
#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    app_name: String,
    archive_size: u64,
    download_size: u64,
    payload_size: u64,
    frameworks: CategoryTotal,
    native_libraries: CategoryTotal,
    resources: CategoryTotal,
    others: CategoryTotal,
    dependencies: DependencyInventory,
    warnings: Vec<AnalysisWarning>,
}

impl SizeReport {
    pub(crate) fn new(parts: ReportParts) -> Self {
        Self {
            app_name: parts.app_name,
            archive_size: parts.archive_size,
            download_size: estimate_download_size(parts.archive_size),
            payload_size: parts.payload_size,
            frameworks: parts.frameworks,
            native_libraries: parts.native_libraries,
            resources: parts.resources,
            others: parts.others,
            dependencies: parts.dependencies,
            warnings: parts.warnings,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn archive_size(&self) -> u64 {
        self.archive_size
    }

    pub fn download_size(&self) -> u64 {
        self.download_size
    }

    pub fn payload_size(&self) -> u64 {
        self.payload_size
    }

    pub fn frameworks(&self) -> &CategoryTotal {
        &self.frameworks
    }

    pub fn native_libraries(&self) -> &CategoryTotal {
        &self.native_libraries
    }

    pub fn resources(&self) -> &CategoryTotal {
        &self.resources
    }

    pub fn others(&self) -> &CategoryTotal {
        &self.others
    }

    /// All four categories in report order
    pub fn categories(&self) -> [&CategoryTotal; 4] {
        [
            &self.frameworks,
            &self.native_libraries,
            &self.resources,
            &self.others,
        ]
    }

    /// Sum over all categories; equals the payload size when no entry was skipped
    pub fn classified_size(&self) -> u64 {
        self.categories().iter().map(|c| c.total()).sum()
    }

    pub fn dependencies(&self) -> &DependencyInventory {
        &self.dependencies
    }

    pub fn warnings(&self) -> &[AnalysisWarning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_estimate_is_floor_of_sixty_percent() {
        assert_eq!(estimate_download_size(0), 0);
        assert_eq!(estimate_download_size(1), 0);
        assert_eq!(estimate_download_size(2), 1);
        assert_eq!(estimate_download_size(10), 6);
        assert_eq!(estimate_download_size(1_000_003), 600_001);
        assert_eq!(estimate_download_size(u64::MAX), u64::MAX / 5 * 3);
    }

    #[test]
    fn test_category_total_sums_entries_in_order() {
        let total = CategoryTotal::from_entries(
            Category::Resources,
            vec![SizeEntry::new("b.png", 10), SizeEntry::new("a.png", 5)],
        );
        assert_eq!(total.total(), 15);
        assert_eq!(total.entries()[0].name, "b.png");
        assert_eq!(total.category(), Category::Resources);
    }

    #[test]
    fn test_unresolved_library_has_zero_size_and_keeps_token() {
        let lib = ResolvedLibrary::unresolved("@rpath/Missing.framework/Missing");
        assert!(!lib.resolved);
        assert_eq!(lib.size, 0);
        assert_eq!(lib.name, "@rpath/Missing.framework/Missing");
        assert_eq!(lib.token, lib.name);
    }

    #[test]
    fn test_degraded_inventory_reports_zero() {
        let inventory = DependencyInventory::degraded(PathBuf::from("/tmp/X.app/X"));
        assert_eq!(inventory.executable_size(), 0);
        assert_eq!(inventory.embedded_size(), 0);
        assert!(inventory.libraries().is_empty());
        assert!(inventory.executable().is_some());
    }

    #[test]
    fn test_warnings_keep_duplicates_once() {
        let mut warnings = Warnings::new();
        let warning = AnalysisWarning::UnreadableFile {
            path: PathBuf::from("/tmp/locked"),
            reason: "Permission denied".to_string(),
        };
        warnings.push(warning.clone());
        warnings.push(warning);
        assert_eq!(warnings.as_slice().len(), 1);
    }

    #[test]
    fn test_warning_serializes_with_kind_tag() {
        let warning = AnalysisWarning::UnresolvedDependency {
            token: "@rpath/Foo".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "unresolved_dependency");
        assert_eq!(json["token"], "@rpath/Foo");
    }
}
