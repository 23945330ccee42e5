//! Bundle structure classification
//!
//! Walks the `Payload/` tree of an extracted archive once and assigns every
//! regular file to exactly one category. The app's `Frameworks/` directory is
//! classified as a unit: each direct child is one framework entry, and files
//! below it are never looked at again.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ClassificationConfig;
use crate::error::{Result, app_not_found, payload_not_found};

use super::folder_size::{folder_size, unreadable_walk_entry};
use super::introspect::DependencyLister;
use super::inventory::build_inventory;
use super::report::{
    AnalysisWarning, Category, CategoryTotal, DependencyInventory, ReportParts, SizeEntry,
    SizeReport, Warnings,
};

/// Payload directory at the root of an extracted archive
pub const PAYLOAD_DIR: &str = "Payload";

/// Embedded frameworks directory inside the app bundle
pub const FRAMEWORKS_DIR: &str = "Frameworks";

const APP_EXTENSION: &str = "app";

/// Located application bundle inside an extracted archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppBundle {
    /// `<root>/Payload`
    pub payload: PathBuf,
    /// `<root>/Payload/<Name>.app`
    pub app_dir: PathBuf,
    /// Other `.app` directories found next to `app_dir`
    pub extra_apps: Vec<PathBuf>,
}

impl AppBundle {
    /// Find `Payload/<Name>.app` under an extracted archive root
    ///
    /// When several `.app` directories exist, the first by name is the app.
    /// Symlinks named `*.app` are not app bundles.
    pub fn locate(extracted_root: &Path) -> Result<Self> {
        let payload = extracted_root.join(PAYLOAD_DIR);
        if !payload.is_dir() {
            return Err(payload_not_found(extracted_root.display().to_string()));
        }

        let mut apps: Vec<PathBuf> = fs::read_dir(&payload)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_dir()))
            .map(|entry| entry.path())
            .filter(|path| path.extension() == Some(OsStr::new(APP_EXTENSION)))
            .collect();
        apps.sort();

        if apps.is_empty() {
            return Err(app_not_found(payload.display().to_string()));
        }
        let app_dir = apps.remove(0);

        Ok(Self {
            payload,
            app_dir,
            extra_apps: apps,
        })
    }

    /// Bundle name without the `.app` extension
    pub fn name(&self) -> String {
        self.app_dir
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Main executable path: `<Name>.app/<Name>`
    pub fn executable_path(&self) -> PathBuf {
        self.app_dir.join(self.name())
    }

    pub fn frameworks_dir(&self) -> PathBuf {
        self.app_dir.join(FRAMEWORKS_DIR)
    }
}

fn is_real_dir(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_dir())
}

/// Assigns payload files to categories by extension
#[derive(Debug, Clone)]
pub struct Classifier {
    native_library_extensions: Vec<String>,
    resource_extensions: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&ClassificationConfig::default())
    }
}

impl Classifier {
    pub fn new(config: &ClassificationConfig) -> Self {
        let normalize = |exts: &[String]| {
            exts.iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        };
        Self {
            native_library_extensions: normalize(&config.native_library_extensions),
            resource_extensions: normalize(&config.resource_extensions),
        }
    }

    /// Category of a file outside `Frameworks/`
    pub fn categorize(&self, path: &Path) -> Category {
        let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase()) else {
            return Category::Others;
        };
        if self.native_library_extensions.contains(&ext) {
            Category::NativeLibraries
        } else if self.resource_extensions.contains(&ext) {
            Category::Resources
        } else {
            Category::Others
        }
    }

    /// Analyze an extracted archive and build its size report
    ///
    /// Fails only when the layout is not an app bundle; every other problem is
    /// recorded as a warning in the report.
    pub fn analyze(
        &self,
        extracted_root: &Path,
        archive_size: u64,
        lister: &dyn DependencyLister,
    ) -> Result<SizeReport> {
        let bundle = AppBundle::locate(extracted_root)?;
        log::info!("App directory found: {}", bundle.app_dir.display());

        let mut warnings = Warnings::new();
        for extra in &bundle.extra_apps {
            warnings.push(AnalysisWarning::ExtraAppBundle { path: extra.clone() });
        }

        let payload_size = folder_size(&bundle.payload, &mut warnings);
        let frameworks = self.frameworks(&bundle, &mut warnings);
        let (native_libraries, resources, others) = self.walk_payload(&bundle, &mut warnings);

        let executable = bundle.executable_path();
        let dependencies = if executable.is_file() {
            build_inventory(&executable, &bundle.app_dir, lister, &mut warnings)
        } else {
            warnings.push(AnalysisWarning::MissingExecutable {
                expected: executable,
            });
            DependencyInventory::empty()
        };

        Ok(SizeReport::new(ReportParts {
            app_name: bundle.name(),
            archive_size,
            payload_size,
            frameworks,
            native_libraries,
            resources,
            others,
            dependencies,
            warnings: warnings.into_vec(),
        }))
    }

    /// One entry per direct child of `Frameworks/`, sized recursively
    ///
    /// A `Frameworks` symlink or regular file is not a frameworks directory;
    /// the payload walk classifies it like any other entry.
    fn frameworks(&self, bundle: &AppBundle, warnings: &mut Warnings) -> CategoryTotal {
        let dir = bundle.frameworks_dir();
        let mut entries = Vec::new();

        if is_real_dir(&dir) {
            let mut children: Vec<_> = match fs::read_dir(&dir) {
                Ok(read_dir) => read_dir.filter_map(|e| e.ok()).collect(),
                Err(e) => {
                    warnings.push(AnalysisWarning::UnreadableFile {
                        path: dir.clone(),
                        reason: e.to_string(),
                    });
                    Vec::new()
                }
            };
            children.sort_by_key(|e| e.file_name());

            for child in children {
                let name = child.file_name().to_string_lossy().to_string();
                let file_type = match child.file_type() {
                    Ok(ft) => ft,
                    Err(e) => {
                        warnings.push(AnalysisWarning::UnreadableFile {
                            path: child.path(),
                            reason: e.to_string(),
                        });
                        continue;
                    }
                };

                if file_type.is_dir() {
                    entries.push(SizeEntry::new(name, folder_size(&child.path(), warnings)));
                } else if file_type.is_file() {
                    match child.metadata() {
                        Ok(metadata) => entries.push(SizeEntry::new(name, metadata.len())),
                        Err(e) => warnings.push(AnalysisWarning::UnreadableFile {
                            path: child.path(),
                            reason: e.to_string(),
                        }),
                    }
                }
            }
        }

        CategoryTotal::from_entries(Category::Frameworks, entries)
    }

    /// Classify every regular file under `Payload/` except the frameworks
    fn walk_payload(
        &self,
        bundle: &AppBundle,
        warnings: &mut Warnings,
    ) -> (CategoryTotal, CategoryTotal, CategoryTotal) {
        let frameworks_dir = bundle.frameworks_dir();
        let mut native_libraries = Vec::new();
        let mut resources = Vec::new();
        let mut others = Vec::new();

        let walker = WalkDir::new(&bundle.payload)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(e.file_type().is_dir() && e.path() == frameworks_dir.as_path())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warnings.push(unreadable_walk_entry(&bundle.payload, &e));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warnings.push(AnalysisWarning::UnreadableFile {
                        path: entry.path().to_path_buf(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let name = entry_name(bundle, entry.path());
            let category = self.categorize(entry.path());
            log::debug!("{category}: {name} ({size} bytes)");
            let item = SizeEntry::new(name, size);
            match category {
                Category::NativeLibraries => native_libraries.push(item),
                Category::Resources => resources.push(item),
                Category::Others | Category::Frameworks => others.push(item),
            }
        }

        (
            CategoryTotal::from_entries(Category::NativeLibraries, native_libraries),
            CategoryTotal::from_entries(Category::Resources, resources),
            CategoryTotal::from_entries(Category::Others, others),
        )
    }
}

/// Display name: relative to the app directory, or to `Payload/` outside it
fn entry_name(bundle: &AppBundle, path: &Path) -> String {
    path.strip_prefix(&bundle.app_dir)
        .or_else(|_| path.strip_prefix(&bundle.payload))
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Analyze an extracted archive with the given classification and lister
pub fn analyze_bundle(
    extracted_root: &Path,
    archive_size: u64,
    classification: &ClassificationConfig,
    lister: &dyn DependencyLister,
) -> Result<SizeReport> {
    Classifier::new(classification).analyze(extracted_root, archive_size, lister)
}
