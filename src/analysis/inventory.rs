//! Dependency inventory of an executable
//!
//! Lists the dynamic dependencies of one executable through a
//! [`DependencyLister`], resolves each token inside the bundle and sizes the
//! files found. Tool failures degrade to an empty inventory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use normpath::PathExt;

use super::introspect::{DependencyLister, parse_dependency_listing};
use super::report::{AnalysisWarning, DependencyInventory, ResolvedLibrary, Warnings};
use super::resolver::resolve_dependency;

/// Build the dependency inventory of `executable`
///
/// Placeholder tokens are resolved relative to `bundle_root`. Unresolved
/// tokens stay in the inventory with size 0; a file reached through several
/// tokens is listed and counted once.
pub fn build_inventory(
    executable: &Path,
    bundle_root: &Path,
    lister: &dyn DependencyLister,
    warnings: &mut Warnings,
) -> DependencyInventory {
    let listing = match lister.list_dependencies(executable) {
        Ok(listing) => listing,
        Err(e) => {
            warnings.push(AnalysisWarning::ToolUnavailable {
                tool: lister.tool_name().to_string(),
                reason: e.to_string(),
            });
            return DependencyInventory::degraded(executable.to_path_buf());
        }
    };

    let executable_size = match std::fs::metadata(executable) {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            warnings.push(AnalysisWarning::UnreadableFile {
                path: executable.to_path_buf(),
                reason: e.to_string(),
            });
            0
        }
    };

    let mut libraries = Vec::new();
    // Normalized path -> index into `libraries`
    let mut seen: HashMap<PathBuf, usize> = HashMap::new();
    let mut embedded_size = 0u64;

    for token in parse_dependency_listing(&listing) {
        let Some(path) = resolve_dependency(&token, bundle_root) else {
            warnings.push(AnalysisWarning::UnresolvedDependency {
                token: token.clone(),
            });
            libraries.push(ResolvedLibrary::unresolved(token));
            continue;
        };

        let key = identity(&path);
        if let Some(&index) = seen.get(&key) {
            log::debug!("{token} resolves to already listed {}", path.display());
            libraries[index].aliases.push(token);
            continue;
        }
        seen.insert(key, libraries.len());

        match std::fs::metadata(&path) {
            Ok(metadata) => {
                embedded_size += metadata.len();
                libraries.push(ResolvedLibrary::resolved(token, &path, metadata.len()));
            }
            Err(e) => {
                warnings.push(AnalysisWarning::UnreadableFile {
                    path,
                    reason: e.to_string(),
                });
                libraries.push(ResolvedLibrary::unresolved(token));
            }
        }
    }

    log::info!(
        "{} dependencies of {} ({} unresolved)",
        libraries.len(),
        executable.display(),
        libraries.iter().filter(|l| !l.resolved).count()
    );

    DependencyInventory::new(
        executable.to_path_buf(),
        executable_size,
        libraries,
        embedded_size,
    )
}

/// Path identifying a file regardless of `..` segments and symlinks
fn identity(path: &Path) -> PathBuf {
    path.normalize()
        .map(normpath::BasePathBuf::into_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
