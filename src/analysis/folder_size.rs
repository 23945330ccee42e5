//! Recursive folder size aggregation

use std::path::Path;

use walkdir::WalkDir;

use super::report::{AnalysisWarning, Warnings};

/// Sum the sizes of all regular files under `path`
///
/// Symlinks are not followed and count for nothing, as do special files.
/// Entries that cannot be read are recorded in `warnings` and skipped.
pub fn folder_size(path: &Path, warnings: &mut Warnings) -> u64 {
    let mut size = 0u64;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warnings.push(unreadable_walk_entry(path, &e));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => size += metadata.len(),
            Err(e) => warnings.push(AnalysisWarning::UnreadableFile {
                path: entry.path().to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
    size
}

/// Warning for a walk error, attributed to the failing path when walkdir knows it
pub(crate) fn unreadable_walk_entry(root: &Path, err: &walkdir::Error) -> AnalysisWarning {
    AnalysisWarning::UnreadableFile {
        path: err.path().unwrap_or(root).to_path_buf(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_folder_size_sums_nested_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.txt"), b"hello world").unwrap();
        fs::write(root.join("a/one.bin"), vec![0u8; 100]).unwrap();
        fs::write(root.join("a/b/c/two.bin"), vec![0u8; 4096]).unwrap();

        let mut warnings = Warnings::new();
        assert_eq!(folder_size(root, &mut warnings), 11 + 100 + 4096);
        assert!(warnings.as_slice().is_empty());
    }

    #[test]
    fn test_folder_size_empty_directory() {
        let temp = TempDir::new().unwrap();
        let mut warnings = Warnings::new();
        assert_eq!(folder_size(temp.path(), &mut warnings), 0);
    }

    #[test]
    fn test_folder_size_missing_directory_warns() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let mut warnings = Warnings::new();
        assert_eq!(folder_size(&missing, &mut warnings), 0);
        assert!(matches!(
            warnings.as_slice(),
            [AnalysisWarning::UnreadableFile { .. }]
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_folder_size_does_not_follow_symlinks() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        let outside = temp.path().join("outside");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("big.bin"), vec![0u8; 1000]).unwrap();
        fs::write(root.join("small.bin"), vec![0u8; 10]).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        let mut warnings = Warnings::new();
        assert_eq!(folder_size(&root, &mut warnings), 10);
    }
}
