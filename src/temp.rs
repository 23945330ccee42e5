//! Base directory for extraction scratch space.
//!
//! Archives are unpacked under this directory, never under the current
//! working directory (e.g. when TMPDIR=tmp or TMPDIR=./tmp).

use std::env;
use std::path::PathBuf;

/// Returns an absolute directory for temporary extraction directories.
///
/// `IPA_ANALYZE_TMPDIR` takes precedence (large archives may need a roomier
/// disk), then the system temp dir. Relative values are ignored.
pub fn temp_dir_base() -> PathBuf {
    if let Some(dir) = env::var_os("IPA_ANALYZE_TMPDIR").map(PathBuf::from) {
        if dir.is_absolute() {
            return dir;
        }
        log::warn!(
            "Ignoring relative IPA_ANALYZE_TMPDIR={}",
            dir.display()
        );
    }

    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_temp_dir_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }

    #[test]
    #[serial]
    fn test_temp_dir_base_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let original = env::var_os("IPA_ANALYZE_TMPDIR");
        unsafe {
            env::set_var("IPA_ANALYZE_TMPDIR", dir.path());
        }

        let base = temp_dir_base();

        unsafe {
            match original {
                Some(o) => env::set_var("IPA_ANALYZE_TMPDIR", o),
                None => env::remove_var("IPA_ANALYZE_TMPDIR"),
            }
        }

        assert_eq!(base, dir.path());
    }

    #[test]
    #[serial]
    fn test_temp_dir_base_ignores_relative_override() {
        let original = env::var_os("IPA_ANALYZE_TMPDIR");
        unsafe {
            env::set_var("IPA_ANALYZE_TMPDIR", "tmp");
        }

        let base = temp_dir_base();

        unsafe {
            match original {
                Some(o) => env::set_var("IPA_ANALYZE_TMPDIR", o),
                None => env::remove_var("IPA_ANALYZE_TMPDIR"),
            }
        }

        assert!(base.is_absolute());
    }
}
