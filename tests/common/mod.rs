//! Common test utilities for ipa-analyze integration tests

use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Sizes of the sample application written by [`TestWorkspace::sample_app`]
#[allow(dead_code)]
pub mod sample {
    pub const EXECUTABLE: usize = 4096;
    pub const FRAMEWORK_BINARY: usize = 2 * 1024 * 1024;
    pub const FRAMEWORK_PLIST: usize = 512;
    pub const DYLIB: usize = 8192;
    pub const PNG: usize = 3000;
    pub const NIB: usize = 1000;
    pub const INFO_PLIST: usize = 256;
    pub const OTHER: usize = 700;
}

/// A temporary workspace holding a sample archive tree
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write `size` zero bytes at a workspace-relative path
    pub fn write_sized(&self, path: &str, size: usize) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, vec![0u8; size]).expect("Failed to write file");
    }

    /// Write a text file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Lay out `tree/Payload/Demo.app` with one file per category
    pub fn sample_app(&self) -> PathBuf {
        let app = "tree/Payload/Demo.app";
        self.write_sized(&format!("{app}/Demo"), sample::EXECUTABLE);
        self.write_sized(
            &format!("{app}/Frameworks/Foo.framework/Foo"),
            sample::FRAMEWORK_BINARY,
        );
        self.write_sized(
            &format!("{app}/Frameworks/Foo.framework/Info.plist"),
            sample::FRAMEWORK_PLIST,
        );
        self.write_sized(&format!("{app}/libswiftCore.dylib"), sample::DYLIB);
        self.write_sized(&format!("{app}/Assets/icon.png"), sample::PNG);
        self.write_sized(&format!("{app}/Base.lproj/Main.nib"), sample::NIB);
        self.write_sized(&format!("{app}/Info.plist"), sample::INFO_PLIST);
        self.write_sized(&format!("{app}/_CodeSignature/CodeResources"), sample::OTHER);
        self.path.join("tree")
    }

    /// Zip every file under `tree` into `name`, paths relative to `tree`
    pub fn zip_tree(&self, tree: &Path, name: &str) -> PathBuf {
        let archive = self.path.join(name);
        let file = std::fs::File::create(&archive).expect("Failed to create archive");
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        for entry in WalkDir::new(tree).sort_by_file_name() {
            let entry = entry.expect("Failed to walk tree");
            if !entry.file_type().is_file() {
                continue;
            }
            let file = entry.path();
            let rel = file
                .strip_prefix(tree)
                .expect("File outside tree")
                .to_string_lossy()
                .replace('\\', "/");
            zip.start_file(rel, options).expect("Failed to start zip entry");
            zip.write_all(&std::fs::read(file).expect("Failed to read file"))
                .expect("Failed to write zip entry");
        }
        zip.finish().expect("Failed to finish archive");
        archive
    }

    /// Shell script standing in for `otool -L`
    ///
    /// Prints the executable header followed by one line per dependency.
    #[cfg(unix)]
    pub fn fake_tool(&self, dependencies: &[&str]) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let mut script = String::from("#!/bin/sh\necho \"$2:\"\n");
        for dep in dependencies {
            script.push_str(&format!(
                "echo \"\t{dep} (compatibility version 1.0.0, current version 1.0.0)\"\n"
            ));
        }
        let path = self.path.join("fake-otool");
        std::fs::write(&path, script).expect("Failed to write fake tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake tool");
        path
    }

    /// Command for the ipa-analyze binary, isolated from user configuration
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ipa-analyze").expect("Binary not built");
        cmd.current_dir(&self.path)
            .env("IPA_ANALYZE_CONFIG_DIR", self.path.join("config-home"))
            .env_remove("IPA_ANALYZE_CONFIG")
            .env_remove("IPA_ANALYZE_LOG");
        cmd
    }
}
