//! External introspection tool
//!
//! The dependency listing of an executable comes from an external command
//! (`otool -L` by default). This module runs it under a timeout and parses
//! its output into dependency tokens.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::IntrospectionConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Why a dependency listing could not be obtained
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("'{program}' not found in PATH")]
    NotFound { program: String },

    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("'{program}' timed out after {secs}s")]
    TimedOut { program: String, secs: u64 },

    #[error("failed to run '{program}': {reason}")]
    Io { program: String, reason: String },
}

/// Source of the raw dependency listing for an executable
pub trait DependencyLister {
    /// Name of the tool, for warnings
    fn tool_name(&self) -> &str;

    /// Raw listing text: a header line followed by one dependency per line
    fn list_dependencies(&self, executable: &Path) -> Result<String, ToolError>;
}

/// Runs the configured external command
#[derive(Debug, Clone)]
pub struct CommandLister {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandLister {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &IntrospectionConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

impl DependencyLister for CommandLister {
    fn tool_name(&self) -> &str {
        &self.program
    }

    fn list_dependencies(&self, executable: &Path) -> Result<String, ToolError> {
        log::info!("Running {} {:?} {}", self.program, self.args, executable.display());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(executable)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ToolError::NotFound {
                    program: self.program.clone(),
                },
                _ => ToolError::Io {
                    program: self.program.clone(),
                    reason: e.to_string(),
                },
            })?;

        // Drain pipes on helper threads so a full pipe cannot stall the child
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ToolError::TimedOut {
                        program: self.program.clone(),
                        secs: self.timeout.as_secs(),
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    return Err(ToolError::Io {
                        program: self.program.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        };

        let stdout = collect(stdout);
        let stderr = collect(stderr);

        if !status.success() {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout)
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn collect(handle: Option<thread::JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

/// Parse a dependency listing into tokens
///
/// The first line is a header. Later lines ending in `:` are
/// per-architecture headers of fat binaries and are skipped too. Each
/// remaining line yields its first whitespace-delimited field; repeated
/// tokens are kept once, in first-seen order.
pub fn parse_dependency_listing(listing: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for line in listing.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() || line.ends_with(':') {
            continue;
        }
        let Some(token) = line.split_whitespace().next() else {
            continue;
        };
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}
