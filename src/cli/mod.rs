//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - analyze: Analyze command arguments
//! - deps: Deps command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod analyze;
pub mod completions;
pub mod deps;

pub use analyze::AnalyzeArgs;
pub use completions::CompletionsArgs;
pub use deps::DepsArgs;

use crate::config::AnalyzerConfig;

/// ipa-analyze - size breakdown of iOS application archives
#[derive(Parser, Debug)]
#[command(
    name = "ipa-analyze",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Size breakdown of iOS application archives (.ipa)",
    long_about = "ipa-analyze unpacks an .ipa archive and reports its archive, download and \
                  payload sizes, per-category totals (frameworks, libraries, resources) and \
                  the dynamic libraries linked by the main executable.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  ipa-analyze analyze MyApp.ipa                     \x1b[90m# Print the report\x1b[0m\n   \
                  ipa-analyze analyze MyApp.ipa --md report.md      \x1b[90m# Also write Markdown\x1b[0m\n   \
                  ipa-analyze analyze MyApp.ipa --json              \x1b[90m# JSON on stdout\x1b[0m\n   \
                  ipa-analyze deps Payload/MyApp.app/MyApp          \x1b[90m# Linked libraries only\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/ipa-analyze/config.yaml)
    #[arg(long, short = 'c', global = true, env = "IPA_ANALYZE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an .ipa archive and report its size breakdown
    Analyze(AnalyzeArgs),

    /// List the dynamic libraries of one executable
    Deps(DepsArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Introspection tool overrides shared by analyze and deps
#[derive(Args, Debug, Clone, Default)]
pub struct ToolArgs {
    /// Dependency listing program (default: otool)
    #[arg(long, value_name = "PROGRAM")]
    pub tool: Option<String>,

    /// Seconds before the listing program is given up on
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ToolArgs {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AnalyzerConfig) {
        if let Some(tool) = &self.tool {
            config.introspection.program.clone_from(tool);
        }
        if let Some(timeout) = self.timeout {
            config.introspection.timeout_secs = timeout;
        }
    }
}
