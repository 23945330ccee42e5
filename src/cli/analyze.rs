use clap::Parser;
use std::path::PathBuf;

use super::ToolArgs;

/// Arguments for the analyze command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Print the report:\n    ipa-analyze analyze MyApp.ipa\n\n\
                  Write text and Markdown reports:\n    ipa-analyze analyze MyApp.ipa --txt report.txt --md report.md\n\n\
                  Analyze an already extracted archive:\n    ipa-analyze analyze MyApp.ipa --extracted ./extracted_ipa\n\n\
                  Use a different listing tool:\n    ipa-analyze analyze MyApp.ipa --tool llvm-otool")]
pub struct AnalyzeArgs {
    /// The .ipa archive to analyze
    pub archive: PathBuf,

    /// Directory holding the already extracted archive (skips extraction)
    #[arg(long, value_name = "DIR")]
    pub extracted: Option<PathBuf>,

    /// Keep the extraction directory and print its path
    #[arg(long, conflicts_with = "extracted")]
    pub keep_extracted: bool,

    /// Write the text report to this file
    #[arg(long, value_name = "FILE")]
    pub txt: Option<PathBuf>,

    /// Write the Markdown report to this file
    #[arg(long, value_name = "FILE")]
    pub md: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(long, value_name = "FILE")]
    pub json_out: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub tool: ToolArgs,
}
