//! Analyze command implementation
//!
//! Extracts the archive (unless an extracted tree is given), builds the size
//! report, prints it and writes the requested report files.

use std::path::{Path, PathBuf};

use console::Style;

use crate::analysis::{CommandLister, SizeReport, analyze_bundle};
use crate::archive::{ExtractedArchive, archive_size, extract_archive};
use crate::cli::AnalyzeArgs;
use crate::config::AnalyzerConfig;
use crate::error::{Result, file_write_failed};
use crate::progress::ProgressDisplay;
use crate::ui::{TextFormatter, render, render_json, render_markdown, render_text};

/// Run analyze command
pub fn run(config_path: Option<PathBuf>, args: AnalyzeArgs) -> Result<()> {
    let mut config = AnalyzerConfig::load(config_path.as_deref())?;
    args.tool.apply(&mut config);

    let progress = ProgressDisplay::new(!args.json);
    let result = analyze(&config, &args, &progress);
    match &result {
        Ok(_) => progress.finish(),
        Err(_) => progress.abandon(),
    }
    let report = result?;

    if args.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render(&report, &TextFormatter::styled()));
    }

    write_reports(&report, &args)?;
    print_warning_summary(&report);

    Ok(())
}

/// Extract if needed and build the report
fn analyze(
    config: &AnalyzerConfig,
    args: &AnalyzeArgs,
    progress: &ProgressDisplay,
) -> Result<SizeReport> {
    let archive_size = archive_size(&args.archive)?;

    // Owns the temporary extraction directory until the report is built
    let mut extracted: Option<ExtractedArchive> = None;
    let root: PathBuf = match &args.extracted {
        Some(dir) => {
            log::info!("Using extracted archive at {}", dir.display());
            dir.clone()
        }
        None => {
            progress.step(&format!("Extracting {}", args.archive.display()));
            let archive = extract_archive(&args.archive)?;
            log::debug!("{} archive entries extracted", archive.entries());
            let root = archive.root().to_path_buf();
            extracted = Some(archive);
            root
        }
    };

    progress.step("Analyzing IPA structure");
    let lister = CommandLister::from_config(&config.introspection);
    let report = analyze_bundle(&root, archive_size, &config.classification, &lister)?;

    if args.keep_extracted {
        if let Some(archive) = extracted {
            let kept = archive.keep();
            eprintln!("Extracted archive kept at {}", kept.display());
        }
    }

    Ok(report)
}

fn write_reports(report: &SizeReport, args: &AnalyzeArgs) -> Result<()> {
    if let Some(path) = &args.txt {
        write_report(path, &render_text(report), "TXT")?;
    }
    if let Some(path) = &args.md {
        write_report(path, &render_markdown(report), "Markdown")?;
    }
    if let Some(path) = &args.json_out {
        write_report(path, &render_json(report)?, "JSON")?;
    }
    Ok(())
}

fn write_report(path: &Path, content: &str, kind: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| file_write_failed(path.display().to_string(), e.to_string()))?;
        }
    }
    std::fs::write(path, content)
        .map_err(|e| file_write_failed(path.display().to_string(), e.to_string()))?;
    eprintln!("{kind} report saved: {}", path.display());
    Ok(())
}

fn print_warning_summary(report: &SizeReport) {
    let count = report.warnings().len();
    if count == 0 {
        return;
    }
    eprintln!(
        "{} {} warning{} during analysis (see report)",
        Style::new().yellow().bold().apply_to("Note:"),
        count,
        if count == 1 { "" } else { "s" }
    );
}
