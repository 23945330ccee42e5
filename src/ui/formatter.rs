//! Report formatters for the different output modes
//!
//! The report is laid out once as a list of sections; a [`ReportFormatter`]
//! decides how titles, headings and items look. Plain text, styled terminal
//! text and Markdown share the same layout.

use std::fmt::Write;

use console::Style;

use crate::analysis::{CategoryTotal, SizeReport};

use super::size::format_size;

/// One titled block of report lines
#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    heading: String,
    items: Vec<String>,
}

impl Section {
    fn new(heading: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            items,
        }
    }

    fn single(heading: impl Into<String>, item: String) -> Self {
        Self::new(heading, vec![item])
    }
}

/// Formatter trait for rendering report sections
pub trait ReportFormatter {
    fn title(&self, out: &mut String, title: &str);

    fn heading(&self, out: &mut String, heading: &str);

    fn item(&self, out: &mut String, item: &str);

    fn end_section(&self, out: &mut String) {
        out.push('\n');
    }
}

/// Plain text, as written to `.txt` reports
pub struct TextFormatter {
    styled: bool,
}

impl TextFormatter {
    pub fn plain() -> Self {
        Self { styled: false }
    }

    /// Bold headings for the terminal; console drops styling when not a tty
    pub fn styled() -> Self {
        Self { styled: true }
    }
}

impl ReportFormatter for TextFormatter {
    fn title(&self, out: &mut String, title: &str) {
        if self.styled {
            let _ = writeln!(out, "{}", Style::new().bold().green().apply_to(title));
        } else {
            let _ = writeln!(out, "{title}");
        }
        let _ = writeln!(out, "{}\n", "=".repeat(title.chars().count()));
    }

    fn heading(&self, out: &mut String, heading: &str) {
        if self.styled {
            let _ = writeln!(out, "{}", Style::new().bold().apply_to(format!("{heading}:")));
        } else {
            let _ = writeln!(out, "{heading}:");
        }
    }

    fn item(&self, out: &mut String, item: &str) {
        let _ = writeln!(out, "  - {item}");
    }
}

/// Markdown, as written to `.md` reports
pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn title(&self, out: &mut String, title: &str) {
        let _ = writeln!(out, "# {title}\n");
    }

    fn heading(&self, out: &mut String, heading: &str) {
        let _ = writeln!(out, "## {heading}");
    }

    fn item(&self, out: &mut String, item: &str) {
        let _ = writeln!(out, "- {item}");
    }
}

fn entry_lines(total: &CategoryTotal, empty: Option<&str>) -> Vec<String> {
    if total.is_empty() {
        return empty.map(|e| vec![e.to_string()]).unwrap_or_default();
    }
    total
        .entries()
        .iter()
        .map(|e| format!("{}: {}", e.name, format_size(e.size)))
        .collect()
}

fn total_heading(total: &CategoryTotal) -> String {
    format!("{} Total Size", total.category().label())
}

/// Lay out a report as sections, in display order
fn sections(report: &SizeReport) -> Vec<Section> {
    let deps = report.dependencies();

    let embedded = deps
        .libraries()
        .iter()
        .map(|lib| {
            let mut line = format!("{}: {}", lib.name, format_size(lib.size));
            if !lib.resolved {
                line.push_str(" (unresolved)");
            }
            if !lib.aliases.is_empty() {
                line.push_str(&format!(" (also as {})", lib.aliases.join(", ")));
            }
            line
        })
        .collect();

    let mut sections = vec![
        Section::single("App", report.app_name().to_string()),
        Section::single("IPA Size", format_size(report.archive_size())),
        Section::single(
            "Estimated Download Size (App Store Optimized)",
            format_size(report.download_size()),
        ),
        Section::single(
            "Payload Size (Uncompressed)",
            format_size(report.payload_size()),
        ),
        Section::new(
            report.frameworks().category().label(),
            entry_lines(report.frameworks(), None),
        ),
        Section::new(
            report.native_libraries().category().label(),
            entry_lines(report.native_libraries(), Some("No libraries found.")),
        ),
        Section::single(
            total_heading(report.resources()),
            format_size(report.resources().total()),
        ),
        Section::single(
            total_heading(report.others()),
            format_size(report.others().total()),
        ),
        Section::new("Embedded Libraries", embedded),
        Section::single("Executable Size", format_size(deps.executable_size())),
        Section::single(
            "Embedded Libraries Total Size",
            format_size(deps.embedded_size()),
        ),
    ];

    if deps.unresolved_count() > 0 {
        sections.push(Section::single(
            "Unresolved Libraries",
            deps.unresolved_count().to_string(),
        ));
    }

    if !report.warnings().is_empty() {
        sections.push(Section::new(
            "Warnings",
            report.warnings().iter().map(ToString::to_string).collect(),
        ));
    }

    sections
}

/// Render a report with the given formatter
pub fn render(report: &SizeReport, formatter: &dyn ReportFormatter) -> String {
    let mut out = String::new();
    formatter.title(&mut out, "IPA Analysis Report");
    for section in sections(report) {
        formatter.heading(&mut out, &section.heading);
        for item in &section.items {
            formatter.item(&mut out, item);
        }
        formatter.end_section(&mut out);
    }
    out
}

/// Plain text report
pub fn render_text(report: &SizeReport) -> String {
    render(report, &TextFormatter::plain())
}

/// Markdown report
pub fn render_markdown(report: &SizeReport) -> String {
    render(report, &MarkdownFormatter)
}

/// Pretty-printed JSON report
pub fn render_json(report: &SizeReport) -> crate::error::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
