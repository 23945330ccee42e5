//! Deps command implementation
//!
//! Runs only the dependency inventory for one executable.

use std::path::{Path, PathBuf};

use console::Style;
use serde::Serialize;

use crate::analysis::{
    AnalysisWarning, CommandLister, DependencyInventory, DependencyLister, Warnings,
    build_inventory,
};
use crate::cli::DepsArgs;
use crate::config::AnalyzerConfig;
use crate::error::{Result, io_error};
use crate::ui::format_size;

#[derive(Serialize)]
struct DepsOutput<'a> {
    #[serde(flatten)]
    inventory: &'a DependencyInventory,
    warnings: &'a [AnalysisWarning],
}

/// Run deps command
pub fn run(config_path: Option<PathBuf>, args: DepsArgs) -> Result<()> {
    let mut config = AnalyzerConfig::load(config_path.as_deref())?;
    args.tool.apply(&mut config);

    let lister = CommandLister::from_config(&config.introspection);
    let (inventory, warnings) = inventory_for(&args, &lister)?;

    if args.json {
        let output = DepsOutput {
            inventory: &inventory,
            warnings: warnings.as_slice(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_inventory(&inventory, warnings.as_slice()));
    }

    Ok(())
}

fn inventory_for(
    args: &DepsArgs,
    lister: &dyn DependencyLister,
) -> Result<(DependencyInventory, Warnings)> {
    if !args.executable.is_file() {
        return Err(io_error(format!(
            "Executable not found: {}",
            args.executable.display()
        )));
    }

    let bundle_root = match &args.bundle_root {
        Some(root) => root.clone(),
        None => default_bundle_root(&args.executable),
    };
    log::info!(
        "Resolving dependencies of {} against {}",
        args.executable.display(),
        bundle_root.display()
    );

    let mut warnings = Warnings::new();
    let inventory = build_inventory(&args.executable, &bundle_root, lister, &mut warnings);
    Ok((inventory, warnings))
}

fn default_bundle_root(executable: &Path) -> PathBuf {
    match executable.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn render_inventory(inventory: &DependencyInventory, warnings: &[AnalysisWarning]) -> String {
    let mut out = String::new();
    let bold = Style::new().bold();

    if let Some(executable) = inventory.executable() {
        out.push_str(&format!("{} {}\n\n", bold.apply_to("Executable:"), executable.display()));
    }

    out.push_str(&format!("{}\n", bold.apply_to("Embedded Libraries:")));
    if inventory.libraries().is_empty() {
        out.push_str("  (none)\n");
    }
    for lib in inventory.libraries() {
        out.push_str(&format!("  - {}: {}", lib.name, format_size(lib.size)));
        if !lib.resolved {
            out.push_str(&format!(" {}", Style::new().yellow().apply_to("(unresolved)")));
        }
        if !lib.aliases.is_empty() {
            out.push_str(&format!(" (also as {})", lib.aliases.join(", ")));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{} {}\n",
        bold.apply_to("Executable Size:"),
        format_size(inventory.executable_size())
    ));
    out.push_str(&format!(
        "{} {}\n",
        bold.apply_to("Embedded Libraries Total Size:"),
        format_size(inventory.embedded_size())
    ));

    if !warnings.is_empty() {
        out.push_str(&format!("\n{}\n", bold.apply_to("Warnings:")));
        for warning in warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }
    out
}
