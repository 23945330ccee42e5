use clap::Parser;
use std::path::PathBuf;

use super::ToolArgs;

/// Arguments for the deps command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List linked libraries of an app executable:\n    ipa-analyze deps Payload/MyApp.app/MyApp\n\n\
                  Resolve placeholders against another bundle root:\n    ipa-analyze deps ./MyApp --bundle-root Payload/MyApp.app")]
pub struct DepsArgs {
    /// Executable to inspect
    pub executable: PathBuf,

    /// Bundle root for @rpath/@executable_path (defaults to the executable's directory)
    #[arg(long, value_name = "DIR")]
    pub bundle_root: Option<PathBuf>,

    /// Print the inventory as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub tool: ToolArgs,
}
