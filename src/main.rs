//! ipa-analyze - size breakdown of iOS application archives
//!
//! Unpacks an `.ipa`, classifies its payload into frameworks, native
//! libraries, resources and everything else, and inventories the dynamic
//! libraries linked by the main executable.

use clap::Parser;

mod analysis;
mod archive;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod progress;
mod temp;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(cli.config, args),
        Commands::Deps(args) => commands::deps::run(cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        log::debug!("{e:?}");
        eprintln!("Error: {}", e);
        if e.is_structural() {
            eprintln!("An .ipa must contain Payload/<Name>.app");
        }
        std::process::exit(1);
    }
}
