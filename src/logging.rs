//! Diagnostic logging setup
//!
//! Logs go to stderr through `simplelog`, so stdout carries only the report.

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Environment variable overriding the log level (e.g. `debug`)
pub const LOG_ENV: &str = "IPA_ANALYZE_LOG";

/// Level from the verbosity flag, unless `IPA_ANALYZE_LOG` names a valid level
pub fn level(verbose: bool, env_override: Option<&str>) -> LevelFilter {
    if let Some(level) = env_override.and_then(|v| v.trim().parse::<LevelFilter>().ok()) {
        return level;
    }
    if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Install the terminal logger; later calls are no-ops
pub fn init(verbose: bool) {
    let env_level = std::env::var(LOG_ENV).ok();
    let level = level(verbose, env_level.as_deref());

    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}
