//! Report rendering
//!
//! - [`formatter`]: text, Markdown and JSON renderings of a report
//! - [`size`]: human-readable byte sizes

pub mod formatter;
pub mod size;

pub use formatter::{TextFormatter, render, render_json, render_markdown, render_text};
pub use size::format_size;
