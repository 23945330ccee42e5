//! Command implementations for the ipa-analyze CLI

pub mod analyze;
pub mod completions;
pub mod deps;
pub mod version;
