//! Archive structure analysis
//!
//! Turns an extracted application archive into a [`SizeReport`]:
//! - [`folder_size`]: recursive size aggregation
//! - [`resolver`]: linker placeholder resolution for dependency tokens
//! - [`introspect`]: the external dependency-listing tool
//! - [`inventory`]: dependency inventory of the main executable
//! - [`classifier`]: payload walk and per-category totals
//! - [`report`]: the report model and typed warnings

pub mod classifier;
pub mod folder_size;
pub mod introspect;
pub mod inventory;
pub mod report;
pub mod resolver;

pub use classifier::{AppBundle, Classifier, analyze_bundle};
pub use introspect::{CommandLister, DependencyLister};
pub use inventory::build_inventory;
pub use report::{
    AnalysisWarning, Category, CategoryTotal, DependencyInventory, ResolvedLibrary, SizeReport,
    Warnings,
};
