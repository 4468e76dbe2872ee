//! Cubase Project Manager Library
//!
//! This library detects the virtual instruments referenced by Cubase project
//! files and manages the known instrument catalog and project tag counts.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod grouping;
pub mod models;
pub mod scan;
pub mod tags;
pub mod utils;

// Re-export commonly used items for easier imports
pub use catalog::KnownInstrumentCatalog;
pub use config::CONFIG;
pub use grouping::group_by_editor;
pub use models::*;
pub use scan::{scan_file, scan_file_with_progress};
pub use tags::TagUsageStore;
