pub mod catalog;
pub mod config;
pub mod migrate;
pub mod scan;
pub mod tag;

use crate::catalog::KnownInstrumentCatalog;
use crate::cli::{CliError, OutputFormat, OutputFormatter};
use crate::config::Config;
use crate::tags::TagUsageStore;

/// CLI command execution context
pub struct CliContext {
    pub config: Config,
    pub output: OutputFormatter,
    pub no_color: bool,
}

impl CliContext {
    pub fn new(config: Config, output_format: OutputFormat, no_color: bool) -> Self {
        Self {
            config,
            output: OutputFormatter::new(output_format, no_color),
            no_color,
        }
    }

    /// Loads the catalog file the configuration points at
    pub fn load_catalog(&self) -> Result<KnownInstrumentCatalog, CliError> {
        let path = self.config.catalog_path()?;
        Ok(KnownInstrumentCatalog::load(path)?)
    }

    /// Loads the tag store file the configuration points at
    pub fn load_tags(&self) -> Result<TagUsageStore, CliError> {
        let path = self.config.tags_path()?;
        Ok(TagUsageStore::load(path)?)
    }
}

/// Trait for CLI command execution
pub trait CliCommand {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError>;
}

pub use catalog::*;
pub use config::*;
pub use migrate::*;
pub use scan::*;
pub use tag::*;
