use crate::catalog::{migrate_catalog_file, MigrationOutcome};
use crate::cli::commands::{CliCommand, CliContext};
use crate::cli::{CliError, MessageType};
use std::path::PathBuf;

pub struct MigrateCommand {
    pub path: Option<PathBuf>,
}

impl CliCommand for MigrateCommand {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => ctx.config.catalog_path()?,
        };

        match migrate_catalog_file(&path)? {
            MigrationOutcome::AlreadyMigrated => ctx.output.print_message(
                &format!("{} is already in record form", path.display()),
                MessageType::Info,
            ),
            MigrationOutcome::Migrated { backup, entries } => ctx.output.print_message(
                &format!(
                    "Migrated {} entries in {} (backup: {})",
                    entries,
                    path.display(),
                    backup.display()
                ),
                MessageType::Success,
            ),
        }

        Ok(())
    }
}
