use crate::cli::commands::{CliCommand, CliContext};
use crate::cli::{CatalogCommands, CliError, MessageType};
use log::debug;

impl CliCommand for CatalogCommands {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError> {
        let mut catalog = ctx.load_catalog()?;
        debug!(
            "Loaded {} catalog entries from {}",
            catalog.len(),
            catalog.path().display()
        );

        match self {
            CatalogCommands::List => {
                let records = catalog.records().to_vec();
                ctx.output.print(&records)?;
            }
            CatalogCommands::Add { name, editor } => {
                if catalog.add(name, editor.as_deref())? {
                    ctx.output
                        .print_message(&format!("Added '{}'", name), MessageType::Success);
                } else {
                    ctx.output.print_message(
                        &format!("'{}' is already in the catalog", name),
                        MessageType::Warning,
                    );
                }
            }
            CatalogCommands::Remove { name } => {
                if catalog.remove(name)? {
                    ctx.output
                        .print_message(&format!("Removed '{}'", name), MessageType::Success);
                } else {
                    ctx.output.print_message(
                        &format!("'{}' is not in the catalog", name),
                        MessageType::Warning,
                    );
                }
            }
            CatalogCommands::Rename { old_name, new_name } => {
                if catalog.rename(old_name, new_name)? {
                    ctx.output.print_message(
                        &format!("Renamed '{}' to '{}'", old_name, new_name),
                        MessageType::Success,
                    );
                } else {
                    ctx.output.print_message(
                        &format!(
                            "Cannot rename '{}' to '{}': unknown name or name already taken",
                            old_name, new_name
                        ),
                        MessageType::Warning,
                    );
                }
            }
            CatalogCommands::SetEditor { name, editor } => {
                if catalog.set_editor(name, editor.as_deref())? {
                    let shown = editor.as_deref().unwrap_or("none");
                    ctx.output.print_message(
                        &format!("Editor of '{}' set to {}", name, shown),
                        MessageType::Success,
                    );
                } else {
                    ctx.output.print_message(
                        &format!("'{}' is not in the catalog", name),
                        MessageType::Warning,
                    );
                }
            }
            CatalogCommands::Resolve { label } => {
                let editor = catalog.resolve_editor(label)?;
                ctx.output
                    .print_message(&format!("{} -> {}", label, editor), MessageType::Info);
            }
        }

        Ok(())
    }
}
