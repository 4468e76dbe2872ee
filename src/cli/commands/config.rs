use crate::cli::commands::{CliCommand, CliContext};
use crate::cli::{CliError, ConfigCommands, MessageType, OutputFormat};

impl CliCommand for ConfigCommands {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError> {
        match self {
            ConfigCommands::Show => match ctx.output.format() {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&ctx.config)?);
                }
                _ => {
                    print!("{}", ctx.config.to_toml_string()?);
                    println!("# resolved catalog: {}", ctx.config.catalog_path()?.display());
                    println!("# resolved tags: {}", ctx.config.tags_path()?.display());
                }
            },
            ConfigCommands::Validate => {
                let warnings = ctx.config.validate()?;
                for warning in &warnings {
                    ctx.output.print_message(warning, MessageType::Warning);
                }
                ctx.output
                    .print_message("Configuration is valid", MessageType::Success);
            }
        }
        Ok(())
    }
}
