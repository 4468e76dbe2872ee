use crate::cli::commands::{CliCommand, CliContext};
use crate::cli::{CliError, MessageType, TagCommands};
use crate::models::TagUsage;

impl CliCommand for TagCommands {
    fn execute(&self, ctx: &CliContext) -> Result<(), CliError> {
        let mut store = ctx.load_tags()?;

        match self {
            TagCommands::List => {
                let usages: Vec<TagUsage> = store
                    .all_tags()
                    .into_iter()
                    .map(|tag| TagUsage {
                        count: store.count(&tag),
                        tag,
                    })
                    .collect();
                ctx.output.print(&usages)?;
            }
            TagCommands::Top { n } => {
                let n = n.unwrap_or(ctx.config.top_tags);
                ctx.output.print(&store.top_n(n))?;
            }
            TagCommands::Add { tag } => match store.increment(tag)? {
                Some(count) => ctx.output.print_message(
                    &format!("'{}' used {} time(s)", tag.trim(), count),
                    MessageType::Success,
                ),
                None => ctx
                    .output
                    .print_message("Empty tags are ignored", MessageType::Warning),
            },
            TagCommands::Remove { tag } => {
                if store.remove(tag)? {
                    ctx.output
                        .print_message(&format!("Removed '{}'", tag), MessageType::Success);
                } else {
                    ctx.output
                        .print_message(&format!("Unknown tag '{}'", tag), MessageType::Warning);
                }
            }
            TagCommands::Reset => {
                store.reset()?;
                ctx.output
                    .print_message("All tag counts cleared", MessageType::Success);
            }
        }

        Ok(())
    }
}
