use crate::cli::CliError;
use crate::cli::OutputFormat;
use crate::models::{EditorGroup, InstrumentRecord, TagUsage};
use colored::Colorize;
use comfy_table::{presets, Table};
use serde::Serialize;

/// Output formatter for CLI results
pub struct OutputFormatter {
    format: OutputFormat,
    no_color: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self { format, no_color }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format and print data
    pub fn print<T: Serialize + TableDisplay>(&self, data: &T) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Table => self.print_table(data),
            OutputFormat::Json => self.print_json(data),
            OutputFormat::Csv => self.print_csv(data),
        }
    }

    /// Print a message with appropriate formatting
    pub fn print_message(&self, message: &str, message_type: MessageType) {
        // Keep machine-readable output clean
        if self.format != OutputFormat::Table {
            eprintln!("{}", message);
            return;
        }

        if self.no_color {
            println!("{}", message);
            return;
        }

        let formatted_message = match message_type {
            MessageType::Info => message.blue(),
            MessageType::Success => message.green(),
            MessageType::Warning => message.yellow(),
            MessageType::Error => message.red(),
        };
        println!("{}", formatted_message);
    }

    fn print_table<T: Serialize + TableDisplay>(&self, data: &T) -> Result<(), CliError> {
        let table = data.to_table();
        println!("{}", table);
        Ok(())
    }

    fn print_json<T: Serialize>(&self, data: &T) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(data).map_err(|e| -> CliError { e.into() })?;
        println!("{}", json);
        Ok(())
    }

    fn print_csv<T: Serialize + TableDisplay>(&self, data: &T) -> Result<(), CliError> {
        let mut writer = csv::Writer::from_writer(std::io::stdout());
        data.to_csv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Message type for colored output
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

/// Trait for types that can be displayed as tables
pub trait TableDisplay {
    fn to_table(&self) -> Table;
    fn to_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), CliError>;
}

/// Create a new table with consistent styling
pub fn create_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL).set_header(header);
    table
}

impl TableDisplay for Vec<InstrumentRecord> {
    fn to_table(&self) -> Table {
        let mut table = create_table(vec!["#", "Name", "Editor"]);
        for (idx, record) in self.iter().enumerate() {
            table.add_row(vec![
                (idx + 1).to_string(),
                record.name.clone(),
                record.editor_or_unknown().to_string(),
            ]);
        }
        table
    }

    fn to_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), CliError> {
        writer.write_record(["name", "editor"])?;
        for record in self {
            writer.write_record([record.name.as_str(), record.editor.as_deref().unwrap_or("")])?;
        }
        Ok(())
    }
}

impl TableDisplay for Vec<TagUsage> {
    fn to_table(&self) -> Table {
        let mut table = create_table(vec!["Tag", "Uses"]);
        for usage in self {
            table.add_row(vec![usage.tag.clone(), usage.count.to_string()]);
        }
        table
    }

    fn to_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), CliError> {
        writer.write_record(["tag", "count"])?;
        for usage in self {
            writer.write_record([usage.tag.clone(), usage.count.to_string()])?;
        }
        Ok(())
    }
}

impl TableDisplay for Vec<EditorGroup> {
    fn to_table(&self) -> Table {
        let mut table = create_table(vec!["Editor", "Instruments"]);
        for group in self {
            table.add_row(vec![group.editor.clone(), group.names.join("\n")]);
        }
        table
    }

    fn to_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), CliError> {
        writer.write_record(["editor", "instrument"])?;
        for group in self {
            for name in &group.names {
                writer.write_record([group.editor.as_str(), name.as_str()])?;
            }
        }
        Ok(())
    }
}

/// Check if colors should be used
pub fn should_use_color() -> bool {
    std::env::var("NO_COLOR").is_err() && colored::control::SHOULD_COLORIZE.should_colorize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_csv_has_one_row_per_instrument() {
        let groups = vec![
            EditorGroup {
                editor: "Arturia".to_string(),
                names: vec!["Analog Lab 01".to_string(), "Pigments".to_string()],
            },
            EditorGroup {
                editor: "Xfer".to_string(),
                names: vec!["Serum 01".to_string()],
            },
        ];

        let mut writer = csv::Writer::from_writer(Vec::new());
        groups.to_csv(&mut writer).unwrap();
        let csv = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert_eq!(
            csv,
            "editor,instrument\nArturia,Analog Lab 01\nArturia,Pigments\nXfer,Serum 01\n"
        );
    }

    #[test]
    fn test_catalog_table_shows_unknown_editor() {
        let records = vec![InstrumentRecord::new("Retrologue")];
        let rendered = records.to_table().to_string();
        assert!(rendered.contains("Retrologue"));
        assert!(rendered.contains("Unknown"));
    }
}
