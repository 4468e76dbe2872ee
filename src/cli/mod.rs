pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A lightweight error type for CLI commands
pub type CliError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// cubase-pm - Cubase project organizer
#[derive(Parser, Debug)]
#[command(
    name = "cubase-pm",
    about = "Detect the instruments used by Cubase projects and keep your tags in order",
    version,
    long_about = r#"
cubase-pm - Cubase Project Manager

Scans .cpr project files for the virtual instruments they reference, groups them
by editor, and manages the known instrument catalog and project tags.

EXAMPLES:
  cubase-pm scan ~/Music/Song.cpr --group     # Instruments of one project, by editor
  cubase-pm scan ~/Music/Cubase --threads 4   # Every project under a folder
  cubase-pm catalog add "Serum" --editor Xfer
  cubase-pm catalog resolve "Serum 01"
  cubase-pm tag top 5
  cubase-pm migrate                           # Convert a bare-name catalog to records
"#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, csv)
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect instruments in project files or folders
    Scan {
        /// Project files or folders (uses configured project paths if not specified)
        paths: Vec<PathBuf>,

        /// Group detected instruments by editor
        #[arg(long)]
        group: bool,

        /// Number of files scanned concurrently
        #[arg(long, default_value = "1")]
        threads: usize,
    },

    /// Known instrument catalog management
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogCommands,
    },

    /// Tag usage management
    Tag {
        #[command(subcommand)]
        subcommand: TagCommands,
    },

    /// Convert a bare-name catalog file into records (a .bak copy is kept)
    Migrate {
        /// Catalog file (uses the configured catalog if not specified)
        path: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List known instruments
    List,

    /// Add an instrument
    Add {
        /// Instrument name as it appears in projects
        name: String,

        /// Editor (vendor) of the instrument
        #[arg(long)]
        editor: Option<String>,
    },

    /// Remove an instrument
    Remove {
        /// Instrument name
        name: String,
    },

    /// Rename an instrument
    Rename {
        /// Current name
        old_name: String,

        /// New name
        new_name: String,
    },

    /// Set or clear the editor of an instrument
    SetEditor {
        /// Instrument name
        name: String,

        /// Editor to set (clears it when omitted)
        editor: Option<String>,
    },

    /// Show which editor a detected label resolves to
    Resolve {
        /// Detected label, e.g. "Serum 01"
        label: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List all tags alphabetically
    List,

    /// Show the most used tags
    Top {
        /// Number of tags (uses the configured top_tags if not specified)
        n: Option<usize>,
    },

    /// Record a use of a tag
    Add {
        /// Tag name
        tag: String,
    },

    /// Forget a tag
    Remove {
        /// Tag name
        tag: String,
    },

    /// Forget every tag
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Validate configuration
    Validate,
}

pub use commands::*;
pub use output::*;
