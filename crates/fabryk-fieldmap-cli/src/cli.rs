//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "FABRYK_FIELDMAP_CONFIG";

/// Fabryk field mapping tool
#[derive(Parser, Debug)]
#[command(name = "fieldmap")]
#[command(version, about = "Resolve search field names and build index documents", long_about = None)]
pub struct Args {
    /// Settings file path
    #[arg(short, long, env = CONFIG_ENV)]
    pub config: Option<String>,

    /// Mapping configuration file (YAML or JSON); overrides the settings file
    #[arg(short, long, global = true)]
    pub mappings: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Build an index document from an XML record
    Build {
        /// XML record file
        record: PathBuf,

        /// Terminology file describing the record's terms
        #[arg(short, long)]
        terminology: Option<PathBuf>,

        /// Value for the document id field
        #[arg(long)]
        id: Option<String>,
    },

    /// Resolve one field name
    Name {
        /// Base field name
        base: String,

        /// Data type of the value
        #[arg(short, long)]
        data_type: Option<String>,

        /// Index type to resolve for
        #[arg(short, long, default_value = "searchable")]
        index_type: String,
    },

    /// Resolve every field for one value
    Fields {
        /// Base field name
        base: String,

        /// Raw value
        value: String,

        /// Data type of the value
        #[arg(short, long)]
        data_type: Option<String>,

        /// Requested index types; prefix with `not_` to exclude a default
        #[arg(short = 'a', long = "index-as", num_args = 1..)]
        index_as: Vec<String>,
    },

    /// Show the effective mappings
    Show,
}

// ============================================================================
// Tests
// ============================================================================
