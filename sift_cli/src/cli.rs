use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sift_core::AttributeType;

use super::ui::OutputFormat;

/// Defines the top-level interface for the Sift CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(version, about = "Sift CLI: Build and run People API profile filters.")]
pub struct SiftCli {
    /// Base URL of the People API (e.g. https://api.example.com).
    #[arg(long, global = true, env = "SIFT_BASE_URL")]
    pub base_url: Option<String>,

    /// API key sent as `Authorization: App <key>`.
    #[arg(long, global = true, env = "SIFT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: SiftCliCommand,
}

/// Defines the available subcommands of the Sift CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum SiftCliCommand {
    /// Compile a filter file and print the raw and encoded filter.
    Compile {
        /// Filter file (JSON).
        file: PathBuf,
    },
    /// Compile a filter file and run it against the persons endpoint.
    Run {
        /// Filter file (JSON).
        file: PathBuf,
    },
    /// List the filterable attributes of the account.
    Attributes,
    /// Show the operators offered for an attribute type.
    Operators {
        /// Attribute type (e.g. string, integer, date, enum, array, list)
        #[arg(short, long)]
        r#type: AttributeType,
        /// Attribute name, for field-specific operator choices (e.g. tags)
        #[arg(long)]
        field: Option<String>,
    },
    /// Interactively build a filter from the account's attributes.
    Build {
        /// Save the finished filter to this file.
        #[arg(long)]
        save: Option<PathBuf>,
        /// Run the finished filter without asking.
        #[arg(long)]
        run: bool,
    },
}
