use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parse, rebuild and check logs search queries
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (defaults to the config file's format, then text)
    #[arg(short = 'F', long, global = true)]
    pub format: Option<OutputFormat>,

    /// Path to a TOML config file
    #[arg(short, long, global = true, env = "LOGS_QUERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// When to color output
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a query and list its clauses
    Parse {
        /// Query text
        query: String,
    },
    /// Rebuild query text from a JSON array of clauses
    Stringify {
        /// JSON file with clauses (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Print the canonical query sent to the backend
    Server {
        /// Query text
        query: String,
    },
    /// Check that every clause has a value
    Validate {
        /// Query text
        query: String,
    },
    /// Quote a single value for use in a query
    Quote {
        /// Value to quote
        value: String,

        /// Treat the value as a number
        #[arg(short, long)]
        number: bool,
    },
    /// Print the query colored by clause
    Highlight {
        /// Query text
        query: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
