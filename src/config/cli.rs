use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Discord 單一 embed 欄位的字元上限
pub const FIELD_CHAR_LIMIT: usize = 1024;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "raid-roster")]
#[command(about = "Check raid sign-ups against a party composition and render the roster")]
pub struct CliConfig {
    #[arg(long, default_value = "raid.toml")]
    pub scenario: String,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Render the ordered roster with open slots
    Render {
        /// Split output into blocks of at most this many characters
        #[arg(long)]
        chunk: Option<usize>,
    },
    /// Check whether the scenario's [candidate] can join
    Check,
    /// Show usable jobs per member and open slots
    Feasibility,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("scenario", &self.scenario)?;
        if let Command::Render { chunk: Some(chunk) } = &self.command {
            validate_range("chunk", *chunk, 1, FIELD_CHAR_LIMIT * 4)?;
        }
        Ok(())
    }
}
