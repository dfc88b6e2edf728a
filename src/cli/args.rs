//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::inspect::InspectArgs;
use crate::cli::commands::solve::SolveArgs;

#[derive(Parser, Debug)]
#[command(
    name = "cdt",
    about = "Clip Design Toolkit - connector frames and travel stops from boundary geometry",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect a scene file: parts, faces, shared edges
    Inspect(InspectArgs),

    /// Solve a clip definition from a seed edge
    Solve(SolveArgs),
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Yaml,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
