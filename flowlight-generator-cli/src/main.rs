//! flowlight CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use commands::{BuildCommand, GenerateCommand};
use flowlight_generator::observability::{self, LogFormat, ObservabilityConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowlight")]
#[command(version)]
#[command(about = "Generate DTO and Organizer classes from model definitions", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Compact)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate classes for one entity from field shorthand
    Generate {
        /// Entity name (converted to `PascalCase`, e.g. `Post`, `UserProfile`)
        entity: String,
        /// Space-separated fields (`name:type[:length[:precision]][?]`)
        #[arg(long)]
        fields: Option<String>,
        /// Generate the DTO
        #[arg(long)]
        dto: bool,
        /// Generate the Organizer
        #[arg(long)]
        organizers: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate classes for every model of a draft file
    Build {
        /// Draft file (YAML with a top-level `api` mapping)
        draft: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output root directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
    /// Configuration file layered over the discovered ones
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print the rendered files instead of writing them
    #[arg(long)]
    dry_run: bool,
}

impl From<OutputArgs> for commands::OutputOptions {
    fn from(args: OutputArgs) -> Self {
        Self {
            output: args.output,
            config: args.config,
            dry_run: args.dry_run,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = ObservabilityConfig::default().with_format(cli.log_format.into());
    if cli.verbose {
        logging = logging.verbose();
    }
    observability::init(&logging)?;

    match cli.command {
        Commands::Generate {
            entity,
            fields,
            dto,
            organizers,
            output,
        } => {
            let cmd = GenerateCommand::new(entity, fields, dto, organizers, output.into());
            cmd.execute()?;
        }
        Commands::Build { draft, output } => {
            let cmd = BuildCommand::new(draft, output.into());
            cmd.execute()?;
        }
    }

    Ok(())
}
