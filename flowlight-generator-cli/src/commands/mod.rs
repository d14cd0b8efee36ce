//! CLI command implementations

pub mod build;
pub mod generate;

pub use build::BuildCommand;
pub use generate::GenerateCommand;

use anyhow::{Context, Result};
use console::style;
use flowlight_generator::generators::write_files;
use flowlight_generator::{GenerationReport, GeneratorSettings};
use std::path::{Path, PathBuf};

/// Options shared by every generating command
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Output root directory
    pub output: PathBuf,
    /// Extra configuration file
    pub config: Option<PathBuf>,
    /// Print instead of writing
    pub dry_run: bool,
}

impl OutputOptions {
    /// Load settings from the standard locations plus `--config`
    pub fn settings(&self) -> Result<GeneratorSettings> {
        GeneratorSettings::load_with(self.config.as_deref())
            .context("Failed to load configuration")
    }
}

/// Print or write the generated files, then report failures
///
/// Files of successful models are emitted even when other models failed.
pub fn emit(report: &GenerationReport, options: &OutputOptions) -> Result<()> {
    if options.dry_run {
        for file in &report.files {
            println!(
                "{} {} ({})",
                style("==>").cyan().bold(),
                style(file.path.display()).bold(),
                style(&file.description).dim()
            );
            println!("{}", file.content);
        }
    } else {
        let written = write_files(&report.files, &options.output)
            .context("Failed to write generated files")?;

        println!(
            "\n{} {} files:",
            style("Generated").green().bold(),
            written.len()
        );
        for (file, path) in report.files.iter().zip(&written) {
            println!(
                "  {} {} ({})",
                style("✓").green(),
                style(display_path(path, &options.output)).dim(),
                style(&file.description).dim()
            );
        }
    }

    for failure in &report.failures {
        eprintln!(
            "  {} {}: {}",
            style("✗").red(),
            style(&failure.model).yellow().bold(),
            failure.error
        );
    }

    if !report.is_success() {
        anyhow::bail!("{} model(s) failed to generate", report.failures.len());
    }

    Ok(())
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
