//! Draft-driven generation
//!
//! ```bash
//! flowlight build draft.yaml --output ./project
//! ```

use super::{emit, OutputOptions};
use anyhow::{Context, Result};
use console::style;
use flowlight_generator::{ApiGenerator, Draft};
use std::fs;
use std::path::{Path, PathBuf};

pub struct BuildCommand {
    draft: PathBuf,
    options: OutputOptions,
}

impl BuildCommand {
    pub const fn new(draft: PathBuf, options: OutputOptions) -> Self {
        Self { draft, options }
    }

    pub fn execute(&self) -> Result<()> {
        let draft = load_draft(&self.draft)?;

        if draft.api.is_empty() {
            tracing::warn!(path = %self.draft.display(), "Draft declares no models");
            println!(
                "{} {}",
                style("Nothing to generate in").yellow(),
                style(self.draft.display()).bold()
            );
            return Ok(());
        }

        println!(
            "\n{} {} {}",
            style("Building").cyan().bold(),
            draft.api.len(),
            style("model(s)...").cyan().bold()
        );

        let settings = self.options.settings()?;
        let report = ApiGenerator::new(settings).generate(&draft);
        emit(&report, &self.options)
    }
}

/// Read and parse a draft file
fn load_draft(path: &Path) -> Result<Draft> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft: {}", path.display()))?;
    Draft::from_yaml_str(&source)
        .with_context(|| format!("Failed to parse draft: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DRAFT: &str = "api:\n  Tag:\n    table: tags\n    fields:\n      label: string\n    dto: true\n    organizers: { create: true }\n";

    fn command(dir: &TempDir, contents: &str) -> BuildCommand {
        let draft = dir.path().join("draft.yaml");
        fs::write(&draft, contents).unwrap();
        BuildCommand::new(
            draft,
            OutputOptions {
                output: dir.path().join("out"),
                config: None,
                dry_run: false,
            },
        )
    }

    #[test]
    fn test_build_writes_files() {
        let dir = TempDir::new().unwrap();
        command(&dir, DRAFT).execute().unwrap();

        let out = dir.path().join("out/app/Domain/Tags");
        assert!(out.join("Data/TagData.php").is_file());
        assert!(out.join("Organizers/TagOrganizer.php").is_file());
    }

    #[test]
    fn test_empty_draft_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        command(&dir, "api: {}\n").execute().unwrap();
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_failed_model_fails_command() {
        let dir = TempDir::new().unwrap();
        let err = command(&dir, "api:\n  Tag:\n    organizers: true\n")
            .execute()
            .unwrap_err();
        assert!(err.to_string().contains("1 model(s) failed"));
    }

    #[test]
    fn test_missing_draft_file() {
        let err = load_draft(Path::new("/nonexistent/draft.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read draft"));
    }
}
