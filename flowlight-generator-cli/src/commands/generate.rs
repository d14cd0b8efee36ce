//! Single-entity generation from field shorthand
//!
//! # Example
//!
//! ```bash
//! flowlight generate Invoice \
//!   --fields "number:string:32 total:decimal:10:2 paid_at:datetime?" \
//!   --dto --organizers
//! ```

use super::{emit, OutputOptions};
use anyhow::{Context, Result};
use console::style;
use convert_case::{Case, Casing};
use flowlight_generator::scaffold::{FieldShorthand, SectionConfig, TemplateHelpers};
use flowlight_generator::{ApiGenerator, Draft, GeneratorKind, ModelDefinition};

pub struct GenerateCommand {
    entity: String,
    fields: Option<String>,
    dto: bool,
    organizers: bool,
    options: OutputOptions,
}

impl GenerateCommand {
    pub const fn new(
        entity: String,
        fields: Option<String>,
        dto: bool,
        organizers: bool,
        options: OutputOptions,
    ) -> Self {
        Self {
            entity,
            fields,
            dto,
            organizers,
            options,
        }
    }

    /// `PascalCase` model name
    fn model_name(&self) -> Result<String> {
        let name = self.entity.trim().to_case(Case::Pascal);
        if name.is_empty() {
            anyhow::bail!("Entity name cannot be empty");
        }
        Ok(name)
    }

    /// One-model draft equivalent to the command line
    ///
    /// Both kinds are generated when neither `--dto` nor `--organizers` is given.
    pub fn build_draft(&self) -> Result<Draft> {
        let model = self.model_name()?;
        let both = !self.dto && !self.organizers;

        let mut definition =
            ModelDefinition::default().with_table(TemplateHelpers::to_table_name(&model));

        if let Some(fields) = &self.fields {
            for field in FieldShorthand::parse_list(fields).context("Invalid --fields")? {
                definition = definition.with_field(field.name, field.options);
            }
        }

        for (kind, enabled) in [
            (GeneratorKind::Dto, self.dto),
            (GeneratorKind::Organizer, self.organizers),
        ] {
            definition = definition.with_section(kind, SectionConfig::Toggle(both || enabled));
        }

        Ok(Draft::default().with_model(model, definition))
    }

    pub fn execute(&self) -> Result<()> {
        let draft = self.build_draft()?;
        let model = draft.api.keys().next().cloned().unwrap_or_default();

        println!(
            "\n{} {} {}",
            style("Generating").cyan().bold(),
            style(&model).green().bold(),
            style("...").cyan().bold()
        );

        let settings = self.options.settings()?;
        let report = ApiGenerator::new(settings).generate(&draft);
        emit(&report, &self.options)?;

        if !self.options.dry_run {
            println!(
                "\n{} {} is ready!",
                style("✨").green().bold(),
                style(&model).green().bold()
            );
        }

        Ok(())
    }
}
