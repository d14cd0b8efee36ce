//! DTO and Organizer generators
//!
//! Each [`GeneratorKind`] has one [`Generator`] implementation that flattens a
//! [`ModelConfig`] into a template context. [`ApiGenerator`] drives every
//! enabled kind over every model of a [`Draft`]; a failing model is reported
//! and skipped while its siblings still generate.

use crate::config::{GeneratorSettings, KindSettings};
use crate::error::{GeneratorError, Result};
use crate::scaffold::{Draft, ModelConfig, ModelDefinition, TemplateHelpers, TypeRuleMap};
use crate::templates::TemplateRegistry;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod dto;
pub mod organizer;

pub use dto::DtoGenerator;
pub use organizer::OrganizerGenerator;

/// Kind of generated class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// Data transfer object
    Dto,
    /// CRUD operation handler
    Organizer,
}

impl GeneratorKind {
    /// Every kind, in generation order
    pub const ALL: [Self; 2] = [Self::Dto, Self::Organizer];

    /// Short label used in logs and errors
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dto => "dto",
            Self::Organizer => "organizer",
        }
    }

    /// Key of the model definition section that enables this kind
    #[must_use]
    pub const fn section_key(self) -> &'static str {
        match self {
            Self::Dto => "dto",
            Self::Organizer => "organizers",
        }
    }

    /// Per-kind defaults
    #[must_use]
    pub const fn settings(self, settings: &GeneratorSettings) -> &KindSettings {
        match self {
            Self::Dto => &settings.dto,
            Self::Organizer => &settings.organizer,
        }
    }

    /// Generator implementing this kind
    #[must_use]
    pub fn generator(self) -> &'static dyn Generator {
        match self {
            Self::Dto => &DtoGenerator,
            Self::Organizer => &OrganizerGenerator,
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dto => write!(f, "DTO"),
            Self::Organizer => write!(f, "Organizer"),
        }
    }
}

/// Class identity shared by every template context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassContext {
    /// Class namespace
    pub namespace: String,
    /// Class name
    pub class: String,
    /// Fully-qualified parent class
    pub parent_class: String,
    /// Last segment of the parent class
    pub parent_class_short: String,
    /// Model name
    pub model: String,
}

impl ClassContext {
    /// Resolve the class identity of `model` for `kind`
    ///
    /// # Errors
    ///
    /// [`GeneratorError::MissingValue`] when a name has no usable default.
    pub fn resolve(model: &ModelConfig, kind: GeneratorKind) -> Result<Self> {
        let parent_class = model.extended_class_name(kind)?;
        Ok(Self {
            namespace: model.namespace(kind)?,
            class: model.class_name(kind)?,
            parent_class_short: TemplateHelpers::short_class_name(&parent_class),
            parent_class,
            model: model.model_name().to_string(),
        })
    }
}

/// Turns a model into a template context for one kind
pub trait Generator: Send + Sync {
    /// Kind produced by this generator
    fn kind(&self) -> GeneratorKind;

    /// Template context for `model`
    ///
    /// # Errors
    ///
    /// [`GeneratorError::MissingValue`] when a required value is missing.
    fn context(&self, model: &ModelConfig) -> Result<serde_json::Value>;

    /// Render the stub for `model` and compute its destination
    ///
    /// # Errors
    ///
    /// Context, stub resolution and rendering errors.
    fn generate(&self, model: &ModelConfig, templates: &TemplateRegistry) -> Result<GeneratedFile> {
        let kind = self.kind();
        let settings = model.settings();
        let context = self.context(model)?;
        let content = templates.render(kind, &kind.settings(settings).stub, &context)?;

        let path = TemplateHelpers::namespace_to_path(
            &settings.paths.app_root,
            &settings.paths.root_namespace,
            &model.namespace(kind)?,
            &model.class_name(kind)?,
            &settings.paths.extension,
        );

        tracing::debug!(model = model.model_name(), kind = kind.label(), path = %path.display(), "Rendered file");

        Ok(GeneratedFile {
            path,
            content,
            description: format!("{kind} for {}", model.model_name()),
        })
    }
}

/// Represents a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

/// A model that could not be generated
#[derive(Debug)]
pub struct ModelFailure {
    /// Model name
    pub model: String,
    /// Why generation failed
    pub error: GeneratorError,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Rendered files, in model then kind order
    pub files: Vec<GeneratedFile>,
    /// Models that failed as a whole
    pub failures: Vec<ModelFailure>,
}

impl GenerationReport {
    /// Whether every model generated
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Batch generator over all models of a draft
pub struct ApiGenerator {
    settings: Arc<GeneratorSettings>,
    type_rules: Arc<TypeRuleMap>,
    templates: TemplateRegistry,
    kinds: Vec<GeneratorKind>,
}

impl ApiGenerator {
    /// Generator for every kind, with custom stubs from `paths.stubs_dir`
    #[must_use]
    pub fn new(settings: GeneratorSettings) -> Self {
        let templates = TemplateRegistry::new().with_stubs_dir(settings.paths.stubs_dir.clone());
        let type_rules = Arc::new(TypeRuleMap::from_settings(&settings));

        Self {
            settings: Arc::new(settings),
            type_rules,
            templates,
            kinds: GeneratorKind::ALL.to_vec(),
        }
    }

    /// Replace the template registry
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    /// Restrict generation to `kinds`
    #[must_use]
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = GeneratorKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Settings in use
    #[must_use]
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Wrap a definition with this generator's settings
    #[must_use]
    pub fn model_config(&self, name: &str, definition: ModelDefinition) -> ModelConfig {
        ModelConfig::new(name, definition, Arc::clone(&self.settings))
            .with_type_rules(Arc::clone(&self.type_rules))
    }

    /// Generate every enabled kind of one model
    ///
    /// All or nothing: the first error discards the model's other files.
    ///
    /// # Errors
    ///
    /// The first configuration, stub or render error.
    pub fn generate_model(&self, model: &ModelConfig) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::new();
        for &kind in &self.kinds {
            if !model.should_generate(kind) {
                tracing::debug!(model = model.model_name(), kind = kind.label(), "Section disabled, skipping");
                continue;
            }
            files.push(kind.generator().generate(model, &self.templates)?);
        }
        Ok(files)
    }

    /// Generate every model of `draft`
    #[must_use]
    pub fn generate(&self, draft: &Draft) -> GenerationReport {
        let mut report = GenerationReport::default();

        for (name, definition) in &draft.api {
            let model = self.model_config(name, definition.clone());
            match self.generate_model(&model) {
                Ok(files) => {
                    tracing::info!(model = %name, files = files.len(), "Generated model");
                    report.files.extend(files);
                }
                Err(error) => {
                    tracing::warn!(model = %name, error = %error, "Model generation failed");
                    report.failures.push(ModelFailure {
                        model: name.clone(),
                        error,
                    });
                }
            }
        }

        report
    }
}

/// Write files below `output_root`, creating parent directories
///
/// Existing files are overwritten.
///
/// # Errors
///
/// [`GeneratorError::Io`] for the first directory or file that cannot be written.
pub fn write_files(files: &[GeneratedFile], output_root: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let path = output_root.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, &file.content).map_err(|source| GeneratorError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "Wrote file");
        written.push(path);
    }

    Ok(written)
}
