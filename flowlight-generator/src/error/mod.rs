//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the generator
pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;

/// Generator error type
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A required value has neither an explicit override nor a usable default.
    ///
    /// Fatal for the model being generated; sibling models are unaffected.
    #[error("Configuration error: {key} must be provided for {kind} generation of model '{model}'")]
    MissingValue {
        /// Offending key (e.g. `table`, `namespace`)
        key: &'static str,
        /// Generator kind the value was resolved for
        kind: &'static str,
        /// Model (entity) name
        model: String,
    },

    /// Draft document could not be deserialized
    #[error("Invalid model definition: {0}")]
    Definition(#[from] serde_yaml::Error),

    /// Stub contains invalid template syntax
    #[error("Template error in stub '{name}': {source}")]
    TemplateSyntax {
        /// Stub name
        name: String,
        /// Underlying handlebars error
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// Template context could not be serialized
    #[error("Failed to build template context: {0}")]
    Context(#[from] serde_json::Error),

    /// Stub rendering failed
    #[error("Failed to render stub: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Neither a custom nor a built-in stub exists for the configured name
    #[error("Stub file not found for [{kind}]: {name}")]
    StubNotFound {
        /// Generator kind
        kind: &'static str,
        /// Configured stub name
        name: String,
    },

    /// Filesystem error while reading stubs or writing generated files
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Build a [`GeneratorError::MissingValue`]
    #[must_use]
    pub fn missing(key: &'static str, kind: &'static str, model: impl Into<String>) -> Self {
        Self::MissingValue {
            key,
            kind,
            model: model.into(),
        }
    }

    /// Whether this error is a fatal configuration error for a single model
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingValue { .. })
    }
}
