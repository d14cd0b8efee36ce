//! flowlight-generator
//!
//! Turns declarative model definitions into deterministic validation metadata
//! and renders DTO and Organizer source files from it.
//!
//! The pipeline is:
//!
//! 1. A draft document (`api:` tree) is deserialized into [`ModelDefinition`]s.
//! 2. Each definition is wrapped in a [`ModelConfig`], which resolves namespaces,
//!    class names and parent classes per [`GeneratorKind`].
//! 3. The [`FieldCollection`] of a model yields [`Field`]s whose rules, messages,
//!    labels and type hints are derived on demand.
//! 4. The [`ApiGenerator`] flattens everything into template contexts and
//!    renders the configured stubs.
//!
//! # Example
//!
//! ```rust
//! use flowlight_generator::Field;
//!
//! let field = Field::from_type("first_name", "string");
//! assert_eq!(field.attribute_label(), "First Name");
//! assert_eq!(field.rules(), vec!["required", "string"]);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod generators;
pub mod observability;
pub mod scaffold;
pub mod templates;

pub use config::GeneratorSettings;
pub use error::{GeneratorError, Result};
pub use generators::{ApiGenerator, GeneratedFile, GenerationReport, GeneratorKind};
pub use scaffold::{
    Draft, Field, FieldCollection, FieldOptions, FieldSpec, ModelConfig, ModelDefinition,
    TemplateHelpers, TypeRuleMap,
};
pub use templates::TemplateRegistry;
