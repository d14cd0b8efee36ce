//! Field normalization and model configuration
//!
//! This module turns declarative model definitions into fully-resolved field
//! metadata: validation rules, default messages, labels and type hints, plus
//! the per-model namespace and class-name resolution used by the generators.

pub mod collection;
pub mod field;
pub mod helpers;
pub mod lenient;
pub mod model;
pub mod shorthand;
pub mod type_rules;

pub use collection::FieldCollection;
pub use field::{
    rule_key, Field, FieldOptions, FieldSpec, FieldSummary, MessageEntry, RendererField,
    RuleEntry,
};
pub use helpers::TemplateHelpers;
pub use model::{Draft, ModelConfig, ModelDefinition, SectionConfig, SectionOptions};
pub use shorthand::FieldShorthand;
pub use type_rules::TypeRuleMap;
