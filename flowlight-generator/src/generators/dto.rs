//! DTO generator
//!
//! Besides the per-field renderer records, the context carries three
//! pre-joined blocks so simple stubs can paste them in place:
//!
//! ```text
//! attributes:         'name' => 'Name',
//! messages:           'name.required' => 'Name is required.',
//! rules:              'name' => [
//!                         'required',
//!                         'string'
//!                     ],
//! ```

use super::{ClassContext, Generator, GeneratorKind};
use crate::error::Result;
use crate::scaffold::{Field, FieldCollection, ModelConfig, RendererField, TemplateHelpers};
use indexmap::IndexMap;
use serde::Serialize;

const ENTRY_INDENT: &str = "            ";
const RULE_INDENT: &str = "                ";

/// Template context for a DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DtoContext {
    /// Class identity
    #[serde(flatten)]
    pub class: ClassContext,
    /// Per-field records
    pub fields: Vec<RendererField>,
    /// Pre-joined attribute entries
    pub attributes: String,
    /// Pre-joined message entries
    pub messages: String,
    /// Pre-joined rule entries
    pub rules: String,
}

impl DtoContext {
    /// Build the context for `model`
    ///
    /// # Errors
    ///
    /// [`crate::GeneratorError::MissingValue`] when a class name has no usable default.
    pub fn build(model: &ModelConfig) -> Result<Self> {
        let fields = model.fields();
        Ok(Self {
            class: ClassContext::resolve(model, GeneratorKind::Dto)?,
            fields: fields.iter().map(Field::to_renderer).collect(),
            attributes: attributes_block(fields),
            messages: messages_block(fields, &model.custom_dto_messages()),
            rules: rules_block(fields),
        })
    }
}

fn entry(key: &str, value: &str) -> String {
    format!(
        "{ENTRY_INDENT}{} => {},",
        TemplateHelpers::quote(key),
        TemplateHelpers::quote(value)
    )
}

/// `'name' => 'Label',` per field
#[must_use]
pub fn attributes_block(fields: &FieldCollection) -> String {
    fields
        .iter()
        .map(|field| entry(field.name(), &field.attribute_label()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `'field.rule' => 'Message',` per field message, then custom messages
///
/// An explicit message declared on any field beats a default generated by
/// another field for the same key; the first explicit declaration wins.
/// Custom messages whose key a field already produced are skipped.
#[must_use]
pub fn messages_block(fields: &FieldCollection, custom: &IndexMap<String, String>) -> String {
    let mut explicit: IndexMap<String, String> = IndexMap::new();
    for (key, message) in fields.iter().flat_map(Field::explicit_messages) {
        explicit.entry(key).or_insert(message);
    }

    let mut messages: IndexMap<String, String> = IndexMap::new();
    for field in fields {
        for (key, message) in field.messages() {
            let message = explicit.get(&key).cloned().unwrap_or(message);
            messages.entry(key).or_insert(message);
        }
    }
    for (key, message) in custom {
        messages
            .entry(key.clone())
            .or_insert_with(|| message.clone());
    }

    messages
        .iter()
        .map(|(key, message)| entry(key, message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line rule list per field
#[must_use]
pub fn rules_block(fields: &FieldCollection) -> String {
    fields
        .iter()
        .map(|field| {
            let rules = field
                .rules()
                .iter()
                .map(|rule| format!("{RULE_INDENT}{}", TemplateHelpers::quote(rule)))
                .collect::<Vec<_>>()
                .join(",\n");
            format!(
                "{ENTRY_INDENT}{} => [\n{rules}\n{ENTRY_INDENT}],",
                TemplateHelpers::quote(field.name())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// DTO generator
#[derive(Debug, Clone, Copy, Default)]
pub struct DtoGenerator;

impl Generator for DtoGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Dto
    }

    fn context(&self, model: &ModelConfig) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(DtoContext::build(model)?)?)
    }
}
