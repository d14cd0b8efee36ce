//! Model definitions and per-model configuration
//!
//! A draft document holds model definitions under a top-level `api` key:
//!
//! ```yaml
//! api:
//!   User:
//!     table: users
//!     fields:
//!       name: string
//!       email: { type: string, required: false, length: 255 }
//!     dto: true
//!     organizers: { create: true, read: false }
//! ```
//!
//! [`ModelConfig`] wraps one definition and resolves names for each
//! [`GeneratorKind`], falling back to the configured per-kind defaults.

use super::collection::FieldCollection;
use super::field::FieldSpec;
use super::lenient::{is_truthy, lenient, lenient_or_default};
use super::type_rules::TypeRuleMap;
use crate::config::GeneratorSettings;
use crate::error::{GeneratorError, Result};
use crate::generators::GeneratorKind;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// Operations generated when `organizers: true`
pub const DEFAULT_ORGANIZER_TYPES: [&str; 5] = ["create", "read", "update", "delete", "list"];

/// Error kind label for values that belong to the model rather than a generator
const MODEL_SCOPE: &str = "api";

/// Structured generator section (`dto:` / `organizers:` as a mapping)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionOptions {
    /// Namespace override
    #[serde(default, deserialize_with = "lenient")]
    pub namespace: Option<String>,

    /// Class name override
    #[serde(default, rename = "className", deserialize_with = "lenient")]
    pub class_name: Option<String>,

    /// Parent class override (fully qualified)
    #[serde(default, deserialize_with = "lenient")]
    pub extends: Option<String>,

    /// Extra messages rendered after the per-field messages
    #[serde(default, deserialize_with = "lenient")]
    pub messages: Option<IndexMap<String, String>>,

    /// Remaining keys, e.g. organizer operation toggles
    #[serde(flatten)]
    pub toggles: IndexMap<String, serde_json::Value>,
}

/// A generator section: a plain switch or structured options
///
/// A list counts as a switch that is on when non-empty; an empty mapping is off.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionConfig {
    /// `dto: true` / `organizers: false`
    Toggle(bool),
    /// Non-empty mapping
    Options(SectionOptions),
}

impl SectionConfig {
    /// Structured options, if any
    #[must_use]
    pub const fn options(&self) -> Option<&SectionOptions> {
        match self {
            Self::Options(options) => Some(options),
            Self::Toggle(_) => None,
        }
    }

    /// Whether the section switches generation on
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Toggle(true) | Self::Options(_))
    }
}

impl<'de> Deserialize<'de> for SectionConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        use serde_json::Value;

        match Value::deserialize(deserializer)? {
            Value::Bool(enabled) => Ok(Self::Toggle(enabled)),
            Value::Object(map) if map.is_empty() => Ok(Self::Toggle(false)),
            Value::Array(items) => Ok(Self::Toggle(!items.is_empty())),
            map @ Value::Object(_) => serde_json::from_value(map)
                .map(Self::Options)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected a boolean, a list or a mapping, found {other}"
            ))),
        }
    }
}

/// Raw definition of one model
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelDefinition {
    /// Database table
    #[serde(default, deserialize_with = "lenient")]
    pub table: Option<String>,

    /// Field declarations in declaration order
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub fields: IndexMap<String, FieldSpec>,

    /// DTO section
    #[serde(default, deserialize_with = "lenient")]
    pub dto: Option<SectionConfig>,

    /// Organizer section
    #[serde(default, deserialize_with = "lenient")]
    pub organizers: Option<SectionConfig>,
}

impl ModelDefinition {
    /// Set the table
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add a field declaration
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.fields.insert(name.into(), spec.into());
        self
    }

    /// Set a generator section
    #[must_use]
    pub fn with_section(mut self, kind: GeneratorKind, section: SectionConfig) -> Self {
        match kind {
            GeneratorKind::Dto => self.dto = Some(section),
            GeneratorKind::Organizer => self.organizers = Some(section),
        }
        self
    }

    /// Section for a generator kind
    #[must_use]
    pub const fn section(&self, kind: GeneratorKind) -> Option<&SectionConfig> {
        match kind {
            GeneratorKind::Dto => self.dto.as_ref(),
            GeneratorKind::Organizer => self.organizers.as_ref(),
        }
    }
}

fn lenient_models<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, ModelDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, serde_json::Value>> = lenient(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| (name, serde_json::from_value(value).unwrap_or_default()))
        .collect())
}

/// A draft document: model name → definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Draft {
    /// Models in declaration order
    #[serde(default, deserialize_with = "lenient_models")]
    pub api: IndexMap<String, ModelDefinition>,
}

impl Draft {
    /// Parse a YAML (or JSON) draft document
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Definition`] when the text is not valid YAML
    /// or its top level is not a mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::Draft;
    /// let draft = Draft::from_yaml_str("api:\n  Post:\n    table: posts\n    dto: true\n").unwrap();
    /// assert_eq!(draft.api["Post"].table.as_deref(), Some("posts"));
    /// ```
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Add a model
    #[must_use]
    pub fn with_model(mut self, name: impl Into<String>, definition: ModelDefinition) -> Self {
        self.api.insert(name.into(), definition);
        self
    }
}

/// One model's definition with defaults resolved from settings
///
/// The field collection is built on first access and shared afterwards.
#[derive(Debug)]
pub struct ModelConfig {
    model_name: String,
    definition: ModelDefinition,
    settings: Arc<GeneratorSettings>,
    type_rules: Arc<TypeRuleMap>,
    fields: OnceCell<FieldCollection>,
}

impl ModelConfig {
    /// Wrap a model definition
    #[must_use]
    pub fn new(
        model_name: impl Into<String>,
        definition: ModelDefinition,
        settings: Arc<GeneratorSettings>,
    ) -> Self {
        let type_rules = if settings.field_types.is_empty() && settings.type_aliases.is_empty() {
            TypeRuleMap::standard()
        } else {
            Arc::new(TypeRuleMap::from_settings(&settings))
        };

        Self {
            model_name: model_name.into(),
            definition,
            settings,
            type_rules,
            fields: OnceCell::new(),
        }
    }

    /// Resolve fields against already-built type tables
    #[must_use]
    pub fn with_type_rules(mut self, type_rules: Arc<TypeRuleMap>) -> Self {
        self.type_rules = type_rules;
        self.fields = OnceCell::new();
        self
    }

    /// Model name
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Settings the defaults are taken from
    #[must_use]
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Model fields in declaration order
    #[must_use]
    pub fn fields(&self) -> &FieldCollection {
        self.fields.get_or_init(|| {
            FieldCollection::with_type_rules(self.definition.fields.clone(), &self.type_rules)
        })
    }

    /// Whether the section of `kind` switches generation on
    #[must_use]
    pub fn should_generate(&self, kind: GeneratorKind) -> bool {
        self.definition
            .section(kind)
            .is_some_and(SectionConfig::is_enabled)
    }

    /// Structured options of the section of `kind`
    #[must_use]
    pub fn section_options(&self, kind: GeneratorKind) -> Option<&SectionOptions> {
        self.definition.section(kind).and_then(SectionConfig::options)
    }

    fn resolve(
        &self,
        kind: GeneratorKind,
        key: &'static str,
        explicit: impl FnOnce(&SectionOptions) -> Option<&String>,
        default: impl FnOnce() -> String,
    ) -> Result<String> {
        let value = self
            .section_options(kind)
            .and_then(explicit)
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .unwrap_or_else(default);

        if value.trim().is_empty() {
            return Err(GeneratorError::missing(key, kind.label(), &self.model_name));
        }
        Ok(value)
    }

    /// Namespace for `kind`
    ///
    /// # Errors
    ///
    /// [`GeneratorError::MissingValue`] when there is no override and the
    /// configured default is blank.
    pub fn namespace(&self, kind: GeneratorKind) -> Result<String> {
        self.resolve(
            kind,
            "namespace",
            |options| options.namespace.as_ref(),
            || {
                kind.settings(&self.settings)
                    .namespace_for(&self.settings.paths.root_namespace, &self.model_name)
            },
        )
    }

    /// Class name for `kind`
    ///
    /// # Errors
    ///
    /// [`GeneratorError::MissingValue`] when there is no override and the
    /// configured default is blank.
    pub fn class_name(&self, kind: GeneratorKind) -> Result<String> {
        self.resolve(
            kind,
            "className",
            |options| options.class_name.as_ref(),
            || kind.settings(&self.settings).class_name_for(&self.model_name),
        )
    }

    /// Fully-qualified parent class for `kind`
    ///
    /// # Errors
    ///
    /// [`GeneratorError::MissingValue`] when there is no override and the
    /// configured default is blank.
    pub fn extended_class_name(&self, kind: GeneratorKind) -> Result<String> {
        self.resolve(
            kind,
            "extends",
            |options| options.extends.as_ref(),
            || kind.settings(&self.settings).base_class.clone(),
        )
    }

    /// Database table
    ///
    /// # Errors
    ///
    /// [`GeneratorError::MissingValue`] with key `table` when absent or blank.
    pub fn table_name(&self) -> Result<&str> {
        self.definition
            .table
            .as_deref()
            .filter(|table| !table.trim().is_empty())
            .ok_or_else(|| GeneratorError::missing("table", MODEL_SCOPE, &self.model_name))
    }

    /// Organizer operations to generate
    ///
    /// `true` yields every operation, a mapping yields its truthy keys in
    /// order, anything else yields none.
    #[must_use]
    pub fn organizer_types(&self) -> Vec<String> {
        match self.definition.section(GeneratorKind::Organizer) {
            Some(SectionConfig::Toggle(true)) => DEFAULT_ORGANIZER_TYPES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            Some(SectionConfig::Options(options)) => options
                .toggles
                .iter()
                .filter(|(_, enabled)| is_truthy(enabled))
                .map(|(name, _)| name.clone())
                .collect(),
            Some(SectionConfig::Toggle(false)) | None => Vec::new(),
        }
    }

    /// Extra DTO messages from the `dto` section
    #[must_use]
    pub fn custom_dto_messages(&self) -> IndexMap<String, String> {
        self.section_options(GeneratorKind::Dto)
            .and_then(|options| options.messages.clone())
            .unwrap_or_default()
    }
}
