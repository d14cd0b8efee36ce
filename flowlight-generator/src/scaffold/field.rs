//! Field normalization and rule derivation
//!
//! A [`Field`] turns one terse field declaration into resolved validation
//! rules, default messages, a display label and a type hint. Every derived
//! value is recomputed on access from the stored declaration, so a `Field` is
//! immutable and freely shareable.
//!
//! Rule derivation:
//!
//! 1. Default rules of the type, then the explicit rules as given
//! 2. Without a `nullable*` / `sometimes*` rule, prepend `required` (or
//!    `sometimes` for optional fields); otherwise move the `nullable` and
//!    `sometimes` rules to the front, keeping relative order
//! 3. `max:{length}` for `string` / `text` fields with a length
//! 4. Drop duplicates, first occurrence wins

use super::helpers::TemplateHelpers;
use super::lenient::lenient;
use super::type_rules::TypeRuleMap;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// Type used when a declaration names none
pub const DEFAULT_FIELD_TYPE: &str = "string";

const MESSAGE_PRIORITY: &[&str] = &[
    "required",
    "sometimes",
    "nullable",
    "string",
    "integer",
    "numeric",
    "boolean",
    "date",
    "array",
    "email",
    "min",
    "max",
    "in",
];

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("required", "{label} is required."),
    ("sometimes", "{label} is optional."),
    ("string", "{label} must be text."),
    ("integer", "{label} must be an integer."),
    ("numeric", "{label} must be a number."),
    ("boolean", "{label} must be true or false."),
    ("date", "{label} must be a valid date."),
    ("array", "{label} must be an array."),
    ("email", "{label} must be a valid email address."),
    ("max", "{label} cannot exceed {value}."),
    ("min", "{label} must be at least {value}."),
    ("in", "{label} must be one of: {values}."),
];

const FALLBACK_MESSAGE: &str = "Validation failed for {label}.";

/// Keyword portion of a rule (`"max:255"` → `"max"`)
///
/// # Examples
///
/// ```
/// # use flowlight_generator::scaffold::rule_key;
/// assert_eq!(rule_key("max:255"), "max");
/// assert_eq!(rule_key("in:a,b:c"), "in");
/// assert_eq!(rule_key("required"), "required");
/// ```
#[must_use]
pub fn rule_key(rule: &str) -> &str {
    rule.split_once(':').map_or(rule, |(key, _)| key)
}

fn is_presence_key(key: &str) -> bool {
    key == "nullable" || key == "sometimes"
}

fn is_presence_rule(rule: &str) -> bool {
    rule.starts_with("nullable") || rule.starts_with("sometimes")
}

/// Structured field declaration
///
/// Every value is optional and deserialized leniently: a value of the wrong
/// shape reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldOptions {
    /// Raw field type (default `string`)
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub field_type: Option<String>,

    /// Whether the field must be present (default `true`)
    #[serde(default, deserialize_with = "lenient")]
    pub required: Option<bool>,

    /// Maximum length, turned into a `max:` rule for text types
    #[serde(default, deserialize_with = "lenient")]
    pub length: Option<u32>,

    /// Numeric precision; informational only
    #[serde(default, deserialize_with = "lenient")]
    pub precision: Option<u32>,

    /// Display label override
    #[serde(default, deserialize_with = "lenient")]
    pub attribute: Option<String>,

    /// Explicit rules, appended after the type defaults
    #[serde(default, deserialize_with = "lenient")]
    pub rules: Option<Vec<String>>,

    /// Explicit messages keyed by rule keyword or `field.rule`
    #[serde(default, deserialize_with = "lenient")]
    pub messages: Option<IndexMap<String, String>>,
}

impl FieldOptions {
    /// Options with just a type
    #[must_use]
    pub fn typed(field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            ..Self::default()
        }
    }

    /// Set the required flag
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Set the length
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the precision
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Set the display label
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Set the explicit rules
    #[must_use]
    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules = Some(rules.into_iter().map(Into::into).collect());
        self
    }

    /// Add an explicit message
    #[must_use]
    pub fn with_message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), message.into());
        self
    }
}

/// A field declaration: either a bare type name or structured options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// Shorthand for `{type: <name>}`
    Type(String),
    /// Structured declaration
    Options(FieldOptions),
}

impl FieldSpec {
    /// Normalize into structured options
    #[must_use]
    pub fn into_options(self) -> FieldOptions {
        match self {
            Self::Type(field_type) => FieldOptions::typed(field_type),
            Self::Options(options) => options,
        }
    }
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self::Options(FieldOptions::default())
    }
}

impl<'de> Deserialize<'de> for FieldSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(field_type) => Self::Type(field_type),
            map @ serde_json::Value::Object(_) => {
                Self::Options(serde_json::from_value(map).unwrap_or_default())
            }
            _ => Self::default(),
        })
    }
}

impl From<&str> for FieldSpec {
    fn from(field_type: &str) -> Self {
        Self::Type(field_type.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(field_type: String) -> Self {
        Self::Type(field_type)
    }
}

impl From<FieldOptions> for FieldSpec {
    fn from(options: FieldOptions) -> Self {
        Self::Options(options)
    }
}

/// Flat projection of a field with all derived values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    /// Field name
    pub name: String,
    /// Raw configured type
    #[serde(rename = "type")]
    pub field_type: String,
    /// Target-language type hint
    pub type_hint: String,
    /// Required flag
    pub required: bool,
    /// Configured length
    pub length: Option<u32>,
    /// Configured precision
    pub precision: Option<u32>,
    /// Display label
    pub label: String,
    /// Resolved rules
    pub rules: Vec<String>,
    /// Resolved messages
    pub messages: IndexMap<String, String>,
    /// `name → label`
    pub attributes: IndexMap<String, String>,
}

/// Rule entry for template iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleEntry {
    /// Full rule text
    pub value: String,
}

/// Message entry for template iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageEntry {
    /// `field.rule` key
    pub key: String,
    /// Message text
    pub value: String,
}

/// Template-friendly projection of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererField {
    /// Field name
    pub name: String,
    /// Target-language type hint
    pub type_hint: String,
    /// Display label
    pub attribute: String,
    /// Required flag
    pub required: bool,
    /// Rules as entries
    pub rules: Vec<RuleEntry>,
    /// Messages as entries
    pub messages: Vec<MessageEntry>,
}

/// One normalized model field
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    options: FieldOptions,
    type_rules: Arc<TypeRuleMap>,
}

impl Field {
    /// Create a field using the built-in type tables
    #[must_use]
    pub fn new(name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        Self::with_type_rules(name, spec, TypeRuleMap::standard())
    }

    /// Create a field from a bare type name
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::Field;
    /// let field = Field::from_type("age", "int");
    /// assert_eq!(field.rules(), vec!["required", "integer"]);
    /// assert_eq!(field.type_hint(), "int");
    /// ```
    #[must_use]
    pub fn from_type(name: impl Into<String>, field_type: &str) -> Self {
        Self::new(name, field_type)
    }

    /// Create a field resolved against custom type tables
    #[must_use]
    pub fn with_type_rules(
        name: impl Into<String>,
        spec: impl Into<FieldSpec>,
        type_rules: Arc<TypeRuleMap>,
    ) -> Self {
        Self {
            name: name.into(),
            options: spec.into().into_options(),
            type_rules,
        }
    }

    /// Field name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw configured type (`string` when absent)
    #[must_use]
    pub fn field_type(&self) -> &str {
        self.options
            .field_type
            .as_deref()
            .unwrap_or(DEFAULT_FIELD_TYPE)
    }

    /// Type after alias normalization
    #[must_use]
    pub fn canonical_type(&self) -> String {
        self.type_rules.canonical(self.field_type())
    }

    /// Whether the field is required (`true` when absent)
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.options.required.unwrap_or(true)
    }

    /// Configured length
    #[must_use]
    pub const fn length(&self) -> Option<u32> {
        self.options.length
    }

    /// Configured precision
    #[must_use]
    pub const fn precision(&self) -> Option<u32> {
        self.options.precision
    }

    /// Display label: the `attribute` override or the title-cased name
    #[must_use]
    pub fn attribute_label(&self) -> String {
        self.options
            .attribute
            .clone()
            .unwrap_or_else(|| TemplateHelpers::to_label(&self.name))
    }

    /// `(name, label)` pair for attribute maps
    #[must_use]
    pub fn attribute_entry(&self) -> (String, String) {
        (self.name.clone(), self.attribute_label())
    }

    /// Resolved validation rules
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::{Field, FieldOptions};
    /// let email = Field::new(
    ///     "email",
    ///     FieldOptions::typed("string").with_required(false).with_length(255),
    /// );
    /// assert_eq!(email.rules(), vec!["sometimes", "string", "max:255"]);
    ///
    /// let note = Field::new(
    ///     "note",
    ///     FieldOptions::typed("text").with_rules(["min:3", "nullable"]),
    /// );
    /// assert_eq!(note.rules(), vec!["nullable", "string", "min:3"]);
    /// ```
    #[must_use]
    pub fn rules(&self) -> Vec<String> {
        let mut rules = self.type_rules.rules(self.field_type());
        rules.extend(self.options.rules.iter().flatten().cloned());

        if rules.iter().any(|rule| is_presence_rule(rule)) {
            let (mut front, rest): (Vec<_>, Vec<_>) = rules
                .into_iter()
                .partition(|rule| is_presence_key(rule_key(rule)));
            front.extend(rest);
            rules = front;
        } else {
            let presence = if self.is_required() { "required" } else { "sometimes" };
            rules.insert(0, presence.to_string());
        }

        if let Some(length) = self.length() {
            if matches!(self.canonical_type().as_str(), "string" | "text") {
                rules.push(format!("max:{length}"));
            }
        }

        rules.into_iter().collect::<IndexSet<_>>().into_iter().collect()
    }

    /// Explicit messages with keys normalized to `field.rule`
    ///
    /// A key without a `.` is taken to belong to this field. Keys naming
    /// another field are kept as given.
    #[must_use]
    pub fn explicit_messages(&self) -> IndexMap<String, String> {
        self.options
            .messages
            .iter()
            .flatten()
            .map(|(key, message)| {
                let key = if key.contains('.') {
                    key.clone()
                } else {
                    format!("{}.{key}", self.name)
                };
                (key, message.clone())
            })
            .collect()
    }

    /// Resolved messages keyed `field.rule`, in stable priority order
    ///
    /// Explicit messages always win over generated defaults.
    #[must_use]
    pub fn messages(&self) -> IndexMap<String, String> {
        let mut messages = self.explicit_messages();

        let label = self.attribute_label();
        for rule in self.rules() {
            let key = format!("{}.{}", self.name, rule_key(&rule));
            messages
                .entry(key)
                .or_insert_with(|| default_message(&label, &rule));
        }

        order_messages(messages)
    }

    /// Target-language type hint, nullable when the field is optional
    #[must_use]
    pub fn type_hint(&self) -> String {
        self.type_rules
            .type_hint(self.field_type(), !self.is_required())
    }

    /// Flat projection with every derived value
    #[must_use]
    pub fn to_summary(&self) -> FieldSummary {
        let (name, label) = self.attribute_entry();
        FieldSummary {
            name: self.name.clone(),
            field_type: self.field_type().to_string(),
            type_hint: self.type_hint(),
            required: self.is_required(),
            length: self.length(),
            precision: self.precision(),
            label: label.clone(),
            rules: self.rules(),
            messages: self.messages(),
            attributes: IndexMap::from([(name, label)]),
        }
    }

    /// Projection with rules and messages expanded into entry lists
    #[must_use]
    pub fn to_renderer(&self) -> RendererField {
        RendererField {
            name: self.name.clone(),
            type_hint: self.type_hint(),
            attribute: self.attribute_label(),
            required: self.is_required(),
            rules: self
                .rules()
                .into_iter()
                .map(|value| RuleEntry { value })
                .collect(),
            messages: self
                .messages()
                .into_iter()
                .map(|(key, value)| MessageEntry { key, value })
                .collect(),
        }
    }
}

/// Default message for a rule, with the label and rule argument substituted
///
/// A rule without an argument substitutes the whole rule text.
fn default_message(label: &str, rule: &str) -> String {
    let key = rule_key(rule);
    let template = DEFAULT_MESSAGES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(FALLBACK_MESSAGE, |(_, template)| *template);
    let argument = rule.split_once(':').map_or(rule, |(_, argument)| argument);

    template
        .replace("{values}", argument)
        .replace("{value}", argument)
        .replace("{label}", label)
}

fn priority(rule: &str) -> Option<usize> {
    MESSAGE_PRIORITY.iter().position(|known| *known == rule)
}

fn compare_rule_keys(a: &str, b: &str) -> Ordering {
    match (priority(a), priority(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Group messages by field (first appearance) and sort each group by rule priority
fn order_messages(messages: IndexMap<String, String>) -> IndexMap<String, String> {
    let mut grouped: IndexMap<String, Vec<(String, String)>> = IndexMap::new();
    for (key, message) in messages {
        let (field, rule) = key.split_once('.').unwrap_or((key.as_str(), ""));
        grouped
            .entry(field.to_string())
            .or_default()
            .push((rule.to_string(), message));
    }

    grouped
        .into_iter()
        .flat_map(|(field, mut rules)| {
            rules.sort_by(|(a, _), (b, _)| compare_rule_keys(a, b));
            rules
                .into_iter()
                .map(move |(rule, message)| (format!("{field}.{rule}"), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_bare_type_shorthand() {
        let field = Field::from_type("title", "string");
        assert_eq!(field.field_type(), "string");
        assert!(field.is_required());
        assert_eq!(field.length(), None);
        assert_eq!(field.rules(), strings(&["required", "string"]));
    }

    #[test]
    fn test_defaults_for_empty_options() {
        let field = Field::new("title", FieldOptions::default());
        assert_eq!(field.field_type(), "string");
        assert!(field.is_required());
        assert_eq!(field.type_hint(), "string");
    }

    #[test]
    fn test_label() {
        assert_eq!(Field::from_type("first_name", "string").attribute_label(), "First Name");
        let field = Field::new("dob", FieldOptions::typed("date").with_attribute("Date of Birth"));
        assert_eq!(field.attribute_label(), "Date of Birth");
        assert_eq!(
            field.attribute_entry(),
            ("dob".to_string(), "Date of Birth".to_string())
        );
    }

    #[test]
    fn test_optional_field_gets_sometimes() {
        let field = Field::new("nickname", FieldOptions::typed("string").with_required(false));
        assert_eq!(field.rules(), strings(&["sometimes", "string"]));
        assert_eq!(field.type_hint(), "?string");
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let field = Field::new(
            "x",
            FieldOptions::default().with_rules(["required", "required", "string"]),
        );
        assert_eq!(field.rules(), strings(&["required", "string"]));
    }

    #[test]
    fn test_explicit_rules_follow_defaults() {
        let field = Field::new("email", FieldOptions::typed("email").with_rules(["unique:users"]));
        assert_eq!(
            field.rules(),
            strings(&["required", "string", "email", "unique:users"])
        );
    }

    #[test]
    fn test_presence_rules_move_to_front() {
        let field = Field::new(
            "bio",
            FieldOptions::typed("text").with_rules(["min:10", "sometimes", "nullable"]),
        );
        assert_eq!(
            field.rules(),
            strings(&["sometimes", "nullable", "string", "min:10"])
        );
    }

    #[test]
    fn test_presence_rule_suppresses_required() {
        let field = Field::new("age", FieldOptions::typed("integer").with_rules(["nullable"]));
        let rules = field.rules();
        assert_eq!(rules, strings(&["nullable", "integer"]));
        assert!(!rules.contains(&"required".to_string()));
    }

    #[test]
    fn test_length_gating() {
        let integer = Field::new("x", FieldOptions::typed("integer").with_length(10));
        assert!(!integer.rules().iter().any(|r| r.starts_with("max:")));

        let string = Field::new("x", FieldOptions::typed("string").with_length(10));
        assert!(string.rules().contains(&"max:10".to_string()));

        let varchar = Field::new("x", FieldOptions::typed("varchar").with_length(40));
        assert!(varchar.rules().contains(&"max:40".to_string()));
    }

    #[test]
    fn test_explicit_max_not_duplicated() {
        let field = Field::new(
            "code",
            FieldOptions::typed("string").with_length(8).with_rules(["max:8"]),
        );
        assert_eq!(field.rules(), strings(&["required", "string", "max:8"]));
    }

    #[test]
    fn test_default_messages() {
        let field = Field::new(
            "email",
            FieldOptions::typed("string")
                .with_required(false)
                .with_length(255)
                .with_rules(["email"]),
        );
        let messages = field.messages();
        let expected = vec![
            ("email.sometimes", "Email is optional."),
            ("email.string", "Email must be text."),
            ("email.email", "Email must be a valid email address."),
            ("email.max", "Email cannot exceed 255."),
        ];

        let actual: Vec<_> = messages
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_parameterized_messages() {
        let field = Field::new(
            "status",
            FieldOptions::default().with_rules(["in:draft,published", "min:2"]),
        );
        let messages = field.messages();
        assert_eq!(messages["status.in"], "Status must be one of: draft,published.");
        assert_eq!(messages["status.min"], "Status must be at least 2.");
    }

    #[test]
    fn test_unknown_rule_gets_fallback_message() {
        let field = Field::new("slug", FieldOptions::default().with_rules(["alpha_dash"]));
        assert_eq!(
            field.messages()["slug.alpha_dash"],
            "Validation failed for Slug."
        );
    }

    #[test]
    fn test_explicit_messages_win() {
        let field = Field::new(
            "name",
            FieldOptions::default()
                .with_message("required", "We need your name.")
                .with_message("name.string", "Letters please."),
        );
        let messages = field.messages();
        assert_eq!(messages["name.required"], "We need your name.");
        assert_eq!(messages["name.string"], "Letters please.");
    }

    #[test]
    fn test_explicit_messages_normalized() {
        let field = Field::new(
            "password",
            FieldOptions::default()
                .with_message("min", "Too short.")
                .with_message("password_confirmation.required", "Confirm it."),
        );
        let explicit = field.explicit_messages();
        assert_eq!(explicit.len(), 2);
        assert_eq!(explicit["password.min"], "Too short.");
        assert_eq!(explicit["password_confirmation.required"], "Confirm it.");
        assert!(Field::from_type("name", "string").explicit_messages().is_empty());
    }

    #[test]
    fn test_message_ordering() {
        let field = Field::new(
            "code",
            FieldOptions::typed("string")
                .with_length(5)
                .with_rules(["zeta", "alpha", "min:1"])
                .with_message("regex", "Bad format."),
        );
        let keys: Vec<_> = field.messages().keys().cloned().collect();
        assert_eq!(
            keys,
            strings(&[
                "code.required",
                "code.string",
                "code.min",
                "code.max",
                "code.alpha",
                "code.regex",
                "code.zeta",
            ])
        );
    }

    #[test]
    fn test_messages_for_other_fields_are_grouped() {
        let field = Field::new(
            "password",
            FieldOptions::default()
                .with_message("password_confirmation.required", "Confirm it.")
                .with_message("min", "Too short."),
        );
        let keys: Vec<_> = field.messages().keys().cloned().collect();
        assert_eq!(
            keys,
            strings(&[
                "password_confirmation.required",
                "password.required",
                "password.string",
                "password.min",
            ])
        );
    }

    #[test]
    fn test_custom_type_rules() {
        let map = TypeRuleMap::default().with_type("money", strings(&["numeric", "min:0"]), Some("float".into()));
        let field = Field::with_type_rules("price", "money", Arc::new(map));
        assert_eq!(field.rules(), strings(&["required", "numeric", "min:0"]));
        assert_eq!(field.type_hint(), "float");
    }

    #[test]
    fn test_lenient_options() {
        let spec: FieldSpec = serde_json::from_value(serde_json::json!({
            "type": 42,
            "required": "nope",
            "length": "long",
            "rules": "required|string",
            "messages": ["bad"],
            "attribute": "Title",
        }))
        .unwrap();
        let field = Field::new("title", spec);
        assert_eq!(field.field_type(), "string");
        assert!(field.is_required());
        assert_eq!(field.length(), None);
        assert_eq!(field.attribute_label(), "Title");
        assert_eq!(field.rules(), strings(&["required", "string"]));
    }

    #[test]
    fn test_spec_from_yaml() {
        let specs: IndexMap<String, FieldSpec> = serde_yaml::from_str(
            "name: string\nage:\n  type: int\n  required: false\nweird: [1, 2]\n",
        )
        .unwrap();
        assert_eq!(specs["name"], FieldSpec::Type("string".to_string()));
        assert_eq!(
            specs["age"],
            FieldSpec::Options(FieldOptions::typed("int").with_required(false))
        );
        assert_eq!(specs["weird"], FieldSpec::default());
    }

    #[test]
    fn test_projections() {
        let field = Field::new(
            "price",
            FieldOptions::typed("decimal").with_length(10).with_precision(2),
        );
        let summary = field.to_summary();
        assert_eq!(summary.field_type, "decimal");
        assert_eq!(summary.type_hint, "float");
        assert_eq!(summary.precision, Some(2));
        assert_eq!(summary.rules, strings(&["required", "numeric"]));
        assert_eq!(summary.attributes["price"], "Price");

        let json = serde_json::to_value(field.to_renderer()).unwrap();
        assert_eq!(json["typeHint"], "float");
        assert_eq!(json["rules"][0]["value"], "required");
        assert_eq!(json["messages"][1]["key"], "price.numeric");
    }

    fn arb_rule() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("required".to_string()),
            Just("sometimes".to_string()),
            Just("nullable".to_string()),
            Just("string".to_string()),
            Just("email".to_string()),
            Just("min:3".to_string()),
            Just("max:20".to_string()),
            Just("in:a,b".to_string()),
            Just("unique:users".to_string()),
            "[a-z]{1,8}",
        ]
    }

    fn arb_options() -> impl Strategy<Value = FieldOptions> {
        (
            prop::option::of(prop_oneof![
                Just("string".to_string()),
                Just("text".to_string()),
                Just("int".to_string()),
                Just("decimal".to_string()),
                Just("email".to_string()),
                Just("json".to_string()),
                Just("uuid".to_string()),
            ]),
            prop::option::of(any::<bool>()),
            prop::option::of(1u32..500),
            prop::option::of(prop::collection::vec(arb_rule(), 0..6)),
        )
            .prop_map(|(field_type, required, length, rules)| FieldOptions {
                field_type,
                required,
                length,
                rules,
                ..FieldOptions::default()
            })
    }

    fn arb_options_with_presence() -> impl Strategy<Value = FieldOptions> {
        (
            arb_options(),
            prop_oneof![Just("nullable"), Just("sometimes")],
            any::<prop::sample::Index>(),
        )
            .prop_map(|(mut options, presence, index)| {
                let rules = options.rules.get_or_insert_with(Vec::new);
                let at = index.index(rules.len() + 1);
                rules.insert(at, presence.to_string());
                options
            })
    }

    proptest! {
        #[test]
        fn explicit_presence_rules_lead_in_order(options in arb_options_with_presence()) {
            let explicit = options.rules.clone().unwrap_or_default();
            let field = Field::new("field", options);
            let rules = field.rules();

            prop_assert!(
                is_presence_key(rule_key(&rules[0])),
                "first rule {} is not a presence rule",
                rules[0]
            );

            let mut expected: Vec<String> = TypeRuleMap::standard()
                .rules(field.field_type())
                .into_iter()
                .chain(explicit)
                .filter(|rule| !is_presence_key(rule_key(rule)))
                .collect();
            if let Some(length) = field.length() {
                if matches!(field.canonical_type().as_str(), "string" | "text") {
                    expected.push(format!("max:{length}"));
                }
            }
            let expected: Vec<String> = expected.into_iter().collect::<IndexSet<_>>().into_iter().collect();

            let rest: Vec<String> = rules
                .into_iter()
                .filter(|rule| !is_presence_key(rule_key(rule)))
                .collect();
            prop_assert_eq!(rest, expected);
        }

        #[test]
        fn rules_lead_with_presence_rule(options in arb_options()) {
            let explicit_presence = options
                .rules
                .iter()
                .flatten()
                .any(|rule| is_presence_rule(rule));
            let required = options.required.unwrap_or(true);
            let rules = Field::new("field", options).rules();

            if !explicit_presence {
                let expected = if required { "required" } else { "sometimes" };
                prop_assert_eq!(rules[0].as_str(), expected);
            }
        }

        #[test]
        fn rules_are_idempotent_and_unique(options in arb_options()) {
            let field = Field::new("field", options);
            let first = field.rules();
            prop_assert_eq!(&first, &field.rules());

            let unique: IndexSet<_> = first.iter().collect();
            prop_assert_eq!(unique.len(), first.len());
        }

        #[test]
        fn every_rule_has_a_message(options in arb_options()) {
            let field = Field::new("field", options);
            let messages = field.messages();
            for rule in field.rules() {
                let key = format!("field.{}", rule_key(&rule));
                prop_assert!(messages.contains_key(&key), "missing message for {}", key);
            }
        }
    }
}
