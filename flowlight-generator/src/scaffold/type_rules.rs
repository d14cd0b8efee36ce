//! Field type tables: default validation rules and type hints
//!
//! Raw field types are normalized (case-insensitively) through an alias table
//! before lookup, so database-ish spellings resolve to canonical types:
//!
//! ```text
//! int                          → integer
//! decimal | float | double | number → numeric
//! bool                         → boolean
//! datetime | timestamp         → date
//! varchar | char               → string
//! json                         → array
//! ```
//!
//! Unknown types normalize to their lower-cased selves, have no default rules
//! and hint as `string`. Lookups never fail.

use crate::config::GeneratorSettings;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

const ALIASES: &[(&str, &str)] = &[
    ("int", "integer"),
    ("decimal", "numeric"),
    ("float", "numeric"),
    ("double", "numeric"),
    ("number", "numeric"),
    ("bool", "boolean"),
    ("datetime", "date"),
    ("timestamp", "date"),
    ("varchar", "string"),
    ("char", "string"),
    ("json", "array"),
];

const DEFAULT_RULES: &[(&str, &[&str])] = &[
    ("string", &["string"]),
    ("text", &["string"]),
    ("integer", &["integer"]),
    ("numeric", &["numeric"]),
    ("boolean", &["boolean"]),
    ("date", &["date"]),
    ("array", &["array"]),
    ("email", &["string", "email"]),
];

const TYPE_HINTS: &[(&str, &str)] = &[
    ("string", "string"),
    ("text", "string"),
    ("integer", "int"),
    ("numeric", "float"),
    ("boolean", "bool"),
    ("date", "\\DateTimeInterface"),
    ("array", "array"),
    ("email", "string"),
];

/// Type hint used for canonical types missing from the hint table
pub const FALLBACK_TYPE_HINT: &str = "string";

static STANDARD: Lazy<Arc<TypeRuleMap>> = Lazy::new(|| Arc::new(TypeRuleMap::default()));

/// Canonical type → default rules / type hint lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRuleMap {
    aliases: HashMap<String, String>,
    rules: HashMap<String, Vec<String>>,
    type_hints: HashMap<String, String>,
}

impl Default for TypeRuleMap {
    fn default() -> Self {
        Self {
            aliases: ALIASES
                .iter()
                .map(|(alias, canonical)| ((*alias).to_string(), (*canonical).to_string()))
                .collect(),
            rules: DEFAULT_RULES
                .iter()
                .map(|(ty, rules)| {
                    (
                        (*ty).to_string(),
                        rules.iter().map(|r| (*r).to_string()).collect(),
                    )
                })
                .collect(),
            type_hints: TYPE_HINTS
                .iter()
                .map(|(ty, hint)| ((*ty).to_string(), (*hint).to_string()))
                .collect(),
        }
    }
}

impl TypeRuleMap {
    /// Shared instance with the built-in tables only
    #[must_use]
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    /// Built-in tables extended by the `field_types` / `type_aliases` settings
    #[must_use]
    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        let mut map = Self::default();
        for (alias, canonical) in &settings.type_aliases {
            map = map.with_alias(alias, canonical);
        }
        for (name, field_type) in &settings.field_types {
            map = map.with_type(name, field_type.rules.clone(), field_type.type_hint.clone());
        }
        map
    }

    /// Register an alias for a canonical type
    #[must_use]
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases
            .insert(alias.to_lowercase(), canonical.to_lowercase());
        self
    }

    /// Register (or replace) a canonical type
    ///
    /// A missing type hint leaves any existing hint in place.
    #[must_use]
    pub fn with_type(mut self, name: &str, rules: Vec<String>, type_hint: Option<String>) -> Self {
        let key = name.to_lowercase();
        if let Some(hint) = type_hint {
            self.type_hints.insert(key.clone(), hint);
        }
        self.rules.insert(key, rules);
        self
    }

    /// Normalize a raw type into its canonical form
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TypeRuleMap;
    /// let map = TypeRuleMap::default();
    /// assert_eq!(map.canonical("INT"), "integer");
    /// assert_eq!(map.canonical("Decimal"), "numeric");
    /// assert_eq!(map.canonical("uuid"), "uuid");
    /// ```
    #[must_use]
    pub fn canonical(&self, raw: &str) -> String {
        let lower = raw.to_lowercase();
        self.aliases.get(&lower).cloned().unwrap_or(lower)
    }

    /// Default validation rules for a raw or canonical type
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TypeRuleMap;
    /// let map = TypeRuleMap::default();
    /// assert_eq!(map.rules("int"), vec!["integer"]);
    /// assert_eq!(map.rules("email"), vec!["string", "email"]);
    /// assert!(map.rules("geometry").is_empty());
    /// ```
    #[must_use]
    pub fn rules(&self, raw: &str) -> Vec<String> {
        self.rules
            .get(&self.canonical(raw))
            .cloned()
            .unwrap_or_default()
    }

    /// Target-language type hint, prefixed with `?` when nullable
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TypeRuleMap;
    /// let map = TypeRuleMap::default();
    /// assert_eq!(map.type_hint("int", false), "int");
    /// assert_eq!(map.type_hint("int", true), "?int");
    /// assert_eq!(map.type_hint("decimal", false), "float");
    /// assert_eq!(map.type_hint("datetime", true), "?\\DateTimeInterface");
    /// ```
    #[must_use]
    pub fn type_hint(&self, raw: &str, nullable: bool) -> String {
        let canonical = self.canonical(raw);
        let hint = self
            .type_hints
            .get(&canonical)
            .map_or(FALLBACK_TYPE_HINT, String::as_str);

        if nullable {
            format!("?{hint}")
        } else {
            hint.to_string()
        }
    }
}
