//! Ordered field collection with filtering views

use super::field::{Field, FieldSpec};
use super::type_rules::TypeRuleMap;
use indexmap::IndexMap;
use std::sync::Arc;

/// Fields of one model in declaration order
///
/// Filters return new collections; a collection is never mutated after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct FieldCollection {
    fields: IndexMap<String, Field>,
}

impl FieldCollection {
    /// Build a collection from declarations using the built-in type tables
    #[must_use]
    pub fn new<I, N, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<FieldSpec>,
    {
        Self::with_type_rules(specs, &TypeRuleMap::standard())
    }

    /// Build a collection from declarations resolved against custom type tables
    #[must_use]
    pub fn with_type_rules<I, N, S>(specs: I, type_rules: &Arc<TypeRuleMap>) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<FieldSpec>,
    {
        let fields = specs
            .into_iter()
            .map(|(name, spec)| {
                let name = name.into();
                let field = Field::with_type_rules(name.clone(), spec, Arc::clone(type_rules));
                (name, field)
            })
            .collect();

        Self { fields }
    }

    /// Look up a field by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the collection has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Required fields only
    #[must_use]
    pub fn required(&self) -> Self {
        self.filter(Field::is_required)
    }

    /// Optional fields only
    #[must_use]
    pub fn optional(&self) -> Self {
        self.filter(|field| !field.is_required())
    }

    /// Fields whose configured type is exactly `field_type`
    ///
    /// Compares the raw configured type, so `of_type("integer")` does not
    /// match a field declared as `int`.
    #[must_use]
    pub fn of_type(&self, field_type: &str) -> Self {
        self.filter(|field| field.field_type() == field_type)
    }

    fn filter(&self, predicate: impl Fn(&Field) -> bool) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|(_, field)| predicate(field))
                .map(|(name, field)| (name.clone(), field.clone()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = &'a Field;
    type IntoIter = indexmap::map::Values<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}
