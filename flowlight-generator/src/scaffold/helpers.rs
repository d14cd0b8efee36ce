//! Naming helpers for code generation
//!
//! Case conversion, pluralization, labels and namespace/path handling used by
//! the field engine, the generators and the CLI.

use inflector::Inflector;
use std::path::PathBuf;

/// Namespace separator of the generated language
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Template helpers for naming conventions
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_snake_case("UserProfile"), "user_profile");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Convert string to `PascalCase`
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_pascal_case("user_profile"), "UserProfile");
    /// ```
    #[must_use]
    pub fn to_pascal_case(input: &str) -> String {
        input.to_pascal_case()
    }

    /// Convert string to camelCase
    #[must_use]
    pub fn to_camel_case(input: &str) -> String {
        input.to_camel_case()
    }

    /// Pluralize a word
    ///
    /// The inflector library has known limitations with some irregular plurals.
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        input.to_plural()
    }

    /// Convert a model name to a table name (`snake_case` plural)
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_table_name("Post"), "posts");
    /// assert_eq!(TemplateHelpers::to_table_name("UserProfile"), "user_profiles");
    /// assert_eq!(TemplateHelpers::to_table_name("Category"), "categories");
    /// ```
    #[must_use]
    pub fn to_table_name(model: &str) -> String {
        Self::pluralize(&Self::to_snake_case(model))
    }

    /// Human-readable label for a field name
    ///
    /// Underscores become spaces and the first letter of every
    /// whitespace-separated word is upper-cased. Other letters are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_label("first_name"), "First Name");
    /// assert_eq!(TemplateHelpers::to_label("email"), "Email");
    /// ```
    #[must_use]
    pub fn to_label(field_name: &str) -> String {
        let spaced = field_name.replace('_', " ");
        let mut label = String::with_capacity(spaced.len());
        let mut at_word_start = true;

        for c in spaced.chars() {
            if c.is_whitespace() {
                at_word_start = true;
                label.push(c);
            } else if at_word_start {
                at_word_start = false;
                label.extend(c.to_uppercase());
            } else {
                label.push(c);
            }
        }

        label
    }

    /// Short class name (last namespace segment) of a fully-qualified name
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::short_class_name("Flowlight\\BaseData"), "BaseData");
    /// assert_eq!(TemplateHelpers::short_class_name("BaseData"), "BaseData");
    /// assert_eq!(TemplateHelpers::short_class_name(""), "");
    /// ```
    #[must_use]
    pub fn short_class_name(fqcn: &str) -> String {
        fqcn.trim_start_matches(NAMESPACE_SEPARATOR)
            .rsplit(NAMESPACE_SEPARATOR)
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Relative file path for a class in a namespace
    ///
    /// A namespace starting with `root_namespace` maps onto `app_root`; any
    /// other namespace is placed under `app_root` in full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TemplateHelpers;
    /// # use std::path::{Path, PathBuf};
    /// let path = TemplateHelpers::namespace_to_path(
    ///     Path::new("app"), "App", "App\\Domain\\Users\\Data", "UserData", "php",
    /// );
    /// assert_eq!(path, PathBuf::from("app/Domain/Users/Data/UserData.php"));
    /// ```
    #[must_use]
    pub fn namespace_to_path(
        app_root: &std::path::Path,
        root_namespace: &str,
        namespace: &str,
        class_name: &str,
        extension: &str,
    ) -> PathBuf {
        let namespace = namespace.trim_matches(NAMESPACE_SEPARATOR);
        let relative = if namespace == root_namespace {
            ""
        } else {
            namespace
                .strip_prefix(root_namespace)
                .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR))
                .filter(|_| !root_namespace.is_empty())
                .unwrap_or(namespace)
        };

        let mut path = app_root.to_path_buf();
        path.extend(relative.split(NAMESPACE_SEPARATOR).filter(|s| !s.is_empty()));
        path.push(format!("{class_name}.{extension}"));
        path
    }

    /// Quote a value as a single-quoted string literal of the generated language
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::quote("Name"), "'Name'");
    /// assert_eq!(TemplateHelpers::quote("O'Brien"), "'O\\'Brien'");
    /// ```
    #[must_use]
    pub fn quote(value: &str) -> String {
        let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
        format!("'{escaped}'")
    }
}
