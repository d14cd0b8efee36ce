//! Field shorthand parsing for the command line
//!
//! Field shorthand format: `name:type[:length[:precision]][?]`
//!
//! Examples:
//! - `title:string`
//! - `email:string:255?` (optional)
//! - `price:decimal:10:2`

use super::field::FieldOptions;
use anyhow::{anyhow, Context, Result};

/// Field declaration parsed from a shorthand token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShorthand {
    /// Field name
    pub name: String,
    /// Equivalent structured declaration
    pub options: FieldOptions,
}

impl FieldShorthand {
    /// Parse one token
    ///
    /// A trailing `?` marks the field optional (`required: false`).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The token has no type or more than four segments
    /// - The name is not alphanumeric/underscore
    /// - The type is not purely alphabetic
    /// - Length or precision is not a non-negative integer
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::scaffold::FieldShorthand;
    /// let field = FieldShorthand::parse("email:string:255?").unwrap();
    /// assert_eq!(field.name, "email");
    /// assert_eq!(field.options.length, Some(255));
    /// assert_eq!(field.options.required, Some(false));
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let token = input.trim();
        let (body, optional) = token
            .strip_suffix('?')
            .map_or((token, false), |body| (body, true));

        let parts: Vec<&str> = body.split(':').collect();
        if parts.len() < 2 || parts.len() > 4 {
            return Err(anyhow!(
                "Invalid field definition: '{input}'. Expected format: name:type[:length[:precision]][?]"
            ));
        }

        let name = parts[0];
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(anyhow!(
                "Invalid field name in '{input}'. Use letters, digits and underscores"
            ));
        }

        let field_type = parts[1];
        if field_type.is_empty() || !field_type.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow!(
                "Invalid field type in '{input}'. Types are alphabetic (e.g. string, int, decimal)"
            ));
        }

        let mut options = FieldOptions::typed(field_type.to_lowercase());
        if let Some(length) = parts.get(2) {
            options.length = Some(
                length
                    .parse()
                    .with_context(|| format!("Invalid length '{length}' in '{input}'"))?,
            );
        }
        if let Some(precision) = parts.get(3) {
            options.precision = Some(
                precision
                    .parse()
                    .with_context(|| format!("Invalid precision '{precision}' in '{input}'"))?,
            );
        }
        if optional {
            options.required = Some(false);
        }

        Ok(Self {
            name: name.to_string(),
            options,
        })
    }

    /// Parse a whitespace-separated list of tokens
    ///
    /// # Errors
    ///
    /// Returns the error of the first malformed token, or an error when two
    /// tokens declare the same field.
    pub fn parse_list(input: &str) -> Result<Vec<Self>> {
        let mut fields: Vec<Self> = Vec::new();
        for token in input.split_whitespace() {
            let field = Self::parse(token)?;
            if fields.iter().any(|existing| existing.name == field.name) {
                return Err(anyhow!("Duplicate field: '{}'", field.name));
            }
            fields.push(field);
        }
        Ok(fields)
    }
}
