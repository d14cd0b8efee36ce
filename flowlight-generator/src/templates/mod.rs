//! Stub resolution and rendering

use crate::error::{GeneratorError, Result};
use crate::generators::GeneratorKind;
use handlebars::Handlebars;
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

pub mod stubs;

pub use stubs::{DTO_STUB, ORGANIZER_STUB};

/// Resolves stubs (custom directory first, then built-ins) and renders them
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
    stubs_dir: Option<PathBuf>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Registry using the built-in stubs only
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            handlebars,
            stubs_dir: None,
        }
    }

    /// Look for custom stubs in `dir` before falling back to the built-ins
    #[must_use]
    pub fn with_stubs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stubs_dir = Some(dir.into());
        self
    }

    /// Stub source for `name`
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::Io`] if a custom stub exists but cannot be read
    /// - [`GeneratorError::StubNotFound`] if neither a custom nor a built-in
    ///   stub has that name
    pub fn resolve(&self, kind: GeneratorKind, name: &str) -> Result<Cow<'static, str>> {
        if let Some(dir) = &self.stubs_dir {
            let path = dir.join(name);
            if path.is_file() {
                tracing::debug!(stub = %path.display(), "Using custom stub");
                return fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|source| GeneratorError::Io { path, source });
            }
        }

        stubs::builtin(name)
            .map(Cow::Borrowed)
            .ok_or_else(|| GeneratorError::StubNotFound {
                kind: kind.label(),
                name: name.to_string(),
            })
    }

    /// Resolve and render a stub with `context`
    ///
    /// # Errors
    ///
    /// Stub resolution errors, [`GeneratorError::TemplateSyntax`] for an
    /// invalid stub, and [`GeneratorError::Render`] when rendering fails.
    pub fn render<T: Serialize>(
        &self,
        kind: GeneratorKind,
        name: &str,
        context: &T,
    ) -> Result<String> {
        let source = self.resolve(kind, name)?;

        handlebars::Template::compile(&source).map_err(|err| GeneratorError::TemplateSyntax {
            name: name.to_string(),
            source: Box::new(err),
        })?;

        Ok(self.handlebars.render_template(&source, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_resolution() {
        let registry = TemplateRegistry::new();
        let source = registry.resolve(GeneratorKind::Dto, "dto.stub.hbs").unwrap();
        assert_eq!(source, DTO_STUB);
    }

    #[test]
    fn test_missing_stub() {
        let registry = TemplateRegistry::new();
        let err = registry
            .resolve(GeneratorKind::Organizer, "nope.stub.hbs")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Stub file not found for [organizer]: nope.stub.hbs"
        );
    }

    #[test]
    fn test_custom_stub_overrides_builtin() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("dto.stub.hbs"), "class {{class}} <{{namespace}}>").unwrap();

        let registry = TemplateRegistry::new().with_stubs_dir(dir.path());
        let rendered = registry
            .render(
                GeneratorKind::Dto,
                "dto.stub.hbs",
                &json!({"class": "UserData", "namespace": "App\\Data"}),
            )
            .unwrap();
        assert_eq!(rendered, "class UserData <App\\Data>");
    }

    #[test]
    fn test_custom_only_stub() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("custom.hbs"), "{{model}}").unwrap();

        let registry = TemplateRegistry::new().with_stubs_dir(dir.path());
        let rendered = registry
            .render(GeneratorKind::Dto, "custom.hbs", &json!({"model": "User"}))
            .unwrap();
        assert_eq!(rendered, "User");
        assert!(registry.resolve(GeneratorKind::Dto, "other.hbs").is_err());
    }

    #[test]
    fn test_invalid_stub_syntax() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.hbs"), "{{#if class}}never closed").unwrap();

        let registry = TemplateRegistry::new().with_stubs_dir(dir.path());
        let err = registry
            .render(GeneratorKind::Dto, "broken.hbs", &json!({}))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::TemplateSyntax { .. }));
    }
}
