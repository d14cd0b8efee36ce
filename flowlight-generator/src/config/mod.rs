//! Configuration management for flowlight-generator
//!
//! Settings are loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `FLOWLIGHT_` prefix, `__` for nesting)
//! 2. An explicit file passed with `--config`
//! 3. `./flowlight.toml` (project config)
//! 4. `~/.config/flowlight/config.toml` (user config, XDG)
//! 5. `/etc/flowlight/config.toml` (system config)
//! 6. Hardcoded defaults (fallback)
//!
//! Environment variable format: `FLOWLIGHT_SECTION__FIELD_NAME`
//! - Example: `FLOWLIGHT_PATHS__APP_ROOT=src/app`
//!
//! # Example Configuration
//!
//! ```toml
//! # flowlight.toml
//! [paths]
//! app_root = "app"
//! root_namespace = "App"
//! extension = "php"
//! stubs_dir = "stubs/flowlight"
//!
//! [dto]
//! namespace = "{root}\\Domain\\{model}s\\Data"
//! class_suffix = "Data"
//! base_class = "Flowlight\\BaseData"
//! stub = "dto.stub.hbs"
//!
//! [field_types.money]
//! rules = ["numeric", "min:0"]
//! type_hint = "float"
//!
//! [type_aliases]
//! currency = "money"
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output location settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory (relative to the output root) that maps to `root_namespace`
    pub app_root: PathBuf,

    /// Namespace prefix that maps onto `app_root`
    pub root_namespace: String,

    /// File extension for generated classes
    pub extension: String,

    /// Directory searched for custom stubs before the built-in ones
    pub stubs_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            app_root: PathBuf::from("app"),
            root_namespace: "App".to_string(),
            extension: "php".to_string(),
            stubs_dir: PathBuf::from("stubs/flowlight"),
        }
    }
}

/// Per-kind defaults used when a model does not override them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSettings {
    /// Namespace pattern; `{root}` and `{model}` are substituted
    pub namespace: String,

    /// Suffix appended to the model name to form the class name
    pub class_suffix: String,

    /// Fully-qualified parent class
    pub base_class: String,

    /// Stub file name
    pub stub: String,
}

impl KindSettings {
    /// DTO defaults
    #[must_use]
    pub fn dto() -> Self {
        Self {
            namespace: "{root}\\Domain\\{model}s\\Data".to_string(),
            class_suffix: "Data".to_string(),
            base_class: "Flowlight\\BaseData".to_string(),
            stub: "dto.stub.hbs".to_string(),
        }
    }

    /// Organizer defaults
    #[must_use]
    pub fn organizer() -> Self {
        Self {
            namespace: "{root}\\Domain\\{model}s\\Organizers".to_string(),
            class_suffix: "Organizer".to_string(),
            base_class: "Flowlight\\BaseOrganizer".to_string(),
            stub: "organizer.stub.hbs".to_string(),
        }
    }

    /// Expand the namespace pattern for a model
    #[must_use]
    pub fn namespace_for(&self, root: &str, model: &str) -> String {
        self.namespace
            .replace("{root}", root)
            .replace("{model}", model)
    }

    /// Default class name for a model
    #[must_use]
    pub fn class_name_for(&self, model: &str) -> String {
        format!("{model}{}", self.class_suffix)
    }
}

/// A configured field type: its default validation rules and type hint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTypeSettings {
    /// Default rules applied before any explicit rules
    pub rules: Vec<String>,

    /// Target-language type name (falls back to `string`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Output location settings
    pub paths: PathSettings,

    /// DTO defaults
    pub dto: KindSettings,

    /// Organizer defaults
    pub organizer: KindSettings,

    /// Extra or overriding canonical field types
    pub field_types: IndexMap<String, FieldTypeSettings>,

    /// Extra alias → canonical type entries
    pub type_aliases: IndexMap<String, String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            paths: PathSettings::default(),
            dto: KindSettings::dto(),
            organizer: KindSettings::organizer(),
            field_types: IndexMap::new(),
            type_aliases: IndexMap::new(),
        }
    }
}

impl GeneratorSettings {
    /// Load settings from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Configuration values fail type conversion
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(None)
    }

    /// Load settings from the standard locations plus an explicit file
    ///
    /// The explicit file sits above the discovered files and below the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Configuration values fail type conversion
    pub fn load_with(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            // 6. Start with defaults (lowest priority)
            .merge(Toml::string(&toml::to_string(&Self::default())?));

        // 5. System config
        let system_config = PathBuf::from("/etc/flowlight/config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        // 4. User config
        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        // 3. Project config
        let local_config = PathBuf::from("./flowlight.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        // 2. Explicit file
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        // 1. Environment variables
        figment = figment.merge(Env::prefixed("FLOWLIGHT_").split("__").lowercase(true));

        let settings = figment.extract()?;
        Ok(settings)
    }

    /// Load settings from a single file layered over the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file is invalid TOML or values fail type conversion
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let settings = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .extract()?;

        Ok(settings)
    }

    /// Get the recommended user config path
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./flowlight.toml"),
            |config_dir| config_dir.join("flowlight").join("config.toml"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.paths.app_root, PathBuf::from("app"));
        assert_eq!(settings.paths.root_namespace, "App");
        assert_eq!(settings.paths.extension, "php");
        assert_eq!(settings.dto.base_class, "Flowlight\\BaseData");
        assert_eq!(settings.organizer.class_suffix, "Organizer");
        assert!(settings.field_types.is_empty());
    }

    #[test]
    fn test_namespace_pattern_expansion() {
        let dto = KindSettings::dto();
        assert_eq!(dto.namespace_for("App", "User"), "App\\Domain\\Users\\Data");
        assert_eq!(dto.class_name_for("User"), "UserData");

        let organizer = KindSettings::organizer();
        assert_eq!(
            organizer.namespace_for("Acme", "Invoice"),
            "Acme\\Domain\\Invoices\\Organizers"
        );
        assert_eq!(organizer.class_name_for("Invoice"), "InvoiceOrganizer");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[paths]
app_root = "src"

[dto]
namespace = "Acme\\Data"
class_suffix = "Dto"
base_class = "Acme\\Dto"
stub = "dto.stub.hbs"

[field_types.money]
rules = ["numeric", "min:0"]
type_hint = "float"
"#
        )
        .unwrap();

        let settings = GeneratorSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.paths.app_root, PathBuf::from("src"));
        assert_eq!(settings.paths.root_namespace, "App");
        assert_eq!(settings.dto.class_suffix, "Dto");
        assert_eq!(settings.organizer, KindSettings::organizer());
        assert_eq!(
            settings.field_types["money"].rules,
            vec!["numeric".to_string(), "min:0".to_string()]
        );
    }
}
