//! Organizer generator
//!
//! An organizer exposes one method per enabled operation and delegates to a
//! `perform<Operation>` method of its parent class. It always needs a table.

use super::{ClassContext, Generator, GeneratorKind};
use crate::error::Result;
use crate::scaffold::{Field, ModelConfig, RendererField, TemplateHelpers};
use serde::Serialize;

/// One organizer method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Method name
    pub name: String,
    /// Parent method the call is delegated to
    pub method: String,
    /// Parameter list
    pub parameters: String,
    /// Argument list passed to `method`
    pub arguments: String,
    /// Return type
    pub return_type: String,
}

impl Operation {
    /// Signature for operation `name` working on `data_class`
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowlight_generator::generators::organizer::Operation;
    /// let update = Operation::new("update", "UserData");
    /// assert_eq!(update.parameters, "int|string $id, UserData $data");
    /// assert_eq!(update.method, "performUpdate");
    /// ```
    #[must_use]
    pub fn new(name: &str, data_class: &str) -> Self {
        let (parameters, arguments, return_type) = match name {
            "create" => (format!("{data_class} $data"), "$data", data_class.to_string()),
            "read" => ("int|string $id".to_string(), "$id", format!("?{data_class}")),
            "update" => (
                format!("int|string $id, {data_class} $data"),
                "$id, $data",
                data_class.to_string(),
            ),
            "delete" => ("int|string $id".to_string(), "$id", "bool".to_string()),
            "list" => ("array $filters = []".to_string(), "$filters", "array".to_string()),
            _ => ("array $input = []".to_string(), "$input", "mixed".to_string()),
        };

        Self {
            name: TemplateHelpers::to_camel_case(name),
            method: format!("perform{}", TemplateHelpers::to_pascal_case(name)),
            parameters,
            arguments: arguments.to_string(),
            return_type,
        }
    }
}

/// Template context for an organizer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerContext {
    /// Class identity
    #[serde(flatten)]
    pub class: ClassContext,
    /// Database table
    pub table: String,
    /// DTO class name
    pub data_class: String,
    /// DTO namespace
    pub data_namespace: String,
    /// Fully-qualified DTO class
    pub data_class_fqcn: String,
    /// Enabled operations
    pub operations: Vec<Operation>,
    /// Per-field records
    pub fields: Vec<RendererField>,
}

impl OrganizerContext {
    /// Build the context for `model`
    ///
    /// # Errors
    ///
    /// [`crate::GeneratorError::MissingValue`] when the table or a class name
    /// is missing.
    pub fn build(model: &ModelConfig) -> Result<Self> {
        let table = model.table_name()?.to_string();
        let data_class = model.class_name(GeneratorKind::Dto)?;
        let data_namespace = model.namespace(GeneratorKind::Dto)?;

        Ok(Self {
            class: ClassContext::resolve(model, GeneratorKind::Organizer)?,
            table,
            data_class_fqcn: format!("{data_namespace}\\{data_class}"),
            operations: model
                .organizer_types()
                .iter()
                .map(|name| Operation::new(name, &data_class))
                .collect(),
            data_class,
            data_namespace,
            fields: model.fields().iter().map(Field::to_renderer).collect(),
        })
    }
}

/// Organizer generator
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizerGenerator;

impl Generator for OrganizerGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Organizer
    }

    fn context(&self, model: &ModelConfig) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(OrganizerContext::build(model)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorSettings;
    use crate::error::GeneratorError;
    use crate::scaffold::ModelDefinition;
    use crate::templates::TemplateRegistry;
    use std::sync::Arc;

    fn model(yaml: &str) -> ModelConfig {
        let definition: ModelDefinition = serde_yaml::from_str(yaml).unwrap();
        ModelConfig::new("Invoice", definition, Arc::new(GeneratorSettings::default()))
    }

    #[test]
    fn test_operation_signatures() {
        let create = Operation::new("create", "InvoiceData");
        assert_eq!(create.name, "create");
        assert_eq!(create.method, "performCreate");
        assert_eq!(create.parameters, "InvoiceData $data");
        assert_eq!(create.return_type, "InvoiceData");

        assert_eq!(Operation::new("read", "InvoiceData").return_type, "?InvoiceData");
        assert_eq!(Operation::new("delete", "InvoiceData").return_type, "bool");
        assert_eq!(Operation::new("list", "InvoiceData").arguments, "$filters");

        let custom = Operation::new("mark_paid", "InvoiceData");
        assert_eq!(custom.name, "markPaid");
        assert_eq!(custom.method, "performMarkPaid");
        assert_eq!(custom.return_type, "mixed");
    }

    #[test]
    fn test_context() {
        let context = OrganizerGenerator
            .context(&model("table: invoices\norganizers: { create: true, read: false, list: true }\n"))
            .unwrap();
        assert_eq!(context["class"], "InvoiceOrganizer");
        assert_eq!(context["table"], "invoices");
        assert_eq!(context["dataClass"], "InvoiceData");
        assert_eq!(context["dataClassFqcn"], "App\\Domain\\Invoices\\Data\\InvoiceData");
        assert_eq!(context["operations"].as_array().unwrap().len(), 2);
        assert_eq!(context["operations"][1]["name"], "list");
    }

    #[test]
    fn test_missing_table_is_fatal() {
        let err = OrganizerGenerator
            .context(&model("organizers: true\n"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::MissingValue { key: "table", .. }));
    }

    #[test]
    fn test_render_builtin_stub() {
        let model = model("table: invoices\norganizers: true\n");
        let file = OrganizerGenerator
            .generate(&model, &TemplateRegistry::new())
            .unwrap();

        assert_eq!(
            file.path,
            std::path::PathBuf::from("app/Domain/Invoices/Organizers/InvoiceOrganizer.php")
        );
        assert!(file.content.contains("namespace App\\Domain\\Invoices\\Organizers;"));
        assert!(file.content.contains("use Flowlight\\BaseOrganizer;"));
        assert!(file.content.contains("use App\\Domain\\Invoices\\Data\\InvoiceData;"));
        assert!(file.content.contains("class InvoiceOrganizer extends BaseOrganizer"));
        assert!(file.content.contains("protected string $table = 'invoices';"));
        assert!(file
            .content
            .contains("public function update(int|string $id, InvoiceData $data): InvoiceData"));
        assert!(file.content.contains("return $this->performList($filters);"));
    }
}
