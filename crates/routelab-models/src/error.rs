//! Error body shared by every app.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

/// JSON body returned for validation and auth failures.
///
/// `message` is either a plain string or a map of field path to message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[schemars(rename = "Error")]
pub struct ErrorBody {
    /// HTTP-style error code
    pub code: u16,
    /// Error detail
    pub message: serde_json::Value,
}

impl ErrorBody {
    pub fn new(code: u16, message: impl Into<serde_json::Value>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Look up a field message when `message` is a field map.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.message.get(name).and_then(|v| v.as_str())
    }
}

/// Validation issues keyed by dotted field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-issue error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record an issue. The first message for a field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    fn collect(&mut self, prefix: &str, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let path = if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{}.{}", prefix, field)
            };

            match kind {
                ValidationErrorsKind::Field(issues) => {
                    if let Some(issue) = issues.first() {
                        let message = issue
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value ({})", issue.code));
                        self.insert(path, message);
                    }
                }
                ValidationErrorsKind::Struct(nested) => self.collect(&path, nested),
                ValidationErrorsKind::List(items) => {
                    for (index, nested) in items {
                        self.collect(&format!("{}.{}", path, index), nested);
                    }
                }
            }
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = Self::new();
        out.collect("", errors);
        out
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        Self::from(&errors)
    }
}

impl From<FieldErrors> for serde_json::Value {
    fn from(errors: FieldErrors) -> Self {
        serde_json::to_value(errors.0).unwrap_or_default()
    }
}
