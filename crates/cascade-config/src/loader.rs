//! Seeding scopes from structured documents
//!
//! Objects become nested scopes, arrays become append lists, everything else
//! is stored as a scalar. Seeding goes through the regular write path, so the
//! structural override rules apply.

use crate::error::{ConfigError, ConfigResult};
use crate::scope::Scope;
use serde_json::Value as JsonValue;

impl Scope {
    /// Populate this scope from a document object
    ///
    /// # Errors
    /// - [`ConfigError::NotAnObject`] if `document` is not an object
    /// - [`ConfigError::Structural`] if an entry would replace a structural
    ///   value with a scalar, or a scope with a list (or the reverse)
    pub fn seed(&self, document: &JsonValue) -> ConfigResult<()> {
        let JsonValue::Object(entries) = document else {
            return Err(ConfigError::NotAnObject(json_kind(document)));
        };

        for (key, value) in entries {
            match value {
                JsonValue::Object(_) => self.ensure_nested_scope(key.as_str())?.seed(value)?,
                JsonValue::Array(items) => {
                    self.ensure_nested_list(key.as_str())?.extend(items.iter().cloned());
                }
                scalar => self.set(key.as_str(), scalar.clone())?,
            }
        }
        Ok(())
    }

    /// Seed from a JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or seeding fails
    pub fn seed_json_str(&self, json: &str) -> ConfigResult<()> {
        let document: JsonValue = serde_json::from_str(json)?;
        self.seed(&document)
    }

    /// Seed from a YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or seeding fails
    pub fn seed_yaml_str(&self, yaml: &str) -> ConfigResult<()> {
        let document: JsonValue = serde_yaml::from_str(yaml)?;
        self.seed(&document)
    }

    /// Seed from a TOML string
    ///
    /// # Errors
    /// Returns error if TOML is invalid or seeding fails
    pub fn seed_toml_str(&self, source: &str) -> ConfigResult<()> {
        let table: toml::Table = toml::from_str(source)?;
        self.seed(&toml_to_json(toml::Value::Table(table)))
    }

    /// Parse JSON into a fresh root scope
    ///
    /// # Errors
    /// Returns error if JSON is invalid or its root is not an object
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let scope = Self::new();
        scope.seed_json_str(json)?;
        Ok(scope)
    }

    /// Parse YAML into a fresh root scope
    ///
    /// # Errors
    /// Returns error if YAML is invalid or its root is not a mapping
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let scope = Self::new();
        scope.seed_yaml_str(yaml)?;
        Ok(scope)
    }

    /// Parse TOML into a fresh root scope
    ///
    /// # Errors
    /// Returns error if TOML is invalid
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let scope = Self::new();
        scope.seed_toml_str(source)?;
        Ok(scope)
    }
}

/// Datetimes become strings; everything else maps one to one.
fn toml_to_json(value: toml::Value) -> JsonValue {
    match value {
        toml::Value::String(text) => JsonValue::String(text),
        toml::Value::Integer(number) => JsonValue::from(number),
        toml::Value::Float(number) => JsonValue::from(number),
        toml::Value::Boolean(flag) => JsonValue::Bool(flag),
        toml::Value::Datetime(datetime) => JsonValue::String(datetime.to_string()),
        toml::Value::Array(items) => {
            JsonValue::Array(items.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => JsonValue::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
