//! Field descriptors.
//!
//! A field descriptor names a field, declares its type and optionally pins a
//! static value. Descriptors are loaded from a YAML sequence:
//!
//! ```yaml
//! - name: data_stream.type
//!   type: constant_keyword
//!   value: metrics
//! - name: host.ip
//!   type: ip
//! ```

use crate::config::ConfigError;
use crate::types::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::ops::Deref;
use std::path::Path;
use tracing::debug;

/// A typed field descriptor. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, possibly dotted (`host.ip`)
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Static value emitted for every record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_yaml::Value>,
}

impl Field {
    /// Create a new field descriptor without a static value.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            value: None,
        }
    }

    /// Create a field descriptor with a static value.
    pub fn with_value(
        name: impl Into<String>,
        field_type: FieldType,
        value: impl Into<serde_yaml::Value>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            value: Some(value.into()),
        }
    }
}

/// Ordered list of field descriptors with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<Field>);

impl Fields {
    /// Build a field list, rejecting duplicate names.
    pub fn new(fields: Vec<Field>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ConfigError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self(fields))
    }

    /// Load field descriptors from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let loaded = Self::from_yaml(&content)?;
        debug!("Loaded {} field descriptors from {}", loaded.len(), path.display());
        Ok(loaded)
    }

    /// Parse field descriptors from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let fields: Vec<Field> = serde_yaml::from_str(yaml)?;
        Self::new(fields)
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.0.iter().find(|f| f.name == name)
    }

    /// Position of a field by name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|f| f.name == name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.0.iter().map(|f| f.name.as_str()).collect()
    }
}

impl Deref for Fields {
    type Target = [Field];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
