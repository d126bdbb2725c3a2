//! Per-field generation configuration.
//!
//! The configuration file is YAML, either a top-level sequence of entries or
//! a mapping with a `fields` sequence:
//!
//! ```yaml
//! - name: event.id
//!   cardinality: 250
//! - name: process.pid
//!   fuzziness: 0.1
//!   range: 100
//! - name: service.name
//!   value: checkout
//! ```
//!
//! Entries naming a field that is never declared are inert.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Upper bound of the per-mille cardinality setting.
pub const MAX_CARDINALITY: u32 = 1000;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for loading field descriptors and configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading a configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Cardinality outside `1..=1000`
    #[error("Invalid cardinality {value} for field '{field}': expected 1..=1000")]
    InvalidCardinality { field: String, value: u32 },

    /// Fuzziness outside `(0, 1]`
    #[error("Invalid fuzziness {value} for field '{field}': expected a ratio in (0, 1]")]
    InvalidFuzziness { field: String, value: f64 },

    /// Negative or non-finite range
    #[error("Invalid range {value} for field '{field}': expected a finite, non-negative number")]
    InvalidRange { field: String, value: f64 },

    /// A field name declared twice
    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    /// Two configuration entries for the same field
    #[error("Field '{0}' is configured more than once")]
    DuplicateConfig(String),
}

// ============================================================================
// Field Configuration
// ============================================================================

/// Generation overrides for a single field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Name of the field this entry applies to
    pub name: String,

    /// Per-mille cardinality: `1000 / cardinality` distinct values per 1000 records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<u32>,

    /// Ratio of the previous value used as perturbation half-width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzziness: Option<f64>,

    /// Upper bound on the magnitude (numbers) or span in seconds (dates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<f64>,

    /// Static value emitted for every record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_yaml::Value>,
}

impl FieldConfig {
    /// Create an empty configuration entry for a field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the per-mille cardinality.
    pub fn with_cardinality(mut self, cardinality: u32) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    /// Set the fuzziness ratio.
    pub fn with_fuzziness(mut self, fuzziness: f64) -> Self {
        self.fuzziness = Some(fuzziness);
        self
    }

    /// Set the range.
    pub fn with_range(mut self, range: f64) -> Self {
        self.range = Some(range);
        self
    }

    /// Set a static value.
    pub fn with_value(mut self, value: impl Into<serde_yaml::Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Check the bounds of every numeric setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(cardinality) = self.cardinality {
            if cardinality == 0 || cardinality > MAX_CARDINALITY {
                return Err(ConfigError::InvalidCardinality {
                    field: self.name.clone(),
                    value: cardinality,
                });
            }
        }

        if let Some(fuzziness) = self.fuzziness {
            if !(fuzziness > 0.0 && fuzziness <= 1.0) {
                return Err(ConfigError::InvalidFuzziness {
                    field: self.name.clone(),
                    value: fuzziness,
                });
            }
        }

        if let Some(range) = self.range {
            if !range.is_finite() || range < 0.0 {
                return Err(ConfigError::InvalidRange {
                    field: self.name.clone(),
                    value: range,
                });
            }
        }

        Ok(())
    }

    /// Number of distinct values this field cycles through, if cardinality is set.
    ///
    /// Cardinalities that do not divide 1000 are rounded to the nearest
    /// pool size, never below one.
    pub fn pool_size(&self) -> Option<usize> {
        self.cardinality.map(|cardinality| {
            let size = (f64::from(MAX_CARDINALITY) / f64::from(cardinality)).round() as usize;
            size.max(1)
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    List(Vec<FieldConfig>),
    Wrapped { fields: Vec<FieldConfig> },
}

// ============================================================================
// Configuration Set
// ============================================================================

/// Per-field configuration keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    fields: HashMap<String, FieldConfig>,
}

impl Config {
    /// Build a configuration from entries, validating each one.
    pub fn new(entries: Vec<FieldConfig>) -> Result<Self, ConfigError> {
        let mut fields = HashMap::with_capacity(entries.len());
        for entry in entries {
            entry.validate()?;
            if fields.contains_key(&entry.name) {
                return Err(ConfigError::DuplicateConfig(entry.name));
            }
            fields.insert(entry.name.clone(), entry);
        }
        Ok(Self { fields })
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let loaded = Self::from_yaml(&content)?;
        debug!("Loaded {} field configurations from {}", loaded.len(), path.display());
        Ok(loaded)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let entries = match serde_yaml::from_str(yaml)? {
            ConfigFile::List(entries) => entries,
            ConfigFile::Wrapped { fields } => fields,
        };
        Self::new(entries)
    }

    /// Get the configuration entry for a field.
    pub fn get(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    /// Names of every configured field.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of configured fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field is configured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
