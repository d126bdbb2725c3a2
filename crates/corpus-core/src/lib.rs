//! Core types for the corpus generator.
//!
//! This crate provides the foundational types shared by the generation
//! engine and the corpus driver:
//!
//! - [`FieldType`] - Closed set of supported field type tags
//! - [`Field`] / [`Fields`] - Field descriptors loaded from YAML
//! - [`FieldConfig`] / [`Config`] - Per-field generation overrides
//! - [`Value`] - A single synthesized value
//!
//! # Architecture
//!
//! ```text
//! corpus-core (this crate)
//!    │
//!    ├─── corpus-generator  (template parser, synthesizers, Generator)
//!    │
//!    └─── corpus-populate   (byte-budget driver writing corpus files)
//! ```
//!
//! # Example
//!
//! ```rust
//! use corpus_core::{Config, Fields, FieldType};
//!
//! let fields = Fields::from_yaml(r#"
//! - name: event.id
//!   type: keyword
//! - name: process.pid
//!   type: long
//! "#).unwrap();
//!
//! let config = Config::from_yaml(r#"
//! - name: event.id
//!   cardinality: 250
//! - name: process.pid
//!   fuzziness: 0.1
//!   range: 100
//! "#).unwrap();
//!
//! assert_eq!(fields.get("process.pid").unwrap().field_type, FieldType::Long);
//! assert_eq!(config.get("event.id").unwrap().cardinality, Some(250));
//! ```

pub mod config;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use config::{Config, ConfigError, FieldConfig, MAX_CARDINALITY};
pub use schema::{Field, Fields};
pub use types::{FieldType, UnknownFieldType};
pub use values::Value;
