//! Corpus generator library
//!
//! Synthesizes size-bounded document corpora for ingestion testing from typed
//! field descriptors, per-field configuration and an optional record template.
//!
//! # Features
//!
//! - Placeholder templates: `{{.field.name}}` substituted with raw values
//! - Text templates: loops, filters and conditionals over the same fields
//! - Statistical shape: per-field cardinality, fuzziness, range and static values
//! - Bulk payloads: newline delimited records with a bulk `create` action line
//!
//! # Crates
//!
//! - `corpus_core` - Field descriptors, configuration and values
//! - `corpus_generator` - Template parsing, value synthesis and rendering
//! - `corpus_populate` - Byte-budget corpus files
//!
//! # CLI Usage
//!
//! ```bash
//! # Bulk payload for a data stream
//! corpus-gen generate system cpu 1.2.0 --fields fields.yml --tot-size 20MB
//!
//! # Template based corpus
//! corpus-gen generate-with-template record.tpl fields.yml --tot-size 1GiB \
//!   --config-file config.yml
//! ```

pub mod config;

// Re-export the workspace crates for convenience
pub use corpus_core;
pub use corpus_generator;
pub use corpus_populate;
