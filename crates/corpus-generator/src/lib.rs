//! Record generation engine for the corpus generator.
//!
//! This crate turns field descriptors, per-field configuration and an
//! optional template into a stream of rendered records. A [`Generator`] is
//! immutable once built; all mutable state (random source, cardinality pools,
//! fuzziness baselines) lives in a [`GenState`] owned by the caller, so a
//! fixed seed reproduces a fixed sequence of records.
//!
//! # Architecture
//!
//! ```text
//!  Fields + Config + template
//!            │
//!            ▼
//! ┌──────────────────────┐        ┌──────────────────┐
//! │      Generator       │ emit() │     GenState     │
//! │                      │◄──────►│                  │
//! │  - JSON plan         │        │  - rng (StdRng)  │
//! │  - {{.name}} plan    │        │  - pools         │
//! │  - text template     │        │  - baselines     │
//! └──────────┬───────────┘        └──────────────────┘
//!            │
//!            ▼
//!      record bytes → sink
//! ```
//!
//! # Example
//!
//! ```rust
//! use corpus_core::{Config, Fields};
//! use corpus_generator::{GenState, Generator};
//!
//! let fields = Fields::from_yaml(r#"
//! - name: event.id
//!   type: keyword
//! - name: process.pid
//!   type: long
//! "#).unwrap();
//!
//! let template = br#"{"id":"{{.event.id}}","pid":{{.process.pid}}}"#;
//! let generator = Generator::with_custom_template(template, Config::default(), fields).unwrap();
//! let mut state = GenState::with_seed(42);
//!
//! let mut record = Vec::new();
//! generator.emit(&mut state, &mut record).unwrap();
//! println!("{}", String::from_utf8_lossy(&record));
//! ```
//!
//! # Field types
//!
//! - `keyword` / `constant_keyword` - Random alphanumeric strings
//! - `bool` - Uniform booleans
//! - `integer`, `long`, `unsigned_long` - Non-negative integers within the type's width
//! - `float`, `double`, `half_float`, `scaled_float` - Non-negative floats
//! - `ip` - IPv4 addresses
//! - `geo_point` - `lat,lon` pairs
//! - `date` - Timestamps in the last day

pub mod generator;
pub mod generators;
pub mod state;
pub mod template;
pub mod text_template;

// Re-exports for convenience
pub use generator::{ErrorKind, Generator, GeneratorError, TemplateType};
pub use generators::{SynthesisError, Synthesized};
pub use state::GenState;
pub use template::CustomTemplate;
