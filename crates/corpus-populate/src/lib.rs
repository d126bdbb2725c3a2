//! Corpus writer for the corpus generator.
//!
//! This crate drives a [`corpus_generator::Generator`] until a byte budget is
//! reached and persists the records to a file in a corpus directory.
//!
//! # Example
//!
//! ```ignore
//! use corpus_core::Fields;
//! use corpus_populate::CorpusPopulator;
//!
//! let fields = Fields::from_file("fields.yml")?;
//! let populator = CorpusPopulator::new("corpus")?.with_seed(42);
//!
//! let corpus = populator.generate("system", "cpu", "1.2.0", fields, 10 * 1024 * 1024)?;
//! println!(
//!     "Wrote {} records to {}",
//!     corpus.metrics.records_written,
//!     corpus.path.display()
//! );
//! ```

pub mod args;
pub mod error;
pub mod populator;

pub use args::{CommonCorpusArgs, GenerateArgs, GenerateWithTemplateArgs};
pub use error::PopulateError;
pub use populator::{
    bulk_create_envelope, sanitize_filename, write_corpus, CorpusPopulator, GeneratedCorpus,
    PopulateMetrics,
};
