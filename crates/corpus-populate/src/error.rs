//! Error types for the corpus writer.

use corpus_core::ConfigError;
use corpus_generator::GeneratorError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a corpus.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Descriptor or configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record generation error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Template file has no content.
    #[error("Template file is empty: {}", .0.display())]
    EmptyTemplate(PathBuf),

    /// Path has no usable file name.
    #[error("Cannot derive a file name from {}", .0.display())]
    InvalidPath(PathBuf),
}
