//! Configuration helpers for the command line.

pub mod size;

pub use size::parse_size;

use anyhow::Context;
use corpus_core::{Config, Fields};
use std::path::Path;

/// Load per-field configuration, or an empty one when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load field configuration from {path:?}")),
        None => Ok(Config::default()),
    }
}

/// Load field descriptors.
pub fn load_fields(path: &Path) -> anyhow::Result<Fields> {
    Fields::from_file(path)
        .with_context(|| format!("Failed to load field descriptors from {path:?}"))
}
