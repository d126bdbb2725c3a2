//! CLI argument definitions for corpus generation.

use clap::Args;
use std::path::PathBuf;

/// Arguments shared by every corpus command.
#[derive(Args, Clone, Debug)]
pub struct CommonCorpusArgs {
    /// Target corpus size, e.g. 20MB, 1.5GiB or 4096
    #[arg(long = "tot-size", short = 't')]
    pub tot_size: String,

    /// Per-field configuration YAML (cardinality, fuzziness, range, value)
    #[arg(long, short = 'c')]
    pub config_file: Option<PathBuf>,

    /// Random seed (same seed and inputs = same records, dates aside)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for a bulk payload corpus of an integration data stream.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Integration package name
    pub package: String,

    /// Data stream name
    pub data_stream: String,

    /// Package version
    pub version: String,

    /// Field descriptors YAML of the data stream
    #[arg(long, short = 'f')]
    pub fields: PathBuf,

    #[command(flatten)]
    pub common: CommonCorpusArgs,
}

/// Arguments for a template based corpus.
#[derive(Args, Clone, Debug)]
pub struct GenerateWithTemplateArgs {
    /// Template file
    pub template: PathBuf,

    /// Field descriptors YAML
    pub fields: PathBuf,

    /// Template engine: placeholder or text (alias gotext)
    #[arg(long, default_value = "placeholder")]
    pub template_type: String,

    #[command(flatten)]
    pub common: CommonCorpusArgs,
}
