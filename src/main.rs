//! Command-line interface for corpus-gen
//!
//! # Usage Examples
//!
//! ## Bulk payload
//! ```bash
//! # 20 MB of bulk requests for the system.cpu data stream
//! corpus-gen generate system cpu 1.2.0 \
//!   --fields system-cpu-fields.yml \
//!   --tot-size 20MB
//! ```
//!
//! ## Template
//! ```bash
//! # Placeholder template with per-field configuration
//! corpus-gen generate-with-template record.tpl fields.yml \
//!   --tot-size 1GiB \
//!   --config-file config.yml
//!
//! # Text template, reproducible output
//! corpus-gen --location /tmp/corpus generate-with-template record.tmpl fields.yml \
//!   --template-type text --tot-size 500kB --seed 42
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use corpus_gen::config::{load_config, load_fields, parse_size};
use corpus_generator::TemplateType;
use corpus_populate::{
    CommonCorpusArgs, CorpusPopulator, GenerateArgs, GenerateWithTemplateArgs, GeneratedCorpus,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "corpus-gen")]
#[command(about = "Generate size-bounded document corpora for ingestion testing")]
#[command(long_about = None)]
struct Cli {
    /// Directory corpus files are written to
    #[arg(long, global = true, default_value = "corpus", env = "CORPUS_LOCATION")]
    location: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bulk request corpus for an integration data stream
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Generate a corpus from a template file
    GenerateWithTemplate {
        #[command(flatten)]
        args: GenerateWithTemplateArgs,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let corpus = match cli.command {
        Commands::Generate { args } => {
            let (populator, total_size) = build_populator(&cli.location, &args.common)?;
            let fields = load_fields(&args.fields)?;
            populator
                .generate(
                    &args.package,
                    &args.data_stream,
                    &args.version,
                    fields,
                    total_size,
                )
                .with_context(|| {
                    format!(
                        "Failed to generate corpus for {}.{}",
                        args.package, args.data_stream
                    )
                })?
        }
        Commands::GenerateWithTemplate { args } => {
            let template_type: TemplateType = args
                .template_type
                .parse()
                .context("Please pass --template-type as one of 'placeholder' or 'text'")?;
            let (populator, total_size) = build_populator(&cli.location, &args.common)?;
            populator
                .with_template_type(template_type)
                .generate_with_template(&args.template, &args.fields, total_size)
                .with_context(|| {
                    format!("Failed to generate corpus from template {:?}", args.template)
                })?
        }
    };

    report(&corpus);
    Ok(())
}

fn build_populator(
    location: &Path,
    common: &CommonCorpusArgs,
) -> anyhow::Result<(CorpusPopulator, u64)> {
    let total_size = parse_size(&common.tot_size)
        .with_context(|| format!("Invalid --tot-size {:?}", common.tot_size))?;
    let config = load_config(common.config_file.as_deref())?;

    let mut populator = CorpusPopulator::new(location)
        .with_context(|| format!("Cannot create corpus location {location:?}"))?
        .with_config(config);
    if let Some(seed) = common.seed {
        populator = populator.with_seed(seed);
    }

    Ok((populator, total_size))
}

fn report(corpus: &GeneratedCorpus) {
    info!(
        "Wrote {} records ({} bytes) in {:?}",
        corpus.metrics.records_written, corpus.metrics.bytes_written, corpus.metrics.total_duration
    );
    println!("File generated: {}", corpus.path.display());
}
