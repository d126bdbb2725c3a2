//! Corpus writer.

use crate::error::PopulateError;
use corpus_core::{Config, Fields};
use corpus_generator::{GenState, Generator, TemplateType};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default buffer size for corpus writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Records between two progress log lines.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Metrics from a corpus write.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of records written.
    pub records_written: u64,
    /// Bytes written, envelopes and newlines included.
    pub bytes_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent rendering records.
    pub generation_duration: Duration,
    /// Time spent writing records.
    pub write_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.bytes_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// A corpus file written by [`CorpusPopulator`].
#[derive(Debug, Clone)]
pub struct GeneratedCorpus {
    /// Path of the corpus file.
    pub path: PathBuf,
    /// Write metrics.
    pub metrics: PopulateMetrics,
}

/// Emit records into `sink` until at least `total_size` bytes are written.
///
/// Each record is the optional `envelope`, one rendered record and a newline,
/// handed to the sink in a single write. Errors abort the run immediately.
pub fn write_corpus<W: Write + ?Sized>(
    generator: &Generator,
    state: &mut GenState,
    total_size: u64,
    envelope: Option<&[u8]>,
    sink: &mut W,
) -> Result<PopulateMetrics, PopulateError> {
    let start_time = Instant::now();
    let mut metrics = PopulateMetrics::default();
    let mut buf = Vec::with_capacity(DEFAULT_BUFFER_SIZE);

    let mut generation_time = Duration::ZERO;
    let mut write_time = Duration::ZERO;

    while metrics.bytes_written < total_size {
        buf.clear();
        if let Some(envelope) = envelope {
            buf.extend_from_slice(envelope);
        }

        let gen_start = Instant::now();
        generator.emit(state, &mut buf)?;
        buf.push(b'\n');
        generation_time += gen_start.elapsed();

        let write_start = Instant::now();
        sink.write_all(&buf)?;
        write_time += write_start.elapsed();

        metrics.records_written += 1;
        metrics.bytes_written += buf.len() as u64;

        if metrics.records_written % PROGRESS_INTERVAL == 0 {
            debug!(
                "Written {} records ({} of {} bytes)",
                metrics.records_written, metrics.bytes_written, total_size
            );
        }
    }

    metrics.total_duration = start_time.elapsed();
    metrics.generation_duration = generation_time;
    metrics.write_duration = write_time;
    Ok(metrics)
}

/// Bulk API `create` action line routing records to the data stream's index.
pub fn bulk_create_envelope(package: &str, data_stream: &str) -> Vec<u8> {
    format!(
        "{{ \"create\" : {{ \"_index\": \"metrics-{package}.{data_stream}-default\" }} }}\n"
    )
    .into_bytes()
}

/// Replace characters that are unsafe in file names with `-`.
pub fn sanitize_filename(name: &str) -> String {
    name.replace([' ', ':', '/', '\\'], "-")
}

/// Writes corpus files into a location directory.
pub struct CorpusPopulator {
    location: PathBuf,
    template_type: TemplateType,
    config: Config,
    seed: Option<u64>,
    timestamp: fn() -> i64,
}

impl CorpusPopulator {
    /// Create a populator writing into `location`, creating the directory
    /// (and its parents) when missing.
    pub fn new<P: AsRef<Path>>(location: P) -> Result<Self, PopulateError> {
        let location = location.as_ref().to_path_buf();
        fs::create_dir_all(&location)?;

        Ok(Self {
            location,
            template_type: TemplateType::default(),
            config: Config::default(),
            seed: None,
            timestamp: unix_now,
        })
    }

    /// Select the template backend for [`Self::generate_with_template`].
    pub fn with_template_type(mut self, template_type: TemplateType) -> Self {
        self.template_type = template_type;
        self
    }

    /// Use a per-field configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Seed the random source for reproducible records.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the clock used to prefix file names.
    pub fn with_timestamp(mut self, timestamp: fn() -> i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Directory corpus files are written to.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Write a bulk request corpus for an integration data stream.
    pub fn generate(
        &self,
        package: &str,
        data_stream: &str,
        version: &str,
        fields: Fields,
        total_size: u64,
    ) -> Result<GeneratedCorpus, PopulateError> {
        let path = self
            .location
            .join(self.bulk_payload_filename(package, data_stream, version));
        info!(
            "Generating bulk corpus '{}' of {} bytes for {}.{}",
            path.display(),
            total_size,
            package,
            data_stream
        );

        let generator = Generator::new(self.config.clone(), fields)?;
        let envelope = bulk_create_envelope(package, data_stream);
        let metrics = self.write_file(&path, generator, total_size, Some(envelope.as_slice()))?;
        Ok(GeneratedCorpus { path, metrics })
    }

    /// Write a template based corpus.
    pub fn generate_with_template<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        template_path: P,
        fields_path: Q,
        total_size: u64,
    ) -> Result<GeneratedCorpus, PopulateError> {
        let template_path = template_path.as_ref();
        let template = fs::read(template_path)?;
        if template.is_empty() {
            return Err(PopulateError::EmptyTemplate(template_path.to_path_buf()));
        }

        let fields = Fields::from_file(fields_path)?;
        let path = self
            .location
            .join(self.template_payload_filename(template_path)?);
        info!(
            "Generating {} template corpus '{}' of {} bytes",
            self.template_type,
            path.display(),
            total_size
        );

        let generator =
            Generator::with_template(self.template_type, &template, self.config.clone(), fields)?;
        let metrics = self.write_file(&path, generator, total_size, None)?;
        Ok(GeneratedCorpus { path, metrics })
    }

    fn write_file(
        &self,
        path: &Path,
        generator: Generator,
        total_size: u64,
        envelope: Option<&[u8]>,
    ) -> Result<PopulateMetrics, PopulateError> {
        let mut state = match self.seed {
            Some(seed) => GenState::with_seed(seed),
            None => GenState::new(),
        };

        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let metrics = write_corpus(&generator, &mut state, total_size, envelope, &mut writer)?;
        writer.flush()?;
        generator.close();

        info!(
            "Corpus generation complete: {} records, {} bytes in {:?} ({:.2} records/sec)",
            metrics.records_written,
            metrics.bytes_written,
            metrics.total_duration,
            metrics.records_per_second()
        );

        Ok(metrics)
    }

    fn bulk_payload_filename(&self, package: &str, data_stream: &str, version: &str) -> String {
        let slug = format!("{package}-{data_stream}-{version}");
        format!("{}-{}.ndjson", (self.timestamp)(), sanitize_filename(&slug))
    }

    fn template_payload_filename(&self, template_path: &Path) -> Result<String, PopulateError> {
        let stem = template_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PopulateError::InvalidPath(template_path.to_path_buf()))?;
        let ext = template_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        Ok(format!(
            "{}-{}{}",
            (self.timestamp)(),
            sanitize_filename(stem),
            sanitize_filename(&ext)
        ))
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
