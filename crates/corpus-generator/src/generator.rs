//! Record generator.
//!
//! A `Generator` is built once from field descriptors, per-field configuration
//! and an optional template, and then renders one record per [`Generator::emit`]
//! call. All mutable state lives in the caller's [`GenState`].

use crate::generators::{synthesize, SynthesisError, Synthesized};
use crate::state::GenState;
use crate::template::CustomTemplate;
use crate::text_template::TextTemplate;
use corpus_core::{Config, ConfigError, Field, Fields, Value};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use tracing::{debug, warn};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Malformed descriptors or configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Template type selector not recognised
    #[error("Unknown template type: {0}")]
    UnknownTemplateType(String),

    /// Template references a field that is not declared
    #[error("Template references undeclared field: {0}")]
    UndeclaredField(String),

    /// Template cannot be used at all
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// Value synthesis failed for a field
    #[error("Failed to synthesize field {field}: {source}")]
    Synthesis {
        field: String,
        #[source]
        source: SynthesisError,
    },

    /// Sink rejected a write
    #[error("Write error: {0}")]
    Write(#[from] io::Error),

    /// Text template failed to compile or render
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Broad classification of a [`GeneratorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Synthesis,
    Write,
}

impl GeneratorError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_)
            | Self::UnknownTemplateType(_)
            | Self::UndeclaredField(_)
            | Self::InvalidTemplate(_)
            | Self::Render(_) => ErrorKind::Configuration,
            Self::Synthesis { .. } => ErrorKind::Synthesis,
            Self::Write(_) => ErrorKind::Write,
        }
    }
}

/// Template backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplateType {
    /// `{{.name}}` placeholders
    #[default]
    Placeholder,

    /// General-purpose text templates
    Text,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placeholder => "placeholder",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "placeholder" | "custom" => Ok(Self::Placeholder),
            "text" | "gotext" => Ok(Self::Text),
            _ => Err(GeneratorError::UnknownTemplateType(s.to_string())),
        }
    }
}

/// Compiled rendering plan.
enum Plan {
    /// Flat JSON object with every declared field
    Json,

    /// Placeholder template: `(prefix, field index)` segments then trailing
    Custom {
        segments: Vec<(Option<Vec<u8>>, usize)>,
        trailing: Option<Vec<u8>>,
    },

    /// Text template rendered with every declared field
    Text(TextTemplate),
}

/// Record generator.
pub struct Generator {
    fields: Fields,
    config: Config,
    plan: Plan,
}

impl Generator {
    /// Create a generator that renders each record as a flat JSON object.
    pub fn new(config: Config, fields: Fields) -> Result<Self, GeneratorError> {
        warn_inert_config(&config, &fields);
        debug!(fields = fields.len(), "Compiled JSON record plan");
        Ok(Self {
            fields,
            config,
            plan: Plan::Json,
        })
    }

    /// Create a generator for a `{{.name}}` placeholder template.
    pub fn with_custom_template(
        template: &[u8],
        config: Config,
        fields: Fields,
    ) -> Result<Self, GeneratorError> {
        warn_inert_config(&config, &fields);

        let parsed = CustomTemplate::parse(template);
        let segments = parsed
            .segments()
            .map(|(prefix, name)| {
                fields
                    .position(name)
                    .map(|index| (prefix.map(<[u8]>::to_vec), index))
                    .ok_or_else(|| GeneratorError::UndeclaredField(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            referenced = segments.len(),
            declared = fields.len(),
            "Compiled placeholder template"
        );

        Ok(Self {
            fields,
            config,
            plan: Plan::Custom {
                segments,
                trailing: parsed.trailing,
            },
        })
    }

    /// Create a generator for a general-purpose text template.
    pub fn with_text_template(
        template: &[u8],
        config: Config,
        fields: Fields,
    ) -> Result<Self, GeneratorError> {
        warn_inert_config(&config, &fields);
        let compiled = TextTemplate::compile(template, &fields)?;
        debug!(declared = fields.len(), "Compiled text template");

        Ok(Self {
            fields,
            config,
            plan: Plan::Text(compiled),
        })
    }

    /// Create a generator for the given template type.
    pub fn with_template(
        template_type: TemplateType,
        template: &[u8],
        config: Config,
        fields: Fields,
    ) -> Result<Self, GeneratorError> {
        match template_type {
            TemplateType::Placeholder => Self::with_custom_template(template, config, fields),
            TemplateType::Text => Self::with_text_template(template, config, fields),
        }
    }

    /// Declared fields.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Render exactly one record into `sink`.
    pub fn emit<W: Write + ?Sized>(
        &self,
        state: &mut GenState,
        sink: &mut W,
    ) -> Result<(), GeneratorError> {
        match &self.plan {
            Plan::Json => self.emit_json(state, sink),
            Plan::Custom { segments, trailing } => {
                for (prefix, index) in segments {
                    if let Some(prefix) = prefix {
                        sink.write_all(prefix)?;
                    }
                    match self.synthesize(&self.fields[*index], state)? {
                        Synthesized::Static(value) => value.write_json(sink)?,
                        Synthesized::Generated(value) => value.write_raw(sink)?,
                    }
                }
                if let Some(trailing) = trailing {
                    sink.write_all(trailing)?;
                }
                Ok(())
            }
            Plan::Text(template) => {
                let values = self
                    .fields
                    .iter()
                    .map(|field| {
                        self.synthesize(field, state)
                            .map(|value| (field.name.as_str(), value.into_value()))
                    })
                    .collect::<Result<Vec<(&str, Value)>, _>>()?;
                template.render(&values, sink)
            }
        }
    }

    /// Release the template backend.
    pub fn close(self) {
        if let Plan::Text(template) = self.plan {
            drop(template);
            debug!("Released text template");
        }
    }

    fn emit_json<W: Write + ?Sized>(
        &self,
        state: &mut GenState,
        sink: &mut W,
    ) -> Result<(), GeneratorError> {
        sink.write_all(b"{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                sink.write_all(b",")?;
            }
            serde_json::to_writer(&mut *sink, &field.name).map_err(io::Error::from)?;
            sink.write_all(b":")?;
            self.synthesize(field, state)?.value().write_json(sink)?;
        }
        sink.write_all(b"}")?;
        Ok(())
    }

    fn synthesize(&self, field: &Field, state: &mut GenState) -> Result<Synthesized, GeneratorError> {
        synthesize(field, self.config.get(&field.name), state).map_err(|source| {
            GeneratorError::Synthesis {
                field: field.name.clone(),
                source,
            }
        })
    }
}

fn warn_inert_config(config: &Config, fields: &Fields) {
    for name in config.field_names() {
        if fields.get(name).is_none() {
            warn!(field = %name, "Configuration entry matches no declared field");
        }
    }

    for field in fields {
        let Some(entry) = config.get(&field.name) else {
            continue;
        };
        if (entry.range.is_some() || entry.fuzziness.is_some()) && !field.field_type.is_ranged() {
            warn!(
                field = %field.name,
                field_type = %field.field_type,
                "range and fuzziness have no effect on this field type"
            );
        }
    }
}
