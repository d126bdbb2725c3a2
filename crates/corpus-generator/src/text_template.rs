//! General-purpose text template backend.
//!
//! Templates are compiled once with `minijinja` in strict mode. Each record is
//! rendered from a context where dotted field names are nested
//! (`{{ event.id }}`) and the flat map is available as `fields["event.id"]`.

use crate::generator::GeneratorError;
use corpus_core::{Fields, Value};
use minijinja::{Environment, UndefinedBehavior};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use std::io::Write;

const TEMPLATE_NAME: &str = "record";

/// Context key holding the flat name to value map.
pub const FIELDS_KEY: &str = "fields";

/// Global functions a template may call without declaring them as fields.
const BUILTINS: &[&str] = &["range", "dict", "debug", "namespace"];

/// A compiled text template.
pub struct TextTemplate {
    env: Environment<'static>,
}

impl TextTemplate {
    /// Compile a template and check that every top-level name it reads is a
    /// declared field.
    pub fn compile(source: &[u8], fields: &Fields) -> Result<Self, GeneratorError> {
        let source = String::from_utf8(source.to_vec())
            .map_err(|e| GeneratorError::InvalidTemplate(e.to_string()))?;

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template_owned(TEMPLATE_NAME, source)?;

        let known: HashSet<&str> = fields
            .iter()
            .map(|f| root_segment(&f.name))
            .chain([FIELDS_KEY])
            .chain(BUILTINS.iter().copied())
            .collect();

        let mut undeclared: Vec<String> = env
            .get_template(TEMPLATE_NAME)?
            .undeclared_variables(false)
            .into_iter()
            .filter(|name| !known.contains(name.as_str()))
            .collect();
        undeclared.sort();
        if let Some(name) = undeclared.into_iter().next() {
            return Err(GeneratorError::UndeclaredField(name));
        }

        Ok(Self { env })
    }

    /// Render one record from `(field name, value)` pairs.
    pub fn render<W: Write + ?Sized>(
        &self,
        values: &[(&str, Value)],
        sink: &mut W,
    ) -> Result<(), GeneratorError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let rendered = template.render(build_context(values))?;
        sink.write_all(rendered.as_bytes())?;
        Ok(())
    }
}

fn root_segment(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Build the render context. A dotted name whose path collides with a
/// scalar already in place is reachable through `fields` only.
fn build_context(values: &[(&str, Value)]) -> JsonValue {
    let mut root = Map::new();
    let mut flat = Map::new();

    for (name, value) in values {
        let json = value.to_json();
        flat.insert((*name).to_string(), json.clone());
        insert_nested(&mut root, name, json);
    }

    root.insert(FIELDS_KEY.to_string(), JsonValue::Object(flat));
    JsonValue::Object(root)
}

fn insert_nested(root: &mut Map<String, JsonValue>, name: &str, value: JsonValue) {
    let mut segments = name.split('.').peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            if !current.contains_key(segment) {
                current.insert(segment.to_string(), value);
            }
            return;
        }

        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        match slot {
            JsonValue::Object(next) => current = next,
            _ => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus_core::{Field, FieldType};

    fn fields(names: &[&str]) -> Fields {
        Fields::new(
            names
                .iter()
                .map(|name| Field::new(*name, FieldType::Keyword))
                .collect(),
        )
        .unwrap()
    }

    fn render(template: &TextTemplate, values: &[(&str, Value)]) -> String {
        let mut buf = Vec::new();
        template.render(values, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_nested_and_flat_access() {
        let template = TextTemplate::compile(
            br#"{{ event.id }} {{ fields["host.ip"] }} {{ alpha }}"#,
            &fields(&["event.id", "host.ip", "alpha"]),
        )
        .unwrap();

        let rendered = render(
            &template,
            &[
                ("event.id", Value::from("abc")),
                ("host.ip", Value::from("10.0.0.1")),
                ("alpha", Value::Int(7)),
            ],
        );
        assert_eq!(rendered, "abc 10.0.0.1 7");
    }

    #[test]
    fn test_undeclared_field_is_rejected() {
        let result = TextTemplate::compile(b"{{ alpha }} {{ beta }}", &fields(&["alpha"]));
        assert!(matches!(result, Err(GeneratorError::UndeclaredField(name)) if name == "beta"));
    }

    #[test]
    fn test_loops_and_builtins_are_allowed() {
        let template =
            TextTemplate::compile(b"{% for i in range(2) %}{{ alpha }}{% endfor %}", &fields(&["alpha"]))
                .unwrap();
        assert_eq!(render(&template, &[("alpha", Value::from("x"))]), "xx");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let result = TextTemplate::compile(&[0xff, 0xfe], &fields(&[]));
        assert!(matches!(result, Err(GeneratorError::InvalidTemplate(_))));
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let result = TextTemplate::compile(b"{{ alpha ", &fields(&["alpha"]));
        assert!(matches!(result, Err(GeneratorError::Render(_))));
    }

    #[test]
    fn test_colliding_names_stay_reachable_flat() {
        let context = build_context(&[
            ("event", Value::from("top")),
            ("event.id", Value::from("nested")),
        ]);
        assert_eq!(context["event"], JsonValue::from("top"));
        assert_eq!(context[FIELDS_KEY]["event.id"], JsonValue::from("nested"));
    }
}
