//! Placeholder template parser.
//!
//! Templates are raw bytes with placeholders of the form `{{.name}}`.
//! Parsing splits a template into the ordered list of referenced fields, the
//! literal fragment preceding each field, and the trailing literal after the
//! last placeholder. The scan is a single left-to-right pass without
//! backtracking: a `{` that does not open `{{.name}}` stays literal text.
//!
//! ```text
//! {"id":"{{.event.id}}","pid":{{.process.pid}}}
//! └──┬───┘           └──┬───┘              └┬┘
//!  prefix of         prefix of           trailing
//!  event.id          process.pid
//! ```

use std::collections::HashMap;

const OPEN: &[u8] = b"{{.";
const CLOSE: &[u8] = b"}}";

/// A parsed placeholder template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomTemplate {
    /// Referenced fields, unique, in order of first appearance
    pub ordered_fields: Vec<String>,

    /// Literal bytes preceding each field; `None` when nothing precedes it
    pub prefix_by_field: HashMap<String, Option<Vec<u8>>>,

    /// Literal bytes after the last placeholder
    pub trailing: Option<Vec<u8>>,
}

impl CustomTemplate {
    /// Parse a template.
    ///
    /// A field referenced a second time keeps its placeholder as literal text,
    /// so every byte of the template is accounted for exactly once.
    pub fn parse(template: &[u8]) -> Self {
        let mut parsed = Self::default();
        let mut fragment: Vec<u8> = Vec::new();
        let mut cursor = 0;

        while cursor < template.len() {
            if let Some((name, consumed)) = placeholder_at(template, cursor) {
                if !parsed.prefix_by_field.contains_key(name) {
                    let prefix = (!fragment.is_empty()).then(|| std::mem::take(&mut fragment));
                    parsed.ordered_fields.push(name.to_string());
                    parsed.prefix_by_field.insert(name.to_string(), prefix);
                } else {
                    fragment.extend_from_slice(&template[cursor..cursor + consumed]);
                }
                cursor += consumed;
                continue;
            }

            fragment.push(template[cursor]);
            cursor += 1;
        }

        parsed.trailing = (!fragment.is_empty()).then_some(fragment);
        parsed
    }

    /// Check if the template references no field.
    pub fn is_empty(&self) -> bool {
        self.ordered_fields.is_empty()
    }

    /// Iterate over `(prefix, field name)` pairs in render order.
    pub fn segments(&self) -> impl Iterator<Item = (Option<&[u8]>, &str)> {
        self.ordered_fields.iter().map(|name| {
            let prefix = self
                .prefix_by_field
                .get(name)
                .and_then(|prefix| prefix.as_deref());
            (prefix, name.as_str())
        })
    }
}

/// Match a placeholder starting at `start`.
///
/// Returns the field name and the number of bytes the placeholder spans.
fn placeholder_at(template: &[u8], start: usize) -> Option<(&str, usize)> {
    let rest = template.get(start..)?;
    if !rest.starts_with(OPEN) {
        return None;
    }

    let body = &rest[OPEN.len()..];
    let name_len = body.iter().position(|&b| b == b'}')?;
    if name_len == 0 || !body[name_len..].starts_with(CLOSE) {
        return None;
    }

    let name = std::str::from_utf8(&body[..name_len]).ok()?;
    Some((name, OPEN.len() + name_len + CLOSE.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Case {
        template: &'static str,
        fields: &'static [&'static str],
        prefixes: &'static [Option<&'static str>],
        trailing: Option<&'static str>,
    }

    fn check(case: &Case) {
        let parsed = CustomTemplate::parse(case.template.as_bytes());

        assert_eq!(
            parsed.ordered_fields, case.fields,
            "ordered fields for template: {}",
            case.template
        );
        assert_eq!(
            parsed.prefix_by_field.len(),
            case.fields.len(),
            "prefix map size for template: {}",
            case.template
        );
        for (name, expected) in case.fields.iter().zip(case.prefixes) {
            let prefix = parsed
                .prefix_by_field
                .get(*name)
                .unwrap_or_else(|| panic!("missing prefix entry for {name}"));
            assert_eq!(
                prefix.as_deref(),
                expected.map(str::as_bytes),
                "prefix of {name} for template: {}",
                case.template
            );
        }
        assert_eq!(
            parsed.trailing.as_deref(),
            case.trailing.map(str::as_bytes),
            "trailing for template: {}",
            case.template
        );
    }

    const TWO: &[&str] = &["aField", "anotherField"];

    #[test]
    fn test_parse_without_braces() {
        let cases = [
            Case {
                template: "no field",
                fields: &[],
                prefixes: &[],
                trailing: Some("no field"),
            },
            Case {
                template: "{{.aField}}",
                fields: &["aField"],
                prefixes: &[None],
                trailing: None,
            },
            Case {
                template: "{{.aField}} {{.anotherField}}",
                fields: TWO,
                prefixes: &[None, Some(" ")],
                trailing: None,
            },
            Case {
                template: "with prefix {{.aField}} {{.anotherField}}",
                fields: TWO,
                prefixes: &[Some("with prefix "), Some(" ")],
                trailing: None,
            },
            Case {
                template: "{{.aField}} {{.anotherField}} with trailing",
                fields: TWO,
                prefixes: &[None, Some(" ")],
                trailing: Some(" with trailing"),
            },
            Case {
                template: "with prefix {{.aField}} {{.anotherField}} and trailing",
                fields: TWO,
                prefixes: &[Some("with prefix "), Some(" ")],
                trailing: Some(" and trailing"),
            },
        ];

        for case in &cases {
            check(case);
        }
    }

    #[test]
    fn test_parse_with_literal_braces() {
        let cases = [
            Case {
                template: "{{.aField}} with { in the middle {{.anotherField}}",
                fields: TWO,
                prefixes: &[None, Some(" with { in the middle ")],
                trailing: None,
            },
            Case {
                template: "{ with curly brace as prefix {{.aField}} {{.anotherField}}",
                fields: TWO,
                prefixes: &[Some("{ with curly brace as prefix "), Some(" ")],
                trailing: None,
            },
            Case {
                template:
                    "{ with curly brace as prefix {{.aField}} and { in the middle {{.anotherField}}",
                fields: TWO,
                prefixes: &[
                    Some("{ with curly brace as prefix "),
                    Some(" and { in the middle "),
                ],
                trailing: None,
            },
            Case {
                template: "{ with curly brace as prefix {{.aField}} {{.anotherField}} and trailing",
                fields: TWO,
                prefixes: &[Some("{ with curly brace as prefix "), Some(" ")],
                trailing: Some(" and trailing"),
            },
            Case {
                template: "{ with curly brace as prefix {{.aField}} and { in the middle {{.anotherField}} and trailing",
                fields: TWO,
                prefixes: &[
                    Some("{ with curly brace as prefix "),
                    Some(" and { in the middle "),
                ],
                trailing: Some(" and trailing"),
            },
            Case {
                template: "{ with curly brace as prefix {{.aField}} {{.anotherField}} and { curly brace in trailing",
                fields: TWO,
                prefixes: &[Some("{ with curly brace as prefix "), Some(" ")],
                trailing: Some(" and { curly brace in trailing"),
            },
            Case {
                template: "{ with curly brace as prefix {{.aField}} and { in the middle {{.anotherField}} and { curly brace in trailing",
                fields: TWO,
                prefixes: &[
                    Some("{ with curly brace as prefix "),
                    Some(" and { in the middle "),
                ],
                trailing: Some(" and { curly brace in trailing"),
            },
            Case {
                template: "{ with curly brace as prefix {{.aField}} {{.anotherField}} and { curly brace in trailing with again { curly brace in trailing",
                fields: TWO,
                prefixes: &[Some("{ with curly brace as prefix "), Some(" ")],
                trailing: Some(" and { curly brace in trailing with again { curly brace in trailing"),
            },
            Case {
                template: "{ with curly brace as prefix {{.aField}} and { in the middle {{.anotherField}} and { curly brace in trailing with again { curly brace in trailing",
                fields: TWO,
                prefixes: &[
                    Some("{ with curly brace as prefix "),
                    Some(" and { in the middle "),
                ],
                trailing: Some(" and { curly brace in trailing with again { curly brace in trailing"),
            },
        ];

        for case in &cases {
            check(case);
        }
    }

    #[test]
    fn test_parse_brace_adjacent_to_placeholder() {
        let cases = [
            Case {
                template: "{{{.aField}} with curly brace as prefix just before a field {{.anotherField}} and trailing",
                fields: TWO,
                prefixes: &[
                    Some("{"),
                    Some(" with curly brace as prefix just before a field "),
                ],
                trailing: Some(" and trailing"),
            },
            Case {
                template: "{{{.aField}} with curly brace as prefix just before a field and { in the middle {{.anotherField}} and trailing",
                fields: TWO,
                prefixes: &[
                    Some("{"),
                    Some(" with curly brace as prefix just before a field and { in the middle "),
                ],
                trailing: Some(" and trailing"),
            },
            Case {
                template: "{{{.aField}} with curly brace as prefix just before a field {{.anotherField}} and { curly brace in trailing",
                fields: TWO,
                prefixes: &[
                    Some("{"),
                    Some(" with curly brace as prefix just before a field "),
                ],
                trailing: Some(" and { curly brace in trailing"),
            },
            Case {
                template: "{{{.aField}} with curly brace as prefix just before a field and { in the middle {{.anotherField}} and { curly brace in trailing",
                fields: TWO,
                prefixes: &[
                    Some("{"),
                    Some(" with curly brace as prefix just before a field and { in the middle "),
                ],
                trailing: Some(" and { curly brace in trailing"),
            },
            Case {
                template: "{{{.aField}} with curly brace as prefix just before a field {{.anotherField}} and { curly brace in trailing with again { curly brace in trailing",
                fields: TWO,
                prefixes: &[
                    Some("{"),
                    Some(" with curly brace as prefix just before a field "),
                ],
                trailing: Some(" and { curly brace in trailing with again { curly brace in trailing"),
            },
            Case {
                template: "{{{.aField}} with curly brace as prefix just before a field and { in the middle {{.anotherField}} and { curly brace in trailing with again { curly brace in trailing",
                fields: TWO,
                prefixes: &[
                    Some("{"),
                    Some(" with curly brace as prefix just before a field and { in the middle "),
                ],
                trailing: Some(" and { curly brace in trailing with again { curly brace in trailing"),
            },
        ];

        for case in &cases {
            check(case);
        }
    }

    #[test]
    fn test_parse_json_record() {
        let parsed = CustomTemplate::parse(br#"{"alpha":{{.alpha}}}"#);

        assert_eq!(parsed.ordered_fields, vec!["alpha"]);
        assert_eq!(
            parsed.prefix_by_field.get("alpha"),
            Some(&Some(br#"{"alpha":"#.to_vec()))
        );
        assert_eq!(parsed.trailing.as_deref(), Some(&b"}"[..]));
    }

    #[test]
    fn test_parse_empty_template() {
        let parsed = CustomTemplate::parse(b"");
        assert!(parsed.is_empty());
        assert!(parsed.prefix_by_field.is_empty());
        assert_eq!(parsed.trailing, None);
    }

    #[test]
    fn test_parse_incomplete_placeholders_stay_literal() {
        let parsed = CustomTemplate::parse(b"{{.}} {{ .spaced}} {{.half}");
        assert!(parsed.is_empty());
        assert_eq!(
            parsed.trailing.as_deref(),
            Some(&b"{{.}} {{ .spaced}} {{.half}"[..])
        );
    }

    #[test]
    fn test_parse_repeated_field_stays_literal() {
        let parsed = CustomTemplate::parse(b"{{.a}}-{{.b}}-{{.a}}");

        assert_eq!(parsed.ordered_fields, vec!["a", "b"]);
        assert_eq!(parsed.prefix_by_field.get("b"), Some(&Some(b"-".to_vec())));
        assert_eq!(parsed.trailing.as_deref(), Some(&b"-{{.a}}"[..]));
    }

    #[test]
    fn test_segments_follow_field_order() {
        let parsed = CustomTemplate::parse(b"x{{.b}}y{{.a}}");
        let segments: Vec<_> = parsed.segments().collect();
        assert_eq!(
            segments,
            vec![(Some(&b"x"[..]), "b"), (Some(&b"y"[..]), "a")]
        );
    }
}
