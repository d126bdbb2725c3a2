//! Value representation for synthesized field values.
//!
//! `Value` is the tagged variant every synthesizer produces. It knows how to
//! render itself raw (for placeholder templates, where the template supplies
//! quoting) and as JSON (for static overrides and the no-template path).

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use std::fmt;
use std::io::{self, Write};

/// A single synthesized value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed integer
    Int(i64),

    /// Unsigned integer, used for values above `i64::MAX`
    UnsignedInt(u64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    String(String),
}

impl Value {
    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::UnsignedInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Try to get this value as a u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UnsignedInt(u) => Some(*u),
            Self::Int(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Try to get this value as an f64. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            Self::UnsignedInt(u) => Some(*u as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a scalar YAML value.
    ///
    /// Returns `None` for null, sequences and mappings.
    pub fn from_yaml(yaml: &YamlValue) -> Option<Self> {
        match yaml {
            YamlValue::Bool(b) => Some(Self::Bool(*b)),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Self::UnsignedInt(u))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            YamlValue::String(s) => Some(Self::String(s.clone())),
            YamlValue::Tagged(tagged) => Self::from_yaml(&tagged.value),
            YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
        }
    }

    /// Convert to a JSON value. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::UnsignedInt(u) => serde_json::Value::from(*u),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::String(s) => serde_json::Value::String(s.clone()),
        }
    }

    /// Write the raw representation (strings unquoted).
    pub fn write_raw<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        match self {
            Self::String(s) => sink.write_all(s.as_bytes()),
            other => write!(sink, "{other}"),
        }
    }

    /// Write the JSON representation (strings quoted and escaped, non-finite
    /// floats as `null`).
    pub fn write_json<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        match self {
            Self::String(s) => serde_json::to_writer(sink, s).map_err(io::Error::from),
            Self::Float(f) if !f.is_finite() => sink.write_all(b"null"),
            other => write!(sink, "{other}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UnsignedInt(u) => write!(f, "{u}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::UnsignedInt(u)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: &Value) -> String {
        let mut buf = Vec::new();
        value.write_raw(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn json(value: &Value) -> String {
        let mut buf = Vec::new();
        value.write_json(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(-3).as_i64(), Some(-3));
        assert_eq!(Value::Int(-3).as_u64(), None);
        assert_eq!(Value::UnsignedInt(u64::MAX).as_i64(), None);
        assert_eq!(Value::UnsignedInt(7).as_f64(), Some(7.0));
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::Float(1.5).as_str(), None);
    }

    #[test]
    fn test_yaml_scalars() {
        let yaml: YamlValue = serde_yaml::from_str("42").unwrap();
        assert_eq!(Value::from_yaml(&yaml), Some(Value::Int(42)));

        let yaml: YamlValue = serde_yaml::from_str("18446744073709551615").unwrap();
        assert_eq!(Value::from_yaml(&yaml), Some(Value::UnsignedInt(u64::MAX)));

        let yaml: YamlValue = serde_yaml::from_str("1.25").unwrap();
        assert_eq!(Value::from_yaml(&yaml), Some(Value::Float(1.25)));

        let yaml: YamlValue = serde_yaml::from_str("beta").unwrap();
        assert_eq!(Value::from_yaml(&yaml), Some(Value::from("beta")));

        let yaml: YamlValue = serde_yaml::from_str("true").unwrap();
        assert_eq!(Value::from_yaml(&yaml), Some(Value::Bool(true)));
    }

    #[test]
    fn test_yaml_non_scalars() {
        let yaml: YamlValue = serde_yaml::from_str("[1, 2]").unwrap();
        assert_eq!(Value::from_yaml(&yaml), None);

        let yaml: YamlValue = serde_yaml::from_str("{ a: 1 }").unwrap();
        assert_eq!(Value::from_yaml(&yaml), None);

        assert_eq!(Value::from_yaml(&YamlValue::Null), None);
    }

    #[test]
    fn test_raw_rendering() {
        assert_eq!(raw(&Value::from("he said \"hi\"")), "he said \"hi\"");
        assert_eq!(raw(&Value::Int(-12)), "-12");
        assert_eq!(raw(&Value::Float(2.5)), "2.5");
        assert_eq!(raw(&Value::Bool(false)), "false");
    }

    #[test]
    fn test_json_rendering() {
        assert_eq!(json(&Value::from("he said \"hi\"")), r#""he said \"hi\"""#);
        assert_eq!(json(&Value::UnsignedInt(u64::MAX)), "18446744073709551615");
        assert_eq!(json(&Value::Float(33.0)), "33");
        assert_eq!(json(&Value::Bool(true)), "true");
        assert_eq!(json(&Value::Float(f64::INFINITY)), "null");
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::Int(5).to_json(), serde_json::json!(5));
        assert_eq!(Value::from("x").to_json(), serde_json::json!("x"));
        assert_eq!(Value::Float(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_serialize_untagged() {
        let encoded = serde_json::to_string(&vec![
            Value::Int(1),
            Value::from("x"),
            Value::Bool(false),
        ])
        .unwrap();
        assert_eq!(encoded, r#"[1,"x",false]"#);
    }
}
