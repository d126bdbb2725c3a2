//! Static value coercion.
//!
//! A static value is taken from YAML and coerced to the declared field type.
//! String-like types (keyword, ip, geo_point, date) keep the value unchanged.

use super::SynthesisError;
use corpus_core::{FieldType, Value};
use serde_yaml::Value as YamlValue;

/// Coerce a YAML scalar to the representation of `target`.
pub fn coerce_static(raw: &YamlValue, target: FieldType) -> Result<Value, SynthesisError> {
    let value = Value::from_yaml(raw)
        .ok_or_else(|| SynthesisError::UnsupportedStatic(describe(raw)))?;

    let coerced = match target {
        FieldType::Bool => match &value {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::String(s) => s.trim().to_ascii_lowercase().parse::<bool>().ok().map(Value::Bool),
            _ => None,
        },
        FieldType::Integer => to_i64(&value)
            .filter(|i| i32::try_from(*i).is_ok())
            .map(Value::Int),
        FieldType::Long => to_i64(&value).map(Value::Int),
        FieldType::UnsignedLong => match &value {
            Value::String(s) => s.trim().parse::<u64>().ok(),
            Value::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64 => {
                Some(*f as u64)
            }
            other => other.as_u64(),
        }
        .map(Value::UnsignedInt),
        FieldType::Float
        | FieldType::Double
        | FieldType::HalfFloat
        | FieldType::ScaledFloat => match &value {
            Value::String(s) => s.trim().parse::<f64>().ok(),
            other => other.as_f64(),
        }
        .filter(|f| f.is_finite())
        .map(Value::Float),
        FieldType::Keyword
        | FieldType::ConstantKeyword
        | FieldType::Ip
        | FieldType::GeoPoint
        | FieldType::Date => Some(value.clone()),
    };

    coerced.ok_or_else(|| SynthesisError::Coercion {
        value: value.to_string(),
        target,
    })
}

fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Float(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => Some(*f as i64),
        other => other.as_i64(),
    }
}

fn describe(raw: &YamlValue) -> String {
    match raw {
        YamlValue::Null => "null".to_string(),
        YamlValue::Sequence(_) => "a sequence".to_string(),
        YamlValue::Mapping(_) => "a mapping".to_string(),
        other => format!("{other:?}"),
    }
}
