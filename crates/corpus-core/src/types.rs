//! Field type tags for the corpus generator.
//!
//! This module defines `FieldType`, the closed set of field types the
//! generator knows how to synthesize values for.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Declared type of a field.
///
/// The set is closed: a tag outside of it is a configuration error.
///
/// # YAML Format
///
/// Types are written as plain strings:
/// ```yaml
/// type: keyword
/// type: unsigned_long
/// type: geo_point
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    // String types
    /// Short random string
    Keyword,

    /// Keyword holding the same value for every record
    ConstantKeyword,

    // Boolean
    /// `true` or `false`
    Bool,

    // Integer types
    /// 32-bit signed integer
    Integer,

    /// 64-bit signed integer
    Long,

    /// 64-bit unsigned integer
    UnsignedLong,

    // Floating point
    /// 32-bit IEEE 754 floating point
    Float,

    /// 64-bit IEEE 754 floating point
    Double,

    /// 16-bit IEEE 754 floating point
    HalfFloat,

    /// Floating point stored as a scaled long
    ScaledFloat,

    // Special types
    /// IPv4 address
    Ip,

    /// `lat,lon` pair
    GeoPoint,

    /// Timestamp
    Date,
}

impl FieldType {
    /// Every supported type, in declaration order.
    pub const ALL: [FieldType; 13] = [
        FieldType::Keyword,
        FieldType::ConstantKeyword,
        FieldType::Bool,
        FieldType::Integer,
        FieldType::Long,
        FieldType::UnsignedLong,
        FieldType::Float,
        FieldType::Double,
        FieldType::HalfFloat,
        FieldType::ScaledFloat,
        FieldType::Ip,
        FieldType::GeoPoint,
        FieldType::Date,
    ];

    /// The canonical tag of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::ConstantKeyword => "constant_keyword",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::UnsignedLong => "unsigned_long",
            Self::Float => "float",
            Self::Double => "double",
            Self::HalfFloat => "half_float",
            Self::ScaledFloat => "scaled_float",
            Self::Ip => "ip",
            Self::GeoPoint => "geo_point",
            Self::Date => "date",
        }
    }

    /// Check if this is a numeric type.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::Long
                | Self::UnsignedLong
                | Self::Float
                | Self::Double
                | Self::HalfFloat
                | Self::ScaledFloat
        )
    }

    /// Check if `range` and `fuzziness` shape values of this type.
    pub fn is_ranged(&self) -> bool {
        self.is_numeric() || *self == Self::Date
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type tag is not part of the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field type: {0}")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyword" => Ok(Self::Keyword),
            "constant_keyword" => Ok(Self::ConstantKeyword),
            "bool" | "boolean" => Ok(Self::Bool),
            "integer" => Ok(Self::Integer),
            "long" => Ok(Self::Long),
            "unsigned_long" => Ok(Self::UnsignedLong),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            "half_float" => Ok(Self::HalfFloat),
            "scaled_float" => Ok(Self::ScaledFloat),
            "ip" => Ok(Self::Ip),
            "geo_point" => Ok(Self::GeoPoint),
            "date" => Ok(Self::Date),
            other => Err(UnknownFieldType(other.to_string())),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, Visitor};

        struct FieldTypeVisitor;

        impl Visitor<'_> for FieldTypeVisitor {
            type Value = FieldType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a field type tag such as \"keyword\" or \"long\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                value.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(FieldTypeVisitor)
    }
}
