//! Setting values
//!
//! Leaf settings are one of four scalar kinds. Conversions to and from the
//! TOML document types live here so the resolver and the store never have to
//! look inside a value.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A leaf setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl SettingValue {
    /// Name of the variant, used in type mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "boolean",
            SettingValue::Integer(_) => "integer",
            SettingValue::Float(_) => "float",
            SettingValue::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, and integers widened to floats
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(*f),
            #[allow(clippy::cast_precision_loss)]
            SettingValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Infer the most specific value from untyped text (e.g. command-line input).
    ///
    /// Tries boolean (case-insensitive), then integer, then float, and falls
    /// back to a string.
    pub fn infer(text: &str) -> Self {
        if text.eq_ignore_ascii_case("true") {
            return SettingValue::Boolean(true);
        }
        if text.eq_ignore_ascii_case("false") {
            return SettingValue::Boolean(false);
        }

        if looks_like_integer(text) {
            if let Ok(i) = text.parse::<i64>() {
                return SettingValue::Integer(i);
            }
        }

        // Only plain decimal notation; "inf" and "nan" stay strings
        if text.contains('.') {
            if let Ok(f) = text.parse::<f64>() {
                if f.is_finite() {
                    return SettingValue::Float(f);
                }
            }
        }

        SettingValue::String(text.to_string())
    }

    /// Convert a value read from a plain TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for tables, arrays and datetimes.
    pub fn from_toml(key: &str, value: &toml::Value) -> Result<Self> {
        match value {
            toml::Value::String(s) => Ok(SettingValue::String(s.clone())),
            toml::Value::Integer(i) => Ok(SettingValue::Integer(*i)),
            toml::Value::Float(f) => Ok(SettingValue::Float(*f)),
            toml::Value::Boolean(b) => Ok(SettingValue::Boolean(*b)),
            other => Err(Error::TypeMismatch {
                key: key.to_string(),
                expected: "string, integer, float or boolean".into(),
                actual: other.type_str().into(),
            }),
        }
    }

    /// Convert into an item for the comment-preserving document.
    pub fn to_item(&self) -> toml_edit::Item {
        match self {
            SettingValue::Boolean(b) => toml_edit::value(*b),
            SettingValue::Integer(i) => toml_edit::value(*i),
            SettingValue::Float(f) => toml_edit::value(*f),
            SettingValue::String(s) => toml_edit::value(s.as_str()),
        }
    }
}

fn looks_like_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(b) => write!(f, "{b}"),
            SettingValue::Integer(i) => write!(f, "{i}"),
            SettingValue::Float(x) => write!(f, "{x}"),
            SettingValue::String(s) => f.write_str(s),
        }
    }
}

impl FromStr for SettingValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::infer(s))
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Boolean(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<i32> for SettingValue {
    fn from(value: i32) -> Self {
        SettingValue::Integer(i64::from(value))
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}
