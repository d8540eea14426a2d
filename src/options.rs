//! Request options and their typed values
//!
//! Options are an unordered bag of named scalars. Ordering is imposed later,
//! when the bag is serialized into the canonical query string, so two bags
//! with the same entries always sign identically no matter how they were
//! built.

use crate::error::CaptureError;
use std::collections::HashMap;

/// A single option value
///
/// `Null` and an empty `Str` both mean "not set" and never reach the signed
/// query. Zero numbers and `false` are real values and are always sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Anything the typed variants do not cover, stringified as-is.
    Other(serde_json::Value),
}

impl Value {
    pub fn is_unset(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.is_empty(),
            Value::Other(serde_json::Value::Null) => true,
            Value::Other(serde_json::Value::String(s)) => s.is_empty(),
            _ => false,
        }
    }

    /// Wire form of the value, before query escaping.
    pub fn canonical(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Bool(b) => b.to_string(),
            Value::Other(serde_json::Value::String(s)) => s.clone(),
            Value::Other(other) => other.to_string(),
        }
    }
}

// Display already yields the shortest round-tripping decimal without an
// exponent; only the infinities need the service's spelling.
fn format_float(value: f64) -> String {
    if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else {
        value.to_string()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64().filter(|_| !n.is_u64()) {
                    Value::Float(f)
                } else {
                    Value::Other(serde_json::Value::Number(n))
                }
            }
            other => Value::Other(other),
        }
    }
}

/// Unordered set of request options keyed by their API name
///
/// # Examples
///
/// ```rust
/// use capture_tool::Options;
///
/// let options = Options::new()
///     .with("vw", 1920)
///     .with("fullPage", true)
///     .with("selector", ".main");
/// assert_eq!(options.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: HashMap<String, Value>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace an option. The last write for a key wins.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Options
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (key, value) in iter {
            options.set(key, value);
        }
        options
    }
}

/// Parse `key=value` tokens from the command line into typed options.
pub fn parse_options<I, S>(tokens: I) -> Result<Options, CaptureError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = Options::new();
    for token in tokens {
        let (key, value) = parse_option(token.as_ref())?;
        options.set(key, value);
    }
    Ok(options)
}

/// Split one token on its first `=` and type the value side.
pub fn parse_option(token: &str) -> Result<(String, Value), CaptureError> {
    match token.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), infer_value(value))),
        _ => Err(CaptureError::InvalidOptionFormat(token.to_string())),
    }
}

/// Narrowest type for a raw value: integer, then float, then boolean, else string.
pub fn infer_value(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        Value::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        Value::Float(f)
    } else if let Some(b) = parse_bool(raw) {
        Value::Bool(b)
    } else {
        Value::Str(raw.to_string())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
