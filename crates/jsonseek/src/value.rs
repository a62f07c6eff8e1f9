//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum, the record type produced for every
//! element of a decoded array, and the helpers that render it back to JSON.
//!
use std::{
    collections::BTreeMap,
    fmt::{self, Write},
};

/// The map type backing [`Value::Object`].
pub type Map = BTreeMap<String, Value>;
/// The vector type backing [`Value::Array`].
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// The `Value` enum can represent any JSON data type:
///
/// - Null
/// - Boolean
/// - Number
/// - String
/// - Array
/// - Object
///
/// # Examples
///
/// ```
/// use jsonseek::{Value, Map};
///
/// // Creating a JSON object:
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
// Enable serde support for tests and when the optional `serde` feature is
// activated by downstream crates. `untagged` keeps the serialized form plain
// JSON rather than an externally tagged enum.
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// Any JSON number, as a finite `f64`.
    Number(f64),
    /// A string with escapes decoded.
    String(String),
    /// An ordered list of values.
    Array(Array),
    /// Members keyed by name; a repeated name keeps its last value.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonseek::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonseek::Value;
    ///
    /// assert!(Value::Boolean(true).is_bool());
    /// assert!(!Value::Null.is_bool());
    /// ```
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonseek::Value;
    ///
    /// assert!(Value::Number(42.0).is_number());
    /// assert!(!Value::Null.is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonseek::Value;
    ///
    /// assert!(Value::String("foo".into()).is_string());
    /// assert!(!Value::Null.is_string());
    /// ```
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonseek::Value;
    ///
    /// assert!(Value::Array(vec![Value::Null]).is_array());
    /// assert!(!Value::Null.is_array());
    /// ```
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonseek::{Value, Map};
    ///
    /// let map = Map::new();
    /// let v = Value::Object(map);
    /// assert!(v.is_object());
    /// assert!(!Value::Null.is_object());
    /// ```
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns the string slice if the value is a [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number if the value is a [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Looks up `key` if the value is an [`Object`].
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonseek::{decode, Value};
    ///
    /// let record = decode(&br#"[{"title": "Engineer"}]"#[..]).next().unwrap().unwrap();
    /// assert_eq!(record.get("title"), Some(&Value::from("Engineer")));
    /// assert_eq!(record.get("salary"), None);
    /// ```
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }
}

/// Escapes control characters in a string for inclusion in a JSON string literal.
///
/// This function writes to the provided formatter, replacing characters such as
/// quotes, backslashes, control characters (<= U+001F), and Unicode line separators
/// with their JSON escape sequences.
fn write_escaped_string<W: Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            // Escape Unicode line separators which pre-2019 JSON parsers may not handle correctly
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            // Escape control characters for maximum compatibility and readability, but only
            // up to the basic multilingual plane (BMP). JSON requires exactly 4 hex digits for
            // escapes, so we leave the encoding of characters outside the BMP to any
            // downstream processing. (e.g.: encoding as UTF-16 surrogates).
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Pending output while rendering a [`Value`].
enum Token<'a> {
    Value(&'a Value),
    Key(&'a str),
    Raw(&'static str),
}

impl fmt::Display for Value {
    /// Renders compact JSON. Nesting is walked with an explicit stack, so any
    /// depth the decoder accepts can be written back out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Token::Value(self)];
        while let Some(token) = pending.pop() {
            match token {
                Token::Raw(s) => f.write_str(s)?,
                Token::Key(k) => {
                    f.write_char('"')?;
                    write_escaped_string(k, f)?;
                    f.write_str("\":")?;
                }
                Token::Value(Value::Null) => f.write_str("null")?,
                Token::Value(Value::Boolean(b)) => f.write_str(if *b { "true" } else { "false" })?,
                // Decoded numbers are always finite.
                Token::Value(Value::Number(n)) => write!(f, "{n}")?,
                Token::Value(Value::String(s)) => {
                    f.write_char('"')?;
                    write_escaped_string(s, f)?;
                    f.write_char('"')?;
                }
                Token::Value(Value::Array(arr)) => {
                    f.write_char('[')?;
                    pending.push(Token::Raw("]"));
                    for (i, v) in arr.iter().enumerate().rev() {
                        pending.push(Token::Value(v));
                        if i > 0 {
                            pending.push(Token::Raw(","));
                        }
                    }
                }
                Token::Value(Value::Object(map)) => {
                    f.write_char('{')?;
                    pending.push(Token::Raw("}"));
                    for (i, (k, v)) in map.iter().enumerate().rev() {
                        pending.push(Token::Value(v));
                        pending.push(Token::Key(k));
                        if i > 0 {
                            pending.push(Token::Raw(","));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Drop for Value {
    /// Moves nested children onto a worklist before they are dropped, so
    /// freeing a deeply nested value never recurses.
    fn drop(&mut self) {
        let mut children: Vec<Value> = match self {
            Value::Array(arr) if !arr.is_empty() => std::mem::take(arr),
            Value::Object(map) if !map.is_empty() => std::mem::take(map).into_values().collect(),
            _ => return,
        };
        while let Some(mut child) = children.pop() {
            match &mut child {
                Value::Array(arr) => children.append(arr),
                Value::Object(map) => children.extend(std::mem::take(map).into_values()),
                _ => {}
            }
        }
    }
}
