//! Path expressions addressing a single value inside a JSON document.
//!
//! A small JSONPath dialect, enough to pick a scalar out of a hypermedia
//! response:
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `$` | document root | `$` |
//! | `.name` | object member | `$._links.self.href` |
//! | `['name']` | object member (any characters) | `$['_links']['curies']` |
//! | `[n]` | array element, negative counts from the end | `$.items[0]`, `$.items[-1]` |
//! | `..name` | first member with that name at any depth | `$..href` |
//!
//! Wildcards, filters and slices are not supported: every expression yields at
//! most one value.
//!
//! # Examples
//!
//! ```
//! use traverson::json_path::JsonPath;
//!
//! let body = r#"{"_links":{"movies":{"href":"http://localhost/movies"}}}"#;
//! let path = JsonPath::parse("$._links.movies.href").unwrap();
//! assert_eq!(path.read_scalar(body).unwrap(), "http://localhost/movies");
//! ```

use crate::error::{Result, TraversonError};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Child(String),
    Index(i64),
    Descendant(String),
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    expression: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    /// Parse an expression such as `$.actors[0].name`.
    ///
    /// # Errors
    ///
    /// Returns [`TraversonError::Decode`] if the expression does not start with
    /// `$` or uses unsupported syntax.
    pub fn parse(expression: &str) -> Result<Self> {
        let mut rest = expression
            .strip_prefix('$')
            .ok_or_else(|| invalid(expression, "must start with '$'"))?;
        let mut segments = Vec::new();

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("..") {
                let (name, remaining) = take_name(after);
                if name.is_empty() || name == "*" {
                    return Err(invalid(expression, "expected member name after '..'"));
                }
                segments.push(Segment::Descendant(name.to_string()));
                rest = remaining;
            } else if let Some(after) = rest.strip_prefix('.') {
                let (name, remaining) = take_name(after);
                if name.is_empty() || name == "*" {
                    return Err(invalid(expression, "expected member name after '.'"));
                }
                segments.push(Segment::Child(name.to_string()));
                rest = remaining;
            } else if let Some(after) = rest.strip_prefix('[') {
                let end = after
                    .find(']')
                    .ok_or_else(|| invalid(expression, "unterminated '['"))?;
                segments.push(parse_bracket(expression, after[..end].trim())?);
                rest = &after[end + 1..];
            } else {
                return Err(invalid(expression, "expected '.' or '['"));
            }
        }

        Ok(JsonPath {
            expression: expression.to_string(),
            segments,
        })
    }

    /// The original expression.
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// Evaluate against an already parsed document.
    pub fn evaluate<'v>(&self, document: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(document, |current, segment| match segment {
                Segment::Child(name) => current.get(name.as_str()),
                Segment::Index(index) => {
                    let items = current.as_array()?;
                    let resolved = if *index < 0 {
                        items.len().checked_sub(index.unsigned_abs() as usize)?
                    } else {
                        *index as usize
                    };
                    items.get(resolved)
                }
                Segment::Descendant(name) => find_descendant(current, name),
            })
    }

    /// Parse `body` as JSON and return the addressed value.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the body is not JSON or nothing matches.
    pub fn read(&self, body: &str) -> Result<Value> {
        let document: Value = serde_json::from_str(body)?;
        self.evaluate(&document).cloned().ok_or_else(|| {
            TraversonError::Decode(format!(
                "Path expression '{}' does not match the document",
                self.expression
            ))
        })
    }

    /// Like [`read`](Self::read), rendering the value as a string.
    pub fn read_scalar(&self, body: &str) -> Result<String> {
        self.read(body).map(|value| value_to_string(&value))
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Parse `expression` and read the value it addresses in `body` as a string.
pub fn read(body: &str, expression: &str) -> Result<String> {
    JsonPath::parse(expression)?.read_scalar(body)
}

/// Render a JSON value as a plain string.
///
/// Strings lose their quotes; everything else uses its JSON form.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn take_name(s: &str) -> (&str, &str) {
    let end = s.find(['.', '[']).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

fn parse_bracket(expression: &str, inner: &str) -> Result<Segment> {
    let quoted = inner
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| inner.strip_prefix('"').and_then(|s| s.strip_suffix('"')));

    if let Some(name) = quoted {
        return Ok(Segment::Child(name.to_string()));
    }

    inner
        .parse::<i64>()
        .map(Segment::Index)
        .map_err(|_| invalid(expression, &format!("unsupported selector '[{}]'", inner)))
}

fn find_descendant<'v>(value: &'v Value, name: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map
            .get(name)
            .or_else(|| map.values().find_map(|v| find_descendant(v, name))),
        Value::Array(items) => items.iter().find_map(|v| find_descendant(v, name)),
        _ => None,
    }
}

fn invalid(expression: &str, reason: &str) -> TraversonError {
    TraversonError::Decode(format!("Invalid path expression '{}': {}", expression, reason))
}
