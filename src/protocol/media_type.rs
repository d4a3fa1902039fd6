//! Media type values as carried by `Accept` and `Content-Type` headers.
//!
//! Parsing is lenient about whitespace and parameter quoting. Matching ignores
//! parameters.
//!
//! # Examples
//!
//! ```
//! use traverson::MediaType;
//!
//! let hal = MediaType::parse("application/hal+json; charset=UTF-8").unwrap();
//! assert_eq!(hal.essence(), "application/hal+json");
//! assert_eq!(hal.suffix(), Some("json"));
//! assert!(MediaType::parse("application/*+json").unwrap().includes(&hal));
//! ```

use super::constants::media_types;
use crate::error::{Result, TraversonError};
use std::fmt;
use std::str::FromStr;

/// A parsed media type: `type/subtype` plus optional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    main_type: String,
    subtype: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    /// Create a media type without parameters.
    ///
    /// Both parts are normalized to lowercase.
    pub fn new(main_type: impl Into<String>, subtype: impl Into<String>) -> Self {
        MediaType {
            main_type: main_type.into().to_ascii_lowercase(),
            subtype: subtype.into().to_ascii_lowercase(),
            params: Vec::new(),
        }
    }

    /// `application/hal+json`
    pub fn hal_json() -> Self {
        Self::new("application", "hal+json")
    }

    /// `application/json`
    pub fn application_json() -> Self {
        Self::new("application", "json")
    }

    /// `*/*`
    pub fn all() -> Self {
        Self::new("*", "*")
    }

    /// Parse a header value such as `application/hal+json; charset=UTF-8`.
    pub fn parse(value: &str) -> Result<Self> {
        let mut pieces = value.split(';');
        let essence = pieces.next().unwrap_or_default().trim();

        let (main_type, subtype) = match essence.split_once('/') {
            Some((t, s)) if is_token(t) && is_token(s) => (t, s),
            // A bare `*` is commonly sent for `*/*`
            None if essence == "*" => ("*", "*"),
            _ => {
                return Err(TraversonError::Decode(format!(
                    "Invalid media type '{}'",
                    value
                )))
            }
        };

        let mut media_type = Self::new(main_type, subtype);
        for param in pieces {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let (key, val) = param.split_once('=').ok_or_else(|| {
                TraversonError::Decode(format!("Invalid media type parameter '{}' in '{}'", param, value))
            })?;
            let val = val.trim();
            let val = val
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(val);
            media_type
                .params
                .push((key.trim().to_ascii_lowercase(), val.to_string()));
        }

        Ok(media_type)
    }

    /// Add a parameter, e.g. `charset=UTF-8`.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .push((key.into().to_ascii_lowercase(), value.into()));
        self
    }

    /// Primary type, e.g. `application`.
    pub fn main_type(&self) -> &str {
        &self.main_type
    }

    /// Subtype, e.g. `hal+json`.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.main_type, self.subtype)
    }

    /// Look up a parameter value by (case-insensitive) name.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Structured syntax suffix, e.g. `json` for `application/hal+json`.
    pub fn suffix(&self) -> Option<&str> {
        self.subtype.rsplit_once('+').map(|(_, suffix)| suffix)
    }

    /// Whether the type or subtype is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.main_type == "*" || self.subtype == "*" || self.subtype.starts_with("*+")
    }

    /// Whether a body of this type can be read as JSON.
    pub fn is_json(&self) -> bool {
        self.subtype == "json" || self.suffix() == Some("json")
    }

    /// Whether this (possibly wildcard) type includes `other`.
    ///
    /// `*/*` includes everything, `application/*` includes every application
    /// type, and `application/*+json` includes every `+json` application type.
    /// Parameters are ignored.
    pub fn includes(&self, other: &MediaType) -> bool {
        if self.main_type == "*" {
            return true;
        }
        if self.main_type != other.main_type {
            return false;
        }
        if self.subtype == other.subtype || self.subtype == "*" {
            return true;
        }
        match self.subtype.strip_prefix("*+") {
            Some(suffix) => other.suffix() == Some(suffix),
            None => false,
        }
    }

    /// Whether either type includes the other.
    pub fn is_compatible_with(&self, other: &MediaType) -> bool {
        self.includes(other) || other.includes(self)
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+*".contains(c))
}

impl Default for MediaType {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main_type, self.subtype)?;
        for (key, value) in &self.params {
            write!(f, ";{}={}", key, value)?;
        }
        Ok(())
    }
}

impl FromStr for MediaType {
    type Err = TraversonError;

    fn from_str(s: &str) -> Result<Self> {
        MediaType::parse(s)
    }
}

impl TryFrom<&str> for MediaType {
    type Error = TraversonError;

    fn try_from(value: &str) -> Result<Self> {
        MediaType::parse(value)
    }
}

/// Whether `media_type` is the HAL media type, ignoring parameters.
pub fn is_hal(media_type: &MediaType) -> bool {
    media_type.essence() == media_types::HAL_JSON
}
