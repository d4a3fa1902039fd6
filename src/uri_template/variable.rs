//! Template variables and their expansion styles.

use std::fmt;

/// How a template variable is expanded, chosen by the marker that opens its
/// expression.
///
/// | Variant | Marker | Required |
/// |---------|--------|----------|
/// | `PathVariable` | `{name}` | yes |
/// | `Segment` | `{/name}` | no |
/// | `Fragment` | `{#name}` | no |
/// | `RequestParam` | `{?name}` | no |
/// | `RequestParamContinued` | `{&name}` | no |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Raw substitution in place; a value must be supplied.
    PathVariable,
    /// Optional path segment, emitted as `/value`.
    Segment,
    /// Fragment, emitted as `#value`.
    Fragment,
    /// Query parameter opening the query string.
    RequestParam,
    /// Query parameter appended to an existing query string.
    RequestParamContinued,
}

impl VariableType {
    /// Map an expression's leading marker character to its variable type.
    ///
    /// Returns `None` for characters that are not a marker, in which case the
    /// expression declares plain path variables.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '/' => Some(VariableType::Segment),
            '#' => Some(VariableType::Fragment),
            '?' => Some(VariableType::RequestParam),
            '&' => Some(VariableType::RequestParamContinued),
            _ => None,
        }
    }

    /// The marker that introduces this type inside `{...}`.
    pub fn marker(&self) -> Option<char> {
        match self {
            VariableType::PathVariable => None,
            VariableType::Segment => Some('/'),
            VariableType::Fragment => Some('#'),
            VariableType::RequestParam => Some('?'),
            VariableType::RequestParamContinued => Some('&'),
        }
    }

    /// Whether expansion may silently skip a variable of this type.
    pub fn is_optional(&self) -> bool {
        !matches!(self, VariableType::PathVariable)
    }

    /// Whether the variable expands to a `name=value` query pair.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            VariableType::RequestParam | VariableType::RequestParamContinued
        )
    }
}

/// A single named placeholder of a [`UriTemplate`](super::UriTemplate).
///
/// Two variables are equal when both name and type match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateVariable {
    name: String,
    variable_type: VariableType,
}

impl TemplateVariable {
    /// Create a variable with the given name and expansion style.
    pub fn new(name: impl Into<String>, variable_type: VariableType) -> Self {
        TemplateVariable {
            name: name.into(),
            variable_type,
        }
    }

    /// Variable name as declared in the template.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expansion style of this variable.
    pub fn variable_type(&self) -> VariableType {
        self.variable_type
    }

    /// Whether expansion fails when this variable has no value.
    pub fn is_required(&self) -> bool {
        !self.variable_type.is_optional()
    }
}

impl fmt::Display for TemplateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variable_type.marker() {
            Some(marker) => write!(f, "{{{}{}}}", marker, self.name),
            None => write!(f, "{{{}}}", self.name),
        }
    }
}
