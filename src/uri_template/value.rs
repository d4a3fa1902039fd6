//! Values bound to template variables.

use std::collections::HashMap;
use std::fmt;

/// Parameter mapping used for template expansion.
pub type TemplateParams = HashMap<String, TemplateValue>;

/// A value bound to a template variable.
///
/// Query markers expand a [`TemplateValue::List`] into repeated `name=value`
/// pairs. Path, segment and fragment markers only accept single values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValue {
    /// A single value, substituted as-is
    Single(String),
    /// A sequence of values
    List(Vec<String>),
}

impl TemplateValue {
    /// Whether the value contributes nothing to an optional variable.
    pub fn is_empty(&self) -> bool {
        match self {
            TemplateValue::Single(_) => false,
            TemplateValue::List(values) => values.is_empty(),
        }
    }

    /// Iterate over the contained values.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            TemplateValue::Single(value) => std::slice::from_ref(value),
            TemplateValue::List(values) => values,
        };
        slice.iter().map(String::as_str)
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Single(value) => f.write_str(value),
            TemplateValue::List(values) => f.write_str(&values.join(",")),
        }
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Single(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Single(value.to_string())
    }
}

impl From<&String> for TemplateValue {
    fn from(value: &String) -> Self {
        TemplateValue::Single(value.clone())
    }
}

impl<T: Into<String>> From<Vec<T>> for TemplateValue {
    fn from(values: Vec<T>) -> Self {
        TemplateValue::List(values.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TemplateValue {
                fn from(value: $ty) -> Self {
                    TemplateValue::Single(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(i32, i64, u32, u64, usize, bool);
