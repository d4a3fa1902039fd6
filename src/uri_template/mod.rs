//! URI templates following a practical subset of RFC 6570.
//!
//! Templates mix literal text with `{...}` expressions. The leading marker of an
//! expression selects how its variables expand:
//!
//! | Template | Parameters | Expansion |
//! |----------|------------|-----------|
//! | `/movies/{id}` | `id=1` | `/movies/1` |
//! | `/movies{/id}` | none | `/movies` |
//! | `/movies{?page,size}` | `page=2,size=10` | `/movies?page=2&size=10` |
//! | `/movies?sort=title{&page}` | `page=2` | `/movies?sort=title&page=2` |
//! | `/movies{#top}` | `top=x` | `/movies#x` |
//!
//! Values are emitted raw. Anything the caller already percent-encoded is left
//! untouched, and nothing else is escaped.
//!
//! # Examples
//!
//! ```
//! use traverson::uri_template::{TemplateParams, UriTemplate};
//!
//! let template = UriTemplate::parse("/foo{/bar}{?firstname,lastname}{#anchor}").unwrap();
//! let uri = template
//!     .expand_positional(["path", "Dave", "Matthews", "discography"])
//!     .unwrap();
//! assert_eq!(uri, "/foo/path?firstname=Dave&lastname=Matthews#discography");
//!
//! let mut params = TemplateParams::new();
//! params.insert("bar".into(), "myBar".into());
//! let template = UriTemplate::parse("/foo{?bar}").unwrap();
//! assert_eq!(template.expand(&params).unwrap(), "/foo?bar=myBar");
//! ```

mod parser;
mod value;
mod variable;

pub use value::{TemplateParams, TemplateValue};
pub use variable::{TemplateVariable, VariableType};

use crate::error::{Result, TraversonError};
use parser::{TemplateParser, TemplatePart};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A parsed URI template.
///
/// Parsing happens once; expansion is a pure function of the template and the
/// supplied parameters and can be repeated with different values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    template: String,
    parts: Vec<TemplatePart>,
    variables: Vec<TemplateVariable>,
}

impl UriTemplate {
    /// Parse a template string.
    ///
    /// # Errors
    ///
    /// Returns [`TraversonError::MalformedTemplate`] for an unterminated or
    /// nested brace, an unsupported operator, or an invalid variable name.
    pub fn parse(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let parts = TemplateParser::parse(&template)?;

        let mut seen = HashSet::new();
        let variables = parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Expression(vars) => Some(vars),
                TemplatePart::Literal(_) => None,
            })
            .flatten()
            .filter(|var| seen.insert((*var).clone()))
            .cloned()
            .collect();

        Ok(UriTemplate {
            template,
            parts,
            variables,
        })
    }

    /// Whether `candidate` parses as a template with at least one variable.
    pub fn is_template(candidate: &str) -> bool {
        candidate.contains('{')
            && UriTemplate::parse(candidate)
                .map(|t| t.has_variables())
                .unwrap_or(false)
    }

    /// The original template string.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Variables in declaration order, without duplicates.
    pub fn variables(&self) -> &[TemplateVariable] {
        &self.variables
    }

    /// Distinct variable names in declaration order.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.variables
            .iter()
            .map(TemplateVariable::name)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Whether the template declares any variable.
    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }

    /// Expand the template with named parameters.
    ///
    /// # Errors
    ///
    /// - [`TraversonError::MissingVariable`] if a path variable has no value.
    /// - [`TraversonError::UnsupportedValue`] if a list is bound to a path,
    ///   segment or fragment variable.
    pub fn expand(&self, params: &TemplateParams) -> Result<String> {
        let mut result = String::with_capacity(self.template.len());
        let mut fragment_written = false;
        let mut query_started = false;

        for part in &self.parts {
            let variables = match part {
                TemplatePart::Literal(s) => {
                    query_started |= s.contains('?');
                    result.push_str(s);
                    continue;
                }
                TemplatePart::Expression(variables) => variables,
            };

            for variable in variables {
                let value = params.get(variable.name()).filter(|v| !v.is_empty());

                let value = match (value, variable.variable_type()) {
                    (Some(value), _) => value,
                    (None, VariableType::PathVariable) => {
                        return Err(TraversonError::MissingVariable(variable.name().to_string()));
                    }
                    (None, _) => continue,
                };

                match variable.variable_type() {
                    VariableType::PathVariable => {
                        result.push_str(single_value(variable, value)?);
                    }
                    VariableType::Segment => {
                        result.push('/');
                        result.push_str(single_value(variable, value)?);
                    }
                    VariableType::Fragment => {
                        let value = single_value(variable, value)?;
                        if fragment_written {
                            tracing::debug!(
                                variable = variable.name(),
                                "fragment already expanded, ignoring value"
                            );
                            continue;
                        }
                        result.push('#');
                        result.push_str(value);
                        fragment_written = true;
                    }
                    VariableType::RequestParam | VariableType::RequestParamContinued => {
                        for item in value.values() {
                            // The first pair opens the query string, whatever
                            // marker it was declared with
                            result.push(if query_started { '&' } else { '?' });
                            query_started = true;
                            result.push_str(variable.name());
                            result.push('=');
                            result.push_str(item);
                        }
                    }
                }
            }
        }

        Ok(result)
    }

    /// Expand the template binding values to variables in declaration order.
    ///
    /// The first value binds to the first distinct variable name, the second to
    /// the next, and so on. Surplus values are ignored; variables left without
    /// a value behave as if absent from a named mapping.
    pub fn expand_positional<I, V>(&self, values: I) -> Result<String>
    where
        I: IntoIterator<Item = V>,
        V: Into<TemplateValue>,
    {
        let params: TemplateParams = self
            .variable_names()
            .into_iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value.into()))
            .collect();

        self.expand(&params)
    }
}

fn single_value<'v>(variable: &TemplateVariable, value: &'v TemplateValue) -> Result<&'v str> {
    match value {
        TemplateValue::Single(value) => Ok(value),
        TemplateValue::List(_) => Err(TraversonError::UnsupportedValue {
            variable: variable.name().to_string(),
            reason: format!(
                "{:?} variables take a single value, got a list",
                variable.variable_type()
            ),
        }),
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl FromStr for UriTemplate {
    type Err = TraversonError;

    fn from_str(s: &str) -> Result<Self> {
        UriTemplate::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> TemplateParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), TemplateValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_discovers_request_param() {
        let template = UriTemplate::parse("/foo{?bar}").unwrap();
        assert!(template
            .variables()
            .contains(&TemplateVariable::new("bar", VariableType::RequestParam)));
    }

    #[test]
    fn test_discovers_request_param_continued() {
        let template = UriTemplate::parse("/foo?bar{&foobar}").unwrap();
        assert!(template.variables().contains(&TemplateVariable::new(
            "foobar",
            VariableType::RequestParamContinued
        )));
    }

    #[test]
    fn test_discovers_optional_path_variable() {
        let template = UriTemplate::parse("/foo{/bar}").unwrap();
        assert!(template
            .variables()
            .contains(&TemplateVariable::new("bar", VariableType::Segment)));
    }

    #[test]
    fn test_discovers_path_variable() {
        let template = UriTemplate::parse("/foo/{bar}").unwrap();
        assert!(template
            .variables()
            .contains(&TemplateVariable::new("bar", VariableType::PathVariable)));
    }

    #[test]
    fn test_discovers_fragment() {
        let template = UriTemplate::parse("/foo{#bar}").unwrap();
        assert!(template
            .variables()
            .contains(&TemplateVariable::new("bar", VariableType::Fragment)));
    }

    #[test]
    fn test_discovers_multiple_request_params() {
        let template = UriTemplate::parse("/foo{?bar,foobar}").unwrap();
        let variables = template.variables();
        assert!(variables.contains(&TemplateVariable::new("bar", VariableType::RequestParam)));
        assert!(variables.contains(&TemplateVariable::new("foobar", VariableType::RequestParam)));
    }

    #[test]
    fn test_variables_are_deduplicated() {
        let template = UriTemplate::parse("/{id}/copy/{id}{?id}").unwrap();
        assert_eq!(template.variables().len(), 2);
        assert_eq!(template.variable_names(), vec!["id"]);
    }

    #[test]
    fn test_expands_request_parameter() {
        let template = UriTemplate::parse("/foo{?bar}").unwrap();
        let uri = template.expand(&params(&[("bar", "myBar")])).unwrap();
        assert_eq!(uri, "/foo?bar=myBar");
    }

    #[test]
    fn test_expands_continued_parameter_after_literal_query() {
        let template = UriTemplate::parse("/foo?bar{&foobar}").unwrap();
        let uri = template.expand(&params(&[("foobar", "myFooBar")])).unwrap();
        assert_eq!(uri, "/foo?bar&foobar=myFooBar");
    }

    #[test]
    fn test_expands_multiple_request_parameters() {
        let template = UriTemplate::parse("/foo{?bar,fooBar}").unwrap();
        let uri = template
            .expand(&params(&[("bar", "myBar"), ("fooBar", "myFooBar")]))
            .unwrap();
        assert_eq!(uri, "/foo?bar=myBar&fooBar=myFooBar");
    }

    #[test]
    fn test_absent_param_does_not_consume_query_slot() {
        let template = UriTemplate::parse("/foo{?bar,baz}").unwrap();
        let uri = template.expand(&params(&[("baz", "b")])).unwrap();
        assert_eq!(uri, "/foo?baz=b");
    }

    #[test]
    fn test_question_mark_in_value_does_not_open_query() {
        let template = UriTemplate::parse("/search{#section}{?q}").unwrap();
        let uri = template
            .expand(&params(&[("section", "top?x"), ("q", "a")]))
            .unwrap();
        assert_eq!(uri, "/search#top?x?q=a");

        let template = UriTemplate::parse("/items/{id}{&page}").unwrap();
        let uri = template.expand(&params(&[("id", "a?b"), ("page", "2")])).unwrap();
        assert_eq!(uri, "/items/a?b?page=2");
    }

    #[test]
    fn test_continued_marker_opens_query_when_first() {
        let template = UriTemplate::parse("/foo{&bar}").unwrap();
        let uri = template.expand(&params(&[("bar", "b")])).unwrap();
        assert_eq!(uri, "/foo?bar=b");
    }

    #[test]
    fn test_rejects_missing_required_path_variable() {
        let template = UriTemplate::parse("/foo/{bar}").unwrap();
        let err = template.expand(&TemplateParams::new()).unwrap_err();
        match err {
            TraversonError::MissingVariable(name) => assert_eq!(name, "bar"),
            other => panic!("Expected MissingVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_template_reusable_after_failure() {
        let template = UriTemplate::parse("/movies/{id}").unwrap();
        assert!(template.expand(&TemplateParams::new()).is_err());
        assert_eq!(template.expand(&params(&[("id", "7")])).unwrap(), "/movies/7");
    }

    #[test]
    fn test_expands_multiple_variables_positionally() {
        let template = UriTemplate::parse("/foo{/bar}{?firstname,lastname}{#anchor}").unwrap();
        let uri = template
            .expand_positional(["path", "Dave", "Matthews", "discography"])
            .unwrap();
        assert_eq!(uri, "/foo/path?firstname=Dave&lastname=Matthews#discography");
    }

    #[test]
    fn test_positional_surplus_values_ignored() {
        let template = UriTemplate::parse("/movies/{id}").unwrap();
        let uri = template.expand_positional(["1", "2"]).unwrap();
        assert_eq!(uri, "/movies/1");
    }

    #[test]
    fn test_positional_too_few_values_for_required() {
        let template = UriTemplate::parse("/{a}/{b}").unwrap();
        let err = template.expand_positional(["1"]).unwrap_err();
        assert!(matches!(err, TraversonError::MissingVariable(ref name) if name == "b"));
    }

    #[test]
    fn test_optional_variables_omitted_keep_literals() {
        let template = UriTemplate::parse("/a{/seg}/b{?q}{#f}").unwrap();
        assert_eq!(template.expand(&TemplateParams::new()).unwrap(), "/a/b");
    }

    #[test]
    fn test_literals_preserved_around_substitutions() {
        let template = UriTemplate::parse("http://host:8080/api/{version}/movies/{id}.json").unwrap();
        let uri = template
            .expand(&params(&[("version", "v2"), ("id", "42")]))
            .unwrap();
        assert_eq!(uri, "http://host:8080/api/v2/movies/42.json");
    }

    #[test]
    fn test_values_are_not_reescaped() {
        let template = UriTemplate::parse("/search{?q}").unwrap();
        let uri = template.expand(&params(&[("q", "a%20b")])).unwrap();
        assert_eq!(uri, "/search?q=a%20b");
    }

    #[test]
    fn test_list_value_repeats_query_pairs() {
        let template = UriTemplate::parse("/movies{?genre}").unwrap();
        let mut p = TemplateParams::new();
        p.insert("genre".into(), vec!["drama", "scifi"].into());
        assert_eq!(template.expand(&p).unwrap(), "/movies?genre=drama&genre=scifi");
    }

    #[test]
    fn test_list_value_rejected_for_single_value_markers() {
        for source in ["/movies/{id}", "/movies{/id}", "/movies{#id}"] {
            let template = UriTemplate::parse(source).unwrap();
            let mut p = TemplateParams::new();
            p.insert("id".into(), vec!["1", "2"].into());
            let err = template.expand(&p).unwrap_err();
            assert!(
                matches!(err, TraversonError::UnsupportedValue { .. }),
                "{} should reject a list",
                source
            );
        }
    }

    #[test]
    fn test_only_one_fragment_emitted() {
        let template = UriTemplate::parse("/doc{#a}{#b}").unwrap();
        let uri = template.expand(&params(&[("a", "x"), ("b", "y")])).unwrap();
        assert_eq!(uri, "/doc#x");
    }

    #[test]
    fn test_is_template() {
        assert!(UriTemplate::is_template("/movies{?page}"));
        assert!(!UriTemplate::is_template("/movies"));
        assert!(!UriTemplate::is_template("/movies{"));
    }

    #[test]
    fn test_from_str_and_display() {
        let template: UriTemplate = "/foo{?bar}".parse().unwrap();
        assert_eq!(template.to_string(), "/foo{?bar}");
        assert_eq!(template.as_str(), "/foo{?bar}");
    }
}
