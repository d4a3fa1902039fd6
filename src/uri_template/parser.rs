// Template parser: a single left-to-right scan over the template string

use crate::error::{Result, TraversonError};

use super::variable::{TemplateVariable, VariableType};

/// RFC 6570 operators outside the supported subset.
const UNSUPPORTED_OPERATORS: &[char] = &['+', '.', ';', '=', ',', '!', '@', '|'];

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TemplatePart {
    Literal(String),
    /// A `{...}` block; all variables share the block's marker
    Expression(Vec<TemplateVariable>),
}

pub(crate) struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    pub(crate) fn parse(template: &'a str) -> Result<Vec<TemplatePart>> {
        let mut parser = Self {
            input: template,
            pos: 0,
        };
        parser.parse_template()
    }

    fn parse_template(&mut self) -> Result<Vec<TemplatePart>> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while let Some(ch) = self.peek_char() {
            if ch == '{' {
                if !literal_buf.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                }
                let variables = self.parse_expression()?;
                parts.push(TemplatePart::Expression(variables));
            } else {
                // A stray '}' is kept as a literal character
                literal_buf.push(ch);
                self.pos += ch.len_utf8();
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(parts)
    }

    fn parse_expression(&mut self) -> Result<Vec<TemplateVariable>> {
        let open = self.pos;
        self.pos += 1; // consume {

        let rest = &self.input[self.pos..];
        let close = match rest.find(['{', '}']) {
            Some(i) if rest[i..].starts_with('}') => i,
            Some(i) => return Err(self.error(self.pos + i, "nested '{' inside expression")),
            None => return Err(self.error(open, "unterminated expression, missing '}'")),
        };

        let body = &rest[..close];
        let body_start = self.pos;
        self.pos += close + 1; // body and closing }

        let first = body
            .chars()
            .next()
            .ok_or_else(|| self.error(open, "empty expression"))?;

        let (variable_type, names, names_start) = match VariableType::from_marker(first) {
            Some(variable_type) => (variable_type, &body[1..], body_start + 1),
            None if UNSUPPORTED_OPERATORS.contains(&first) => {
                return Err(self.error(
                    body_start,
                    format!("unsupported expression operator '{}'", first),
                ));
            }
            None => (VariableType::PathVariable, body, body_start),
        };

        let mut variables = Vec::new();
        let mut offset = names_start;

        for raw in names.split(',') {
            let name = raw.trim();
            if let Some(bad) = name.chars().find(|c| !is_varchar(*c)) {
                return Err(self.error(
                    offset,
                    format!("invalid character '{}' in variable name '{}'", bad, name),
                ));
            }
            if name.is_empty() {
                return Err(self.error(offset, "empty variable name"));
            }
            variables.push(TemplateVariable::new(name, variable_type));
            offset += raw.len() + 1;
        }

        Ok(variables)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn error(&self, position: usize, reason: impl Into<String>) -> TraversonError {
        TraversonError::MalformedTemplate {
            template: self.input.to_string(),
            position,
            reason: reason.into(),
        }
    }
}

/// Characters allowed in a variable name (RFC 6570 `varchar`, plus `.`).
fn is_varchar(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '%')
}
