//! Rule-based validation of submitted form fields.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{is_valid_cnpj, is_valid_cpf, is_valid_email};

/// Check applied to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// Must be a valid e-mail address.
    Email,
    /// Must contain something other than whitespace.
    Text,
    /// Must be a valid CPF (digits only).
    Cpf,
    /// Must be a valid CNPJ (separators allowed).
    Cnpj,
}

impl Rule {
    fn check(self, value: &str) -> Result<(), &'static str> {
        let ok = match self {
            Rule::Email => is_valid_email(value),
            Rule::Text => !value.trim().is_empty(),
            Rule::Cpf => is_valid_cpf(value),
            Rule::Cnpj => is_valid_cnpj(value),
        };
        if ok {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    /// Message shown next to a field that fails this rule.
    pub fn message(self) -> &'static str {
        match self {
            Rule::Email => "Invalid e-mail.",
            Rule::Text => "Field cannot be empty.",
            Rule::Cpf => "Invalid CPF.",
            Rule::Cnpj => "Invalid CNPJ.",
        }
    }
}

/// A named value to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// Field identifier, used by [`FormValidator::has_error`].
    pub name: &'a str,
    /// Rule to apply.
    pub rule: Rule,
    /// Current input.
    pub value: &'a str,
}

impl<'a> Field<'a> {
    /// Build a field.
    pub fn new(name: &'a str, rule: Rule, value: &'a str) -> Self {
        Self { name, rule, value }
    }
}

/// A failed field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Name of the failing field.
    pub field: String,
    /// Human-readable reason.
    pub message: &'static str,
}

/// Collects field errors from the last validation pass.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    errors: Vec<FieldError>,
}

impl FormValidator {
    /// Validator with no recorded errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace recorded errors with those of `fields`. Returns true if all pass.
    pub fn validate(&mut self, fields: &[Field<'_>]) -> bool {
        self.errors = fields
            .iter()
            .filter_map(|field| {
                field.rule.check(field.value).err().map(|message| FieldError {
                    field: field.name.to_string(),
                    message,
                })
            })
            .collect();

        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "form validation failed");
        }
        self.errors.is_empty()
    }

    /// Run `action` only if every field passes.
    pub fn submit<R>(&mut self, fields: &[Field<'_>], action: impl FnOnce() -> R) -> Option<R> {
        self.validate(fields).then(action)
    }

    /// Whether `name` failed in the last pass.
    pub fn has_error(&self, name: &str) -> bool {
        self.errors.iter().any(|error| error.field == name)
    }

    /// Errors of the last pass, in field order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Forget recorded errors.
    pub fn reset(&mut self) {
        self.errors.clear();
    }
}
