//! Form engine for copydesk.
//!
//! Given a template and collected field values, this module produces either
//! resolved values ready for prompt assembly or a list of field-scoped
//! validation errors. Checks:
//!
//! - Required: trimmed value non-empty
//! - Length: value length (in characters) at most the field's cap
//! - Select membership: value must be one of the declared options
//! - Other rule: when a select's value equals the `Other` sentinel, the
//!   companion `<fieldId>_other` value becomes required and is capped at 100
//!   characters on wizard (strategic) templates
//!
//! Wizard templates validate eagerly per step: the first step with errors
//! reports those errors and later steps are not checked.

use crate::catalog::{Field, Template, OTHER_SENTINEL};
use crate::error::CopydeskError;
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// Collected form values, field id -> raw string value.
///
/// Companion values use the `<fieldId>_other` key. Created empty per
/// generation invocation and discarded after the command.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: BTreeMap<String, String>,
}

impl FormData {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous value.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), value.into());
    }

    /// Get a field value.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(|s| s.as_str())
    }

    /// All keys present in the form.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }

    /// Parse `key=value` pairs from the command line.
    ///
    /// A pair without `=` is a user error naming the offending argument.
    pub fn from_pairs<I, S>(pairs: I) -> crate::error::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut form = FormData::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((key, value)) = pair.split_once('=') else {
                return Err(CopydeskError::UserError(format!(
                    "invalid field argument '{}': expected key=value",
                    pair
                )));
            };
            form.set(key.trim(), value);
        }
        Ok(form)
    }
}

/// A field-scoped validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field id the error is about.
    pub field: String,

    /// Wizard step (1-based index and title) the field belongs to, if any.
    pub step: Option<(usize, &'static str)>,

    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.step {
            Some((number, title)) => {
                write!(f, "step {} ({}): {}: {}", number, title, self.field, self.message)
            }
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Validate a full form against a template.
///
/// Standard templates validate all fields in one pass. Wizard templates
/// validate step by step; the first failing step short-circuits. Unknown
/// field ids are always reported.
pub fn validate(template: &Template, form: &FormData) -> Vec<FieldError> {
    let mut errors = unknown_key_errors(template, form);
    if !errors.is_empty() {
        return errors;
    }

    match template.steps() {
        Some(steps) => {
            for (index, step) in steps.iter().enumerate() {
                let step_errors = validate_step(template, index, form);
                if !step_errors.is_empty() {
                    errors.extend(step_errors);
                    break;
                }
            }
        }
        None => {
            for field in template.fields {
                errors.extend(validate_field(template, field, form, None));
            }
        }
    }

    errors
}

/// Validate a single wizard step (0-based index).
///
/// Callers iterate `template.steps()`; a non-wizard template or an
/// out-of-range index is a caller bug and panics.
pub fn validate_step(template: &Template, index: usize, form: &FormData) -> Vec<FieldError> {
    let steps = template.steps().expect("validate_step requires a wizard template");
    let step = &steps[index];
    let step_tag = Some((index + 1, step.title));

    let mut errors = Vec::new();
    for id in step.field_ids {
        if let Some(field) = template.field(id) {
            errors.extend(validate_field(template, field, form, step_tag));
        }
    }
    errors
}

/// Validate one field, including its Other companion when applicable.
fn validate_field(
    template: &Template,
    field: &Field,
    form: &FormData,
    step: Option<(usize, &'static str)>,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let raw = form.get(field.id).unwrap_or("");
    let trimmed = raw.trim();

    if field.required && trimmed.is_empty() {
        errors.push(FieldError {
            field: field.id.to_string(),
            step,
            message: format!("{} is required", field.label),
        });
        return errors;
    }

    if raw.chars().count() > field.max_length {
        errors.push(FieldError {
            field: field.id.to_string(),
            step,
            message: format!("exceeds maximum length of {} characters", field.max_length),
        });
    }

    let options = field.options();
    if !options.is_empty() && !trimmed.is_empty() && !options.contains(&trimmed) {
        errors.push(FieldError {
            field: field.id.to_string(),
            step,
            message: format!("must be one of: {}", options.join(", ")),
        });
    }

    if field.allows_other() && trimmed == OTHER_SENTINEL {
        let companion_id = field.companion_id();
        let companion = form.get(&companion_id).unwrap_or("");
        let companion_trimmed = companion.trim();
        let companion_cap = template.other_max_length(field);

        if companion_trimmed.is_empty() {
            errors.push(FieldError {
                field: companion_id,
                step,
                message: format!(
                    "is required when {} is set to {}",
                    field.label, OTHER_SENTINEL
                ),
            });
        } else if companion.chars().count() > companion_cap {
            errors.push(FieldError {
                field: companion_id,
                step,
                message: format!("exceeds maximum length of {} characters", companion_cap),
            });
        }
    }

    errors
}

/// Report keys that match neither a field id nor the companion id of an
/// Other-bearing select.
fn unknown_key_errors(template: &Template, form: &FormData) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for key in form.keys() {
        let known = template.field(key).is_some()
            || template
                .fields
                .iter()
                .any(|f| f.allows_other() && f.companion_id() == key);
        if !known {
            errors.push(FieldError {
                field: key.to_string(),
                step: None,
                message: format!("unknown field for template '{}'", template.id),
            });
        }
    }
    errors
}

/// Resolve validated form values for prompt assembly.
///
/// Every declared field gets an entry: the raw value, the companion value in
/// place of the `Other` sentinel, or an empty string for absent optional
/// fields. Values are passed through verbatim otherwise.
pub fn resolve(template: &Template, form: &FormData) -> BTreeMap<String, String> {
    let mut resolved = BTreeMap::new();
    for field in template.fields {
        let raw = form.get(field.id).unwrap_or("");
        let value = if field.allows_other() && raw.trim() == OTHER_SENTINEL {
            form.get(&field.companion_id()).unwrap_or("").trim().to_string()
        } else {
            raw.to_string()
        };
        resolved.insert(field.id.to_string(), value);
    }
    resolved
}

/// Collapse field errors into a single validation error for exit handling.
///
/// Callers print the individual errors first; this carries a compact summary.
pub fn into_validation_error(errors: &[FieldError]) -> CopydeskError {
    let summary: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    CopydeskError::ValidationError(summary.join("; "))
}
