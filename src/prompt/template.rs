//! Placeholder substitution for prompt strings.
//!
//! Performs `{fieldId}` substitution in template prompts. Values are inserted
//! verbatim; the output is consumed by a remote language model, never
//! executed locally.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes the value of `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! # Error Handling
//!
//! The engine is fail-safe: an undefined placeholder is an error rather than
//! a silent empty substitution. This prevents subtle bugs from typos in
//! placeholder names; catalog tests keep shipped templates from ever hitting
//! it.

use std::collections::BTreeMap;
use std::fmt;

/// Error type for template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder was referenced but not provided.
    UndefinedPlaceholder {
        /// The name of the undefined placeholder.
        name: String,
        /// The position in the template where the placeholder was found.
        position: usize,
    },
    /// A `{` was found without a matching `}`.
    UnmatchedBrace {
        /// The position of the unmatched `{`.
        position: usize,
    },
    /// An empty placeholder name was found (e.g., `{}`).
    EmptyPlaceholder {
        /// The position of the empty placeholder.
        position: usize,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedPlaceholder { name, position } => {
                write!(
                    f,
                    "undefined placeholder '{}' at position {} in prompt template",
                    name, position
                )
            }
            TemplateError::UnmatchedBrace { position } => {
                write!(f, "unmatched '{{' at position {} in prompt template", position)
            }
            TemplateError::EmptyPlaceholder { position } => {
                write!(
                    f,
                    "empty placeholder '{{}}' at position {} in prompt template",
                    position
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Render a prompt template by substituting placeholders.
///
/// Every `{name}` occurrence is replaced with `values[name]`, globally.
/// Braces inside substituted values are untouched: the scanner walks only
/// the template, so values cannot introduce new placeholders.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use copydesk::prompt::render_template;
///
/// let mut values = BTreeMap::new();
/// values.insert("productName".to_string(), "Acme".to_string());
///
/// let result = render_template("Introducing {productName}!", &values).unwrap();
/// assert_eq!(result, "Introducing Acme!");
/// ```
pub fn render_template(
    template: &str,
    values: &BTreeMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                // Check for escape sequence {{
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    result.push('{');
                } else {
                    let start_pos = pos;
                    let mut name = String::new();

                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, c)) => name.push(c),
                            None => {
                                return Err(TemplateError::UnmatchedBrace {
                                    position: start_pos,
                                });
                            }
                        }
                    }

                    if name.is_empty() {
                        return Err(TemplateError::EmptyPlaceholder {
                            position: start_pos,
                        });
                    }

                    let name = name.trim();

                    match values.get(name) {
                        Some(value) => result.push_str(value),
                        None => {
                            return Err(TemplateError::UndefinedPlaceholder {
                                name: name.to_string(),
                                position: start_pos,
                            });
                        }
                    }
                }
            }
            '}' => {
                // Check for escape sequence }}
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                    result.push('}');
                } else {
                    // Lone } is just a regular character
                    result.push('}');
                }
            }
            _ => result.push(ch),
        }
    }

    Ok(result)
}
