//! Template catalog for copydesk.
//!
//! The catalog is a static, build-time list of copy templates. Each template
//! declares its form fields, a prompt string with `{fieldId}` placeholders,
//! and a renderer tag (standard single form or multi-step wizard) resolved
//! here, at definition time, rather than by string-ID comparison at call
//! sites.

mod builtin;
pub mod types;


pub use types::{
    Complexity, Field, FieldKind, Renderer, Template, TemplateCategory, WizardStep, OTHER_SENTINEL,
};

use crate::error::{CopydeskError, Result};

/// All templates in the catalog, in display order.
pub fn all() -> &'static [Template] {
    builtin::TEMPLATES
}

/// Look up a template by id.
///
/// Unknown ids are user errors naming the id and listing valid choices.
pub fn find(id: &str) -> Result<&'static Template> {
    all().iter().find(|t| t.id == id).ok_or_else(|| {
        let known: Vec<&str> = all().iter().map(|t| t.id).collect();
        CopydeskError::UserError(format!(
            "unknown template '{}'. Available templates: {}",
            id,
            known.join(", ")
        ))
    })
}

/// All templates in a category, in display order.
pub fn by_category(category: TemplateCategory) -> Vec<&'static Template> {
    all().iter().filter(|t| t.category == category).collect()
}
