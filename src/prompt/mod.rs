//! Prompt assembly for copydesk.
//!
//! Takes a template and resolved form values and produces the single prompt
//! string sent to the generation service. Assembly is deterministic: the same
//! template, values, and attachments always yield the same string.

mod directives;
mod template;

#[cfg(test)]
mod tests;

pub use directives::{brand_voice_block, persona_block};
pub use template::{render_template, TemplateError};

use crate::catalog::Template;
use crate::error::{CopydeskError, Result};
use crate::voice::{BrandVoice, Persona};
use std::collections::BTreeMap;

/// Placeholder id for the brand voice directive block.
pub const BRAND_VOICE_PLACEHOLDER: &str = "brandVoiceInstructions";

/// Placeholder id for the persona directive block.
pub const PERSONA_PLACEHOLDER: &str = "personaInstructions";

/// Assemble the full generation prompt.
///
/// `resolved` is the output of `form::resolve`: one entry per declared field
/// with Other sentinels already substituted. The two block placeholders are
/// always provided, rendering directive blocks when attached and empty
/// strings otherwise.
pub fn assemble(
    template: &Template,
    resolved: &BTreeMap<String, String>,
    brand_voice: Option<&BrandVoice>,
    persona: Option<&Persona>,
) -> Result<String> {
    let mut values = resolved.clone();

    values.insert(
        BRAND_VOICE_PLACEHOLDER.to_string(),
        brand_voice.map(brand_voice_block).unwrap_or_default(),
    );
    values.insert(
        PERSONA_PLACEHOLDER.to_string(),
        persona.map(persona_block).unwrap_or_default(),
    );

    render_template(template.prompt, &values).map_err(|e| {
        CopydeskError::UserError(format!(
            "internal template error in '{}': {}",
            template.id, e
        ))
    })
}
