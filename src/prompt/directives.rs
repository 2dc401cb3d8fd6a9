//! Directive block rendering for brand voices and personas.
//!
//! These blocks fill the `{brandVoiceInstructions}` and
//! `{personaInstructions}` placeholders in template prompts. An unattached
//! brand voice or persona renders as an empty string, so prompts read
//! cleanly either way.

use crate::voice::{BrandVoice, Persona};

/// Render the brand voice directive block.
pub fn brand_voice_block(voice: &BrandVoice) -> String {
    let mut block = String::from("\nBRAND VOICE REQUIREMENTS:\n");
    block.push_str(&format!("- Brand: {}\n", voice.brand_name));
    block.push_str(&format!("- Tone: {}\n", voice.tone));

    if !voice.approved_phrases.is_empty() {
        block.push_str(&format!(
            "- Use these approved phrases where natural: {}\n",
            voice.approved_phrases.join(", ")
        ));
    }
    if !voice.forbidden_words.is_empty() {
        block.push_str(&format!(
            "- Never use these words: {}\n",
            voice.forbidden_words.join(", ")
        ));
    }
    if !voice.values.is_empty() {
        block.push_str(&format!("- Brand values: {}\n", voice.values.join(", ")));
    }
    if let Some(mission) = &voice.mission {
        block.push_str(&format!("- Mission: {}\n", mission));
    }

    block
}

/// Render the persona directive block.
pub fn persona_block(persona: &Persona) -> String {
    let mut block = String::from("\nTARGET PERSONA:\n");
    block.push_str(&format!("- Name: {}\n", persona.name));

    if let Some(demographics) = &persona.demographics {
        block.push_str(&format!("- Demographics: {}\n", demographics));
    }
    if let Some(psychographics) = &persona.psychographics {
        block.push_str(&format!("- Psychographics: {}\n", psychographics));
    }
    if !persona.pain_points.is_empty() {
        block.push_str(&format!(
            "- Pain points: {}\n",
            persona.pain_points.join("; ")
        ));
    }
    if !persona.language_patterns.is_empty() {
        block.push_str(&format!(
            "- Speaks in terms like: {}\n",
            persona.language_patterns.join("; ")
        ));
    }
    if !persona.goals.is_empty() {
        block.push_str(&format!("- Goals: {}\n", persona.goals.join("; ")));
    }

    block.push_str("Write copy that resonates with this persona.\n");
    block
}
