//! Prompt assembly tests.

use super::*;
use crate::catalog;
use crate::form::{self, FormData};
use chrono::Utc;

fn sample_voice() -> BrandVoice {
    BrandVoice {
        brand_name: "Acme".to_string(),
        tone: "confident but never boastful".to_string(),
        approved_phrases: vec!["ship with confidence".to_string()],
        forbidden_words: vec!["synergy".to_string()],
        values: vec!["speed".to_string()],
        mission: Some("Make deploys boring".to_string()),
        saved_at: Utc::now(),
    }
}

fn sample_persona() -> Persona {
    let now = Utc::now();
    Persona {
        name: "Data-Driven Dana".to_string(),
        photo: None,
        demographics: Some("VP of Engineering".to_string()),
        psychographics: None,
        pain_points: vec!["slow release cycles".to_string()],
        language_patterns: vec!["show me the numbers".to_string()],
        goals: vec!["cut deploy time in half".to_string()],
        created_at: now,
        updated_at: now,
    }
}

fn brand_messaging_form() -> FormData {
    let mut form = FormData::new();
    form.set("brandName", "Acme");
    form.set("industry", "B2B SaaS");
    form.set("primaryAudience", "CTOs");
    form.set("keyProblem", "slow deploys");
    form.set("differentiators", "fast rollback");
    form.set("tonePreference", "Professional");
    form
}

#[test]
fn assembled_prompt_contains_field_values() {
    let template = catalog::find("brand-messaging").unwrap();
    let form = brand_messaging_form();
    assert!(form::validate(template, &form).is_empty());

    let resolved = form::resolve(template, &form);
    let prompt = assemble(template, &resolved, None, None).unwrap();

    assert!(!prompt.is_empty());
    assert!(prompt.contains("Acme"));
    assert!(prompt.contains("B2B SaaS"));
    assert!(prompt.contains("fast rollback"));
    // Unattached blocks render as empty strings, not leftover placeholders.
    assert!(!prompt.contains("{brandVoiceInstructions}"));
    assert!(!prompt.contains("{personaInstructions}"));
    assert!(!prompt.contains("BRAND VOICE REQUIREMENTS"));
}

#[test]
fn assembly_is_deterministic() {
    let template = catalog::find("brand-messaging").unwrap();
    let resolved = form::resolve(template, &brand_messaging_form());

    let first = assemble(template, &resolved, None, None).unwrap();
    let second = assemble(template, &resolved, None, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn brand_voice_block_is_injected() {
    let template = catalog::find("product-description").unwrap();
    let mut form = FormData::new();
    form.set("productName", "Acme Deploys");
    form.set("productCategory", "deployment platform");
    form.set("keyFeatures", "one-click rollback");
    form.set("targetAudience", "platform teams");
    form.set("tone", "Professional");

    let resolved = form::resolve(template, &form);
    let voice = sample_voice();
    let prompt = assemble(template, &resolved, Some(&voice), None).unwrap();

    assert!(prompt.contains("BRAND VOICE REQUIREMENTS:"));
    assert!(prompt.contains("- Brand: Acme"));
    assert!(prompt.contains("- Never use these words: synergy"));
    assert!(prompt.contains("- Mission: Make deploys boring"));
}

#[test]
fn persona_block_is_injected() {
    let template = catalog::find("landing-hero").unwrap();
    let mut form = FormData::new();
    form.set("productName", "Acme Deploys");
    form.set("valueProposition", "deploys in seconds");
    form.set("primaryAudience", "CTOs");
    form.set("callToAction", "Start free");

    let resolved = form::resolve(template, &form);
    let persona = sample_persona();
    let prompt = assemble(template, &resolved, None, Some(&persona)).unwrap();

    assert!(prompt.contains("TARGET PERSONA:"));
    assert!(prompt.contains("- Name: Data-Driven Dana"));
    assert!(prompt.contains("- Pain points: slow release cycles"));
}

#[test]
fn other_companion_value_flows_into_prompt() {
    let template = catalog::find("tone-shift").unwrap();
    let mut form = FormData::new();
    form.set("originalCopy", "<p>Buy now.</p>");
    form.set("targetTone", "Other");
    form.set("targetTone_other", "Deadpan");

    assert!(form::validate(template, &form).is_empty());
    let resolved = form::resolve(template, &form);
    let prompt = assemble(template, &resolved, None, None).unwrap();

    assert!(prompt.contains("Deadpan"));
    assert!(!prompt.contains("Other"));
}

#[test]
fn both_blocks_together() {
    let template = catalog::find("social-ad").unwrap();
    let mut form = FormData::new();
    form.set("platform", "LinkedIn");
    form.set("productName", "Acme Deploys");
    form.set("hook", "Ship in seconds");
    form.set("callToAction", "Start free");

    let resolved = form::resolve(template, &form);
    let voice = sample_voice();
    let persona = sample_persona();
    let prompt = assemble(template, &resolved, Some(&voice), Some(&persona)).unwrap();

    let brand_pos = prompt.find("BRAND VOICE REQUIREMENTS:").unwrap();
    let persona_pos = prompt.find("TARGET PERSONA:").unwrap();
    assert!(brand_pos < persona_pos);
}

#[test]
fn minimal_voice_renders_minimal_block() {
    let voice = BrandVoice {
        brand_name: "Acme".to_string(),
        tone: "plain".to_string(),
        approved_phrases: Vec::new(),
        forbidden_words: Vec::new(),
        values: Vec::new(),
        mission: None,
        saved_at: Utc::now(),
    };
    let block = brand_voice_block(&voice);
    assert!(block.contains("- Brand: Acme"));
    assert!(block.contains("- Tone: plain"));
    assert!(!block.contains("approved phrases"));
    assert!(!block.contains("Mission"));
}
