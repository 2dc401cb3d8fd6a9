//! Implementation of the `copydesk persona` commands.

use crate::cli::{PersonaAddArgs, PersonaRemoveArgs, PersonaShowArgs, PersonaUpdateArgs};
use crate::context::require_initialized_workspace;
use crate::error::{CopydeskError, Result};
use crate::events::{append_event, Event, EventAction};
use crate::voice::Persona;
use chrono::Utc;
use serde_json::json;

/// Execute the `copydesk persona add` command.
pub fn cmd_add(args: PersonaAddArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    if Persona::exists(&ctx, &args.name) {
        return Err(CopydeskError::UserError(format!(
            "persona '{}' already exists.\nUse `copydesk persona update` to change it.",
            args.name
        )));
    }

    let now = Utc::now();
    let persona = Persona {
        name: args.name.clone(),
        photo: args.photo,
        demographics: args.demographics,
        psychographics: args.psychographics,
        pain_points: args.pain_points,
        language_patterns: args.language_patterns,
        goals: args.goals,
        created_at: now,
        updated_at: now,
    };
    persona.save(&ctx)?;

    let event = Event::new(EventAction::PersonaAdd)
        .with_details(json!({"name": persona.name}));
    append_event(&ctx, &event)?;

    println!("Added persona '{}'.", persona.name);
    Ok(())
}

/// Execute the `copydesk persona update` command.
///
/// Only the flags provided on the command line change; list flags replace
/// the stored list wholesale.
pub fn cmd_update(args: PersonaUpdateArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let mut persona = Persona::load(&ctx, &args.name)?;

    if let Some(photo) = args.photo {
        persona.photo = Some(photo);
    }
    if let Some(demographics) = args.demographics {
        persona.demographics = Some(demographics);
    }
    if let Some(psychographics) = args.psychographics {
        persona.psychographics = Some(psychographics);
    }
    if let Some(pain_points) = args.pain_points {
        persona.pain_points = pain_points;
    }
    if let Some(language_patterns) = args.language_patterns {
        persona.language_patterns = language_patterns;
    }
    if let Some(goals) = args.goals {
        persona.goals = goals;
    }
    persona.updated_at = Utc::now();
    persona.save(&ctx)?;

    let event = Event::new(EventAction::PersonaUpdate)
        .with_details(json!({"name": persona.name}));
    append_event(&ctx, &event)?;

    println!("Updated persona '{}'.", persona.name);
    Ok(())
}

/// Execute the `copydesk persona list` command.
pub fn cmd_list() -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let personas = Persona::load_all(&ctx)?;
    if personas.is_empty() {
        println!("No personas yet. Add one with `copydesk persona add <name>`.");
        return Ok(());
    }

    for persona in personas {
        let demographics = persona.demographics.as_deref().unwrap_or("-");
        println!("{:<28} {}", persona.name, demographics);
    }
    Ok(())
}

/// Execute the `copydesk persona show` command.
pub fn cmd_show(args: PersonaShowArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let persona = Persona::load(&ctx, &args.name)?;

    println!("{}", persona.name);
    if let Some(photo) = &persona.photo {
        println!("photo: {}", photo);
    }
    if let Some(demographics) = &persona.demographics {
        println!("demographics: {}", demographics);
    }
    if let Some(psychographics) = &persona.psychographics {
        println!("psychographics: {}", psychographics);
    }
    print_list("pain points", &persona.pain_points);
    print_list("language patterns", &persona.language_patterns);
    print_list("goals", &persona.goals);
    println!("updated: {}", persona.updated_at.to_rfc3339());

    Ok(())
}

/// Execute the `copydesk persona remove` command.
pub fn cmd_remove(args: PersonaRemoveArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    Persona::remove(&ctx, &args.name)?;

    let event = Event::new(EventAction::PersonaRemove)
        .with_details(json!({"name": args.name}));
    append_event(&ctx, &event)?;

    println!("Removed persona '{}'.", args.name);
    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}:", title);
    for item in items {
        println!("  - {}", item);
    }
}
