//! Implementation of the `copydesk brand-voice` commands.

use crate::cli::BrandVoiceSetArgs;
use crate::context::require_initialized_workspace;
use crate::error::Result;
use crate::events::{append_event, Event, EventAction};
use crate::voice::BrandVoice;
use chrono::Utc;
use serde_json::json;

/// Execute the `copydesk brand-voice set` command.
///
/// Setting replaces any existing brand voice; a workspace holds at most one.
pub fn cmd_set(args: BrandVoiceSetArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let replaced = BrandVoice::load(&ctx)?.is_some();

    let voice = BrandVoice {
        brand_name: args.name,
        tone: args.tone,
        approved_phrases: args.approved_phrases,
        forbidden_words: args.forbidden_words,
        values: args.values,
        mission: args.mission,
        saved_at: Utc::now(),
    };
    voice.save(&ctx)?;

    let event = Event::new(EventAction::BrandVoiceSet).with_details(json!({
        "brand_name": voice.brand_name,
        "replaced": replaced,
    }));
    append_event(&ctx, &event)?;

    println!(
        "{} brand voice '{}'.",
        if replaced { "Replaced" } else { "Set" },
        voice.brand_name
    );
    Ok(())
}

/// Execute the `copydesk brand-voice show` command.
pub fn cmd_show() -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let Some(voice) = BrandVoice::load(&ctx)? else {
        println!("No brand voice set. Create one with `copydesk brand-voice set`.");
        return Ok(());
    };

    println!("{}", voice.brand_name);
    println!("tone: {}", voice.tone);
    print_list("approved phrases", &voice.approved_phrases);
    print_list("forbidden words", &voice.forbidden_words);
    print_list("values", &voice.values);
    if let Some(mission) = &voice.mission {
        println!("mission: {}", mission);
    }
    println!("saved: {}", voice.saved_at.to_rfc3339());

    Ok(())
}

/// Execute the `copydesk brand-voice clear` command.
pub fn cmd_clear() -> Result<()> {
    let ctx = require_initialized_workspace()?;

    if BrandVoice::clear(&ctx)? {
        append_event(&ctx, &Event::new(EventAction::BrandVoiceClear))?;
        println!("Cleared brand voice.");
    } else {
        println!("No brand voice to clear.");
    }
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
