//! Implementation of the `copydesk status` command.

use crate::cli::StatusArgs;
use crate::config::Config;
use crate::context::require_initialized_workspace;
use crate::error::Result;
use crate::events::tail_events;
use crate::locks;
use crate::session::{SessionState, Slice, SliceState};
use crate::snippet::Snippet;
use crate::voice::{BrandVoice, Persona};
use crate::workspace::DocumentIndex;

/// Execute the `copydesk status` command.
pub fn cmd_status(args: StatusArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let config = Config::load(ctx.config_path()).unwrap_or_default();

    println!("Workspace: {} ({})", config.project, ctx.root.display());
    println!("API:       {}", config.effective_api_base_url());
    println!();

    let index = DocumentIndex::build(&ctx)?;
    let personas = Persona::load_all(&ctx)?;
    let snippets = Snippet::load_all(&ctx)?;
    let brand_voice = BrandVoice::load(&ctx)?;

    println!(
        "documents: {}   personas: {}   snippets: {}   brand voice: {}",
        index.len(),
        personas.len(),
        snippets.len(),
        brand_voice
            .as_ref()
            .map(|v| v.brand_name.as_str())
            .unwrap_or("none")
    );

    let session = SessionState::load(&ctx)?;
    println!();
    println!("session:");
    println!("  generation: {}", describe_slice(&session.generation));
    println!("  alignment:  {}", describe_slice(&session.alignment));
    println!("  optimize:   {}", describe_slice(&session.optimize));

    let active_locks = locks::list_locks(&ctx, config.lock_stale_minutes)?;
    if !active_locks.is_empty() {
        println!();
        println!("active locks:");
        for lock in &active_locks {
            println!("  {}", lock);
        }
    }

    if args.tail > 0 {
        let events = tail_events(&ctx, args.tail)?;
        if !events.is_empty() {
            println!();
            println!("recent events:");
            for event in events {
                let document = event
                    .document
                    .as_deref()
                    .map(|d| format!(" {}", d))
                    .unwrap_or_default();
                println!(
                    "  {} {}{}",
                    event.ts.format("%Y-%m-%d %H:%M:%S"),
                    event.action,
                    document
                );
            }
        }
    }

    Ok(())
}

/// One-line slice description for the status panel.
fn describe_slice<T>(slice: &Slice<T>) -> String {
    match &slice.state {
        SliceState::Idle => "idle".to_string(),
        SliceState::Loading => format!("in flight (token {})", slice.token),
        SliceState::Ready { .. } => format!("result ready (token {})", slice.token),
        SliceState::Failed { message } => format!("failed: {}", message),
    }
}
