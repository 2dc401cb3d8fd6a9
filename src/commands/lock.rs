//! Implementation of the `copydesk lock` commands.

use crate::cli::LockClearArgs;
use crate::config::Config;
use crate::context::require_initialized_workspace;
use crate::error::{CopydeskError, Result};
use crate::events::{append_event, Event, EventAction};
use crate::locks;
use serde_json::json;

/// Execute the `copydesk lock list` command.
pub fn cmd_list() -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let config = Config::load(ctx.config_path()).unwrap_or_default();

    let active = locks::list_locks(&ctx, config.lock_stale_minutes)?;
    if active.is_empty() {
        println!("No active locks.");
        return Ok(());
    }

    for lock in &active {
        println!("{}", lock);
    }

    if active.iter().any(|l| l.is_stale) {
        println!();
        println!("Stale locks usually mean a previous run crashed mid-request.");
        println!("Clear one with `copydesk lock clear <action> --force`.");
    }

    Ok(())
}

/// Execute the `copydesk lock clear` command.
pub fn cmd_clear(args: LockClearArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    if !args.force {
        return Err(CopydeskError::UserError(format!(
            "clearing a lock can interrupt an in-flight request.\n\
             Re-run with --force to clear the '{}' lock.",
            args.action
        )));
    }

    locks::clear_lock(&ctx, &args.action)?;

    let event = Event::new(EventAction::LockClear)
        .with_details(json!({"action": args.action, "force": true}));
    append_event(&ctx, &event)?;

    println!("Cleared '{}' lock.", args.action);
    Ok(())
}
