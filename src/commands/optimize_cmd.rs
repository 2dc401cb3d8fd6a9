//! Implementation of the `copydesk optimize` commands.
//!
//! `optimize run` requests a rewrite of the last analyzed text - always the
//! text the alignment was computed from, never the document's current
//! selection. `optimize accept`/`reject` complete the comparison; `show`
//! reprints the pending comparison.

use crate::align::AlignmentKind;
use crate::cli::OptimizeAcceptArgs;
use crate::client::ApiClient;
use crate::config::Config;
use crate::context::require_initialized_workspace;
use crate::error::{CopydeskError, Result};
use crate::events::{append_event, Event, EventAction};
use crate::locks;
use crate::optimize::{self, OptimizeRecord};
use crate::session::SessionState;
use crate::voice::{BrandVoice, Persona};
use chrono::Utc;
use serde_json::json;

/// Execute the `copydesk optimize run` command.
pub fn cmd_run() -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let config = Config::load(ctx.config_path()).unwrap_or_default();

    let session = SessionState::load(&ctx)?;
    let alignment = session.alignment.value().cloned().ok_or_else(|| {
        CopydeskError::UserError(
            "no alignment result to optimize from.\n\
             Run `copydesk align run <doc-id> --against ...` first."
                .to_string(),
        )
    })?;

    let (brand_voice, persona) = match alignment.target.kind {
        AlignmentKind::Brand => (Some(BrandVoice::require(&ctx)?), None),
        AlignmentKind::Persona => (None, Some(Persona::load(&ctx, &alignment.target.name)?)),
    };

    // One optimize request in flight at a time
    let _lock = locks::acquire_request_lock(&ctx, "optimize")?;

    let mut session = SessionState::load(&ctx)?;
    let (slice, token) = std::mem::take(&mut session.optimize).begin();
    session.optimize = slice;
    session.save(&ctx)?;

    println!(
        "Requesting rewrite of {} text for {} ...",
        alignment.doc_id, alignment.target
    );

    let client = ApiClient::new(&config);
    let output = match client.optimize(
        &alignment.analyzed_text,
        alignment.target.kind,
        &alignment.result,
        brand_voice.as_ref(),
        persona.as_ref(),
    ) {
        Ok(output) => output,
        Err(e) => {
            let mut fresh = SessionState::load(&ctx)?;
            let (slice, _) = std::mem::take(&mut fresh.optimize).fail(token, e.to_string());
            fresh.optimize = slice;
            fresh.save(&ctx)?;
            return Err(e);
        }
    };

    let rewritten_html = crate::format::format_generated_html(&output.optimized_copy, false);
    let record = OptimizeRecord {
        doc_id: alignment.doc_id.clone(),
        range: alignment.range,
        original_text: alignment.analyzed_text.clone(),
        rewritten_html,
        changes: output.changes,
        target: alignment.target.clone(),
        requested_at: Utc::now(),
    };

    let mut fresh = SessionState::load(&ctx)?;
    let (slice, applied) = std::mem::take(&mut fresh.optimize).resolve(token, record.clone());
    fresh.optimize = slice;

    if !applied {
        eprintln!("Warning: this optimize request was superseded; discarding its result.");
        return Ok(());
    }
    fresh.save(&ctx)?;

    let event = Event::new(EventAction::OptimizeRequest)
        .with_document(&record.doc_id)
        .with_details(json!({
            "target_kind": record.target.kind.as_str(),
            "target_name": record.target.name,
            "changes": record.changes.len(),
        }));
    append_event(&ctx, &event)?;

    print_comparison(&record);
    println!();
    println!("Apply with `copydesk optimize accept` (or `--edited-file <path>`),");
    println!("or discard with `copydesk optimize reject`.");

    Ok(())
}

/// Execute the `copydesk optimize show` command.
pub fn cmd_show() -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let session = SessionState::load(&ctx)?;

    if let Some(record) = session.optimize.value() {
        print_comparison(record);
    } else if let Some(message) = session.optimize.error() {
        println!("Last optimize request failed: {}", message);
    } else {
        println!("No optimize result is pending. Run `copydesk optimize run`.");
    }

    Ok(())
}

/// Execute the `copydesk optimize accept` command.
pub fn cmd_accept(args: OptimizeAcceptArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let edited = match &args.edited_file {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read edited file '{}': {}",
                path.display(),
                e
            ))
        })?),
        None => None,
    };

    let mut session = SessionState::load(&ctx)?;
    let outcome = optimize::accept(&ctx, &mut session, edited)?;

    if let Some(version) = outcome.snapshot_version {
        let event = Event::new(EventAction::DocVersion)
            .with_document(&outcome.doc_id)
            .with_details(json!({"version": version, "reason": "optimize_accept"}));
        append_event(&ctx, &event)?;
    }

    let event = Event::new(EventAction::OptimizeAccept)
        .with_document(&outcome.doc_id)
        .with_details(json!({
            "edited": outcome.edited,
            "snapshot_version": outcome.snapshot_version,
        }));
    append_event(&ctx, &event)?;

    println!(
        "Applied {} rewrite to {}{}",
        if outcome.edited { "edited" } else { "the" },
        outcome.doc_id,
        match outcome.snapshot_version {
            Some(v) => format!(" (previous content saved as v{})", v),
            None => " (snapshot failed, replacement applied anyway)".to_string(),
        }
    );

    Ok(())
}

/// Execute the `copydesk optimize reject` command.
pub fn cmd_reject() -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let mut session = SessionState::load(&ctx)?;
    let record = optimize::reject(&ctx, &mut session)?;

    let event = Event::new(EventAction::OptimizeReject)
        .with_document(&record.doc_id)
        .with_details(json!({
            "target_kind": record.target.kind.as_str(),
            "target_name": record.target.name,
        }));
    append_event(&ctx, &event)?;

    println!("Rejected the rewrite; {} is unchanged.", record.doc_id);
    Ok(())
}

/// Print the original/rewrite comparison.
fn print_comparison(record: &OptimizeRecord) {
    println!(
        "Rewrite for {} ({}), targeting {}:",
        record.doc_id, record.range, record.target
    );
    println!();
    println!("--- original (analyzed text) ---");
    println!("{}", record.original_text);
    println!();
    println!("--- rewritten ---");
    println!("{}", record.rewritten_html);

    if !record.changes.is_empty() {
        println!();
        println!("Changes:");
        for change in &record.changes {
            println!("  - {}", change);
        }
    }
}
