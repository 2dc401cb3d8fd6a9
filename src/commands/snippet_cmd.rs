//! Implementation of the `copydesk snippet` commands.

use crate::cli::{SnippetInsertArgs, SnippetSaveArgs};
use crate::context::require_initialized_workspace;
use crate::document::{versions, DocumentFile, SelectionRange};
use crate::error::{CopydeskError, Result};
use crate::events::{append_event, Event, EventAction};
use crate::snippet::Snippet;
use crate::workspace::DocumentIndex;
use serde_json::json;

/// Execute the `copydesk snippet save` command.
pub fn cmd_save(args: SnippetSaveArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let content = match (&args.text, &args.from_doc) {
        (Some(text), None) => text.clone(),
        (None, Some(doc_id)) => {
            let index = DocumentIndex::build(&ctx)?;
            let info = index.require(doc_id)?;
            let document = DocumentFile::load(&info.path)?;
            let range = match args.range.as_deref() {
                Some(raw) => SelectionRange::parse(raw)?,
                None => SelectionRange::whole(&document.body),
            };
            range.slice(&document.body)?.to_string()
        }
        (None, None) => {
            return Err(CopydeskError::UserError(
                "snippet content required: pass --text or --from-doc".to_string(),
            ));
        }
        // clap's conflicts_with forbids this combination
        (Some(_), Some(_)) => {
            return Err(CopydeskError::UserError(
                "--text conflicts with --from-doc".to_string(),
            ));
        }
    };

    if content.trim().is_empty() {
        return Err(CopydeskError::UserError(
            "refusing to save an empty snippet".to_string(),
        ));
    }

    let snippet = Snippet::new(&args.name, content);
    snippet.save(&ctx)?;

    let event = Event::new(EventAction::SnippetSave).with_details(json!({
        "name": snippet.name,
        "chars": snippet.content.chars().count(),
        "from_doc": args.from_doc,
    }));
    append_event(&ctx, &event)?;

    println!("Saved snippet '{}'.", snippet.name);
    Ok(())
}

/// Execute the `copydesk snippet list` command.
pub fn cmd_list() -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let snippets = Snippet::load_all(&ctx)?;
    if snippets.is_empty() {
        println!("No snippets yet. Save one with `copydesk snippet save <name> --text ...`.");
        return Ok(());
    }

    for snippet in snippets {
        println!(
            "{:<24} {:>6} chars  {}",
            snippet.name,
            snippet.content.chars().count(),
            snippet.saved_at.to_rfc3339()
        );
    }
    Ok(())
}

/// Execute the `copydesk snippet insert` command.
///
/// Snapshots the document first (best effort), then splices the snippet at
/// the requested offset (end of body by default).
pub fn cmd_insert(args: SnippetInsertArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let snippet = Snippet::load(&ctx, &args.name)?;

    let index = DocumentIndex::build(&ctx)?;
    let info = index.require(&args.doc_id)?;
    let mut document = DocumentFile::load(&info.path)?;

    let offset = args
        .at
        .unwrap_or_else(|| document.body.chars().count());

    let snapshot_version = match versions::snapshot(&ctx, &document) {
        Ok(number) => {
            document.record_version();
            Some(number)
        }
        Err(e) => {
            eprintln!(
                "Warning: failed to snapshot {} before insertion: {}",
                info.id, e
            );
            None
        }
    };

    document.insert_at(offset, &snippet.content)?;
    document.save(&info.path)?;

    let event = Event::new(EventAction::SnippetInsert)
        .with_document(&info.id)
        .with_details(json!({
            "name": snippet.name,
            "at": offset,
            "snapshot_version": snapshot_version,
        }));
    append_event(&ctx, &event)?;

    println!(
        "Inserted '{}' into {} at offset {}.",
        snippet.name, info.id, offset
    );
    Ok(())
}
