//! Implementation of the `copydesk doc` commands.

use crate::cli::{DocNewArgs, DocShowArgs, DocVersionsArgs};
use crate::context::require_initialized_workspace;
use crate::document::{versions, DocumentFile};
use crate::error::Result;
use crate::events::{append_event, Event, EventAction};
use crate::workspace::{generate_doc_filename, generate_doc_id, validate_filename_safe, DocumentIndex};
use serde_json::json;

/// Execute the `copydesk doc new` command.
pub fn cmd_new(args: DocNewArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let index = DocumentIndex::build(&ctx)?;
    let doc_id = generate_doc_id(index.next_number());
    let filename = generate_doc_filename(&doc_id, &args.title);
    validate_filename_safe(&filename)?;
    let path = ctx.documents_dir().join(&filename);

    let document = DocumentFile::new(&doc_id, &args.title, &args.body);
    document.save(&path)?;

    let event = Event::new(EventAction::DocCreate)
        .with_document(&doc_id)
        .with_details(json!({"title": args.title}));
    append_event(&ctx, &event)?;

    println!("Created {} ({})", doc_id, path.display());
    Ok(())
}

/// Execute the `copydesk doc list` command.
pub fn cmd_list() -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let index = DocumentIndex::build(&ctx)?;

    if index.is_empty() {
        println!("No documents yet. Create one with `copydesk generate` or `copydesk doc new`.");
        return Ok(());
    }

    for info in index.all() {
        let document = DocumentFile::load(&info.path)?;
        let template = document
            .frontmatter
            .template
            .as_deref()
            .unwrap_or("-");
        println!(
            "{}  {:<40} {:<20} {:>6} chars",
            info.id,
            document.frontmatter.title,
            template,
            document.body.chars().count()
        );
    }

    Ok(())
}

/// Execute the `copydesk doc show` command.
pub fn cmd_show(args: DocShowArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let index = DocumentIndex::build(&ctx)?;
    let info = index.require(&args.doc_id)?;
    let document = DocumentFile::load(&info.path)?;

    println!("{}: {}", document.frontmatter.id, document.frontmatter.title);
    if let Some(template) = &document.frontmatter.template {
        println!("template: {}", template);
    }
    if let Some(created) = document.frontmatter.created {
        println!("created:  {}", created.to_rfc3339());
    }
    if let Some(updated) = document.frontmatter.updated {
        println!("updated:  {}", updated.to_rfc3339());
    }
    if document.frontmatter.versions > 0 {
        println!("versions: {}", document.frontmatter.versions);
    }
    println!();
    println!("{}", document.body);

    Ok(())
}

/// Execute the `copydesk doc versions` command.
pub fn cmd_versions(args: DocVersionsArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let index = DocumentIndex::build(&ctx)?;
    let info = index.require(&args.doc_id)?;

    let snapshots = versions::list(&ctx, &info.id)?;
    if snapshots.is_empty() {
        println!("No version snapshots for {}.", info.id);
        return Ok(());
    }

    for snapshot in snapshots {
        let document = DocumentFile::load(&snapshot.path)?;
        let updated = document
            .frontmatter
            .updated
            .or(document.frontmatter.created)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "v{:<4} {:>6} chars  {}",
            snapshot.number,
            document.body.chars().count(),
            updated
        );
    }

    Ok(())
}
