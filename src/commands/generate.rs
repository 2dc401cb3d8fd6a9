//! Implementation of the `copydesk generate` command.
//!
//! The full pipeline: catalog lookup, form validation, value resolution,
//! prompt assembly, generation request, content formatting, and document
//! write. The request runs under the `generate` lock and a session token so
//! a superseded invocation can never write its result.

use crate::catalog::{self, TemplateCategory};
use crate::cli::GenerateArgs;
use crate::client::{ApiClient, GenerateRequest};
use crate::config::Config;
use crate::context::{require_initialized_workspace, WorkspaceContext};
use crate::document::{versions, DocumentFile};
use crate::error::Result;
use crate::events::{append_event, Event, EventAction};
use crate::form::{self, FormData};
use crate::locks;
use crate::prompt;
use crate::session::{GenerationRecord, SessionState};
use crate::voice::{BrandVoice, Persona};
use crate::workspace::{generate_doc_filename, generate_doc_id, validate_filename_safe, DocumentIndex};
use chrono::Utc;
use serde_json::json;

/// Execute the `copydesk generate` command.
pub fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let config = Config::load(ctx.config_path()).unwrap_or_default();

    let template = catalog::find(&args.template_id)?;

    let form = FormData::from_pairs(&args.fields)?;
    let errors = form::validate(template, &form);
    if !errors.is_empty() {
        eprintln!("Form validation failed for '{}':", template.id);
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(form::into_validation_error(&errors));
    }

    let resolved = form::resolve(template, &form);

    let brand_voice = if args.brand_voice {
        Some(BrandVoice::require(&ctx)?)
    } else {
        None
    };
    let persona = args
        .persona
        .as_deref()
        .map(|name| Persona::load(&ctx, name))
        .transpose()?;

    let prompt = prompt::assemble(template, &resolved, brand_voice.as_ref(), persona.as_ref())?;

    if args.show_prompt {
        println!("{}", prompt);
        return Ok(());
    }

    // Resolve the destination before the request so failures surface early
    let destination = resolve_destination(&ctx, template.name, &args)?;

    // One generation in flight at a time
    let _lock = locks::acquire_request_lock(&ctx, "generate")?;

    let mut session = SessionState::load(&ctx)?;
    let (slice, token) = std::mem::take(&mut session.generation).begin();
    session.generation = slice;
    session.save(&ctx)?;

    println!(
        "Generating with '{}' against {} ...",
        template.id,
        config.effective_api_base_url()
    );

    let client = ApiClient::new(&config);
    let request = GenerateRequest {
        template_id: template.id,
        form_data: &resolved,
        prompt: &prompt,
        brand_voice: brand_voice.as_ref(),
        persona: persona.as_ref(),
    };

    let raw = match client.generate(&request) {
        Ok(raw) => raw,
        Err(e) => {
            let mut fresh = SessionState::load(&ctx)?;
            let (slice, _) = std::mem::take(&mut fresh.generation).fail(token, e.to_string());
            fresh.generation = slice;
            fresh.save(&ctx)?;
            return Err(e);
        }
    };

    let email_mode = template.category == TemplateCategory::Email;
    let html = crate::format::format_generated_html(&raw, email_mode);

    // Reload before resolving: a superseded token must not write anything
    let mut fresh = SessionState::load(&ctx)?;
    let record = GenerationRecord {
        template_id: template.id.to_string(),
        doc_id: destination.doc_id().to_string(),
        chars: html.chars().count(),
        generated_at: Utc::now(),
    };
    let (slice, applied) = std::mem::take(&mut fresh.generation).resolve(token, record);
    fresh.generation = slice;

    if !applied {
        eprintln!("Warning: this generation was superseded; discarding its result.");
        return Ok(());
    }

    let snapshot = write_destination(&ctx, destination, template.id, &html)?;
    fresh.save(&ctx)?;

    let event = Event::new(EventAction::Generate)
        .with_document(&snapshot.doc_id)
        .with_details(json!({
            "template": template.id,
            "chars": html.chars().count(),
            "brand_voice": brand_voice.is_some(),
            "persona": persona.as_ref().map(|p| p.name.clone()),
            "replaced_existing": snapshot.replaced_existing,
        }));
    append_event(&ctx, &event)?;

    println!(
        "Wrote {} characters to {}{}",
        html.chars().count(),
        snapshot.doc_id,
        match snapshot.snapshot_version {
            Some(v) => format!(" (previous content saved as v{})", v),
            None => String::new(),
        }
    );

    Ok(())
}

/// Where the generated copy will land.
enum Destination {
    New {
        doc_id: String,
        title: String,
    },
    Existing {
        doc_id: String,
        path: std::path::PathBuf,
    },
}

impl Destination {
    fn doc_id(&self) -> &str {
        match self {
            Destination::New { doc_id, .. } => doc_id,
            Destination::Existing { doc_id, .. } => doc_id,
        }
    }
}

struct WriteSummary {
    doc_id: String,
    snapshot_version: Option<u32>,
    replaced_existing: bool,
}

/// Pick the destination document: an existing one (`--into`) or a new ID.
fn resolve_destination(
    ctx: &WorkspaceContext,
    template_name: &str,
    args: &GenerateArgs,
) -> Result<Destination> {
    let index = DocumentIndex::build(ctx)?;

    if let Some(doc_id) = &args.into {
        let info = index.require(doc_id)?;
        return Ok(Destination::Existing {
            doc_id: info.id.clone(),
            path: info.path.clone(),
        });
    }

    let doc_id = generate_doc_id(index.next_number());
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| template_name.to_string());
    Ok(Destination::New { doc_id, title })
}

/// Write the formatted copy to its destination.
///
/// Replacing an existing document snapshots it first (best effort).
fn write_destination(
    ctx: &WorkspaceContext,
    destination: Destination,
    template_id: &str,
    html: &str,
) -> Result<WriteSummary> {
    match destination {
        Destination::New { doc_id, title } => {
            let filename = generate_doc_filename(&doc_id, &title);
            validate_filename_safe(&filename)?;
            let path = ctx.documents_dir().join(&filename);

            let mut document = DocumentFile::new(&doc_id, &title, html);
            document.frontmatter.template = Some(template_id.to_string());
            document.save(&path)?;

            Ok(WriteSummary {
                doc_id,
                snapshot_version: None,
                replaced_existing: false,
            })
        }
        Destination::Existing { doc_id, path } => {
            let mut document = DocumentFile::load(&path)?;

            let snapshot_version = match versions::snapshot(ctx, &document) {
                Ok(number) => {
                    document.record_version();
                    Some(number)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: failed to snapshot {} before replacement: {}",
                        doc_id, e
                    );
                    None
                }
            };

            document.set_body(html);
            document.frontmatter.template = Some(template_id.to_string());
            document.save(&path)?;

            Ok(WriteSummary {
                doc_id,
                snapshot_version,
                replaced_existing: true,
            })
        }
    }
}
