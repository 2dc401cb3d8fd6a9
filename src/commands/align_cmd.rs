//! Implementation of the `copydesk align` commands.
//!
//! `align run` extracts the selected text, calls the scoring endpoint, and
//! stores an alignment record keyed to the exact analyzed text. `align show`
//! and `align clear` inspect and reset the stored result.

use crate::align::{AlignmentFeedback, AlignmentKind, AlignmentRecord, AlignmentTarget, TargetSpec};
use crate::cli::AlignRunArgs;
use crate::client::ApiClient;
use crate::config::Config;
use crate::context::require_initialized_workspace;
use crate::document::{DocumentFile, SelectionRange};
use crate::error::{CopydeskError, Result};
use crate::events::{append_event, Event, EventAction};
use crate::format::html_to_text;
use crate::locks;
use crate::session::{SessionState, SliceState};
use crate::voice::{BrandVoice, Persona};
use crate::workspace::DocumentIndex;
use chrono::Utc;
use serde_json::json;

/// Execute the `copydesk align run` command.
pub fn cmd_run(args: AlignRunArgs) -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let config = Config::load(ctx.config_path()).unwrap_or_default();

    let index = DocumentIndex::build(&ctx)?;
    let info = index.require(&args.doc_id)?;
    let document = DocumentFile::load(&info.path)?;

    let range = match args.range.as_deref() {
        Some(raw) => SelectionRange::parse(raw)?,
        None => SelectionRange::whole(&document.body),
    };
    let selection_html = range.slice(&document.body)?;
    let analyzed_text = html_to_text(selection_html);

    if analyzed_text.trim().is_empty() {
        return Err(CopydeskError::UserError(format!(
            "selection {} of {} contains no text to analyze",
            range, info.id
        )));
    }

    let spec = AlignmentTarget::parse(&args.against)?;
    let loaded = match spec {
        TargetSpec::Brand => LoadedTarget::Brand(BrandVoice::require(&ctx)?),
        TargetSpec::Persona(name) => LoadedTarget::Persona(Persona::load(&ctx, &name)?),
    };
    let target = loaded.target();

    // One alignment check in flight at a time
    let _lock = locks::acquire_request_lock(&ctx, "align")?;

    let mut session = SessionState::load(&ctx)?;
    let prior = session.alignment.value().cloned();
    let (slice, token) = std::mem::take(&mut session.alignment).begin();
    session.alignment = slice;
    session.save(&ctx)?;

    println!("Checking {} against {} ...", info.id, target);

    let client = ApiClient::new(&config);
    let result = match &loaded {
        LoadedTarget::Brand(voice) => client.check_brand_alignment(&analyzed_text, voice),
        LoadedTarget::Persona(persona) => client.check_persona_resonance(&analyzed_text, persona),
    };

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            let mut fresh = SessionState::load(&ctx)?;
            let (mut slice, applied) =
                std::mem::take(&mut fresh.alignment).fail(token, e.to_string());
            // A failed check surfaces its message but leaves the prior
            // result intact until it is explicitly cleared or replaced.
            if applied && let Some(prior_record) = prior {
                slice.state = SliceState::Ready {
                    value: prior_record,
                };
            }
            fresh.alignment = slice;
            fresh.save(&ctx)?;
            return Err(e);
        }
    };

    let record = AlignmentRecord {
        doc_id: info.id.clone(),
        range,
        analyzed_text,
        target: target.clone(),
        result,
        checked_at: Utc::now(),
    };

    let mut fresh = SessionState::load(&ctx)?;
    let (slice, applied) = std::mem::take(&mut fresh.alignment).resolve(token, record.clone());
    fresh.alignment = slice;

    if !applied {
        eprintln!("Warning: this alignment check was superseded; discarding its result.");
        return Ok(());
    }
    fresh.save(&ctx)?;

    let event = Event::new(EventAction::Align)
        .with_document(&record.doc_id)
        .with_details(json!({
            "target_kind": record.target.kind.as_str(),
            "target_name": record.target.name,
            "score": record.result.score,
            "range": record.range.to_string(),
        }));
    append_event(&ctx, &event)?;

    print_record(&record);
    Ok(())
}

/// The loaded comparison target.
enum LoadedTarget {
    Brand(BrandVoice),
    Persona(Persona),
}

impl LoadedTarget {
    fn target(&self) -> AlignmentTarget {
        match self {
            LoadedTarget::Brand(voice) => AlignmentTarget {
                kind: AlignmentKind::Brand,
                name: voice.brand_name.clone(),
            },
            LoadedTarget::Persona(persona) => AlignmentTarget {
                kind: AlignmentKind::Persona,
                name: persona.name.clone(),
            },
        }
    }
}

/// Execute the `copydesk align show` command.
pub fn cmd_show() -> Result<()> {
    let ctx = require_initialized_workspace()?;
    let session = SessionState::load(&ctx)?;

    if let Some(record) = session.alignment.value() {
        print_record(record);
    } else if let Some(message) = session.alignment.error() {
        println!("Last alignment check failed: {}", message);
    } else if session.alignment.is_loading() {
        println!("An alignment check is recorded as in flight; its result has not arrived.");
    } else {
        println!("No alignment result. Run `copydesk align run <doc-id> --against ...`.");
    }

    Ok(())
}

/// Execute the `copydesk align clear` command.
pub fn cmd_clear() -> Result<()> {
    let ctx = require_initialized_workspace()?;

    let mut session = SessionState::load(&ctx)?;
    let had_result = !session.alignment.is_idle();
    session.alignment = std::mem::take(&mut session.alignment).clear();
    session.save(&ctx)?;

    if had_result {
        append_event(&ctx, &Event::new(EventAction::AlignClear))?;
        println!("Cleared alignment result.");
    } else {
        println!("No alignment result to clear.");
    }

    Ok(())
}

/// Print an alignment record in panel form.
fn print_record(record: &AlignmentRecord) {
    println!(
        "{} · {} · score {}/100",
        record.doc_id, record.target, record.result.score
    );
    println!("{}", record.result.assessment);
    println!();

    match &record.result.feedback {
        AlignmentFeedback::Brand {
            matches,
            violations,
            recommendations,
        } => {
            print_list("Matches", matches);
            print_list("Violations", violations);
            print_list("Recommendations", recommendations);
        }
        AlignmentFeedback::Persona {
            strengths,
            improvements,
            recommendations,
        } => {
            print_list("Strengths", strengths);
            print_list("Improvements", improvements);
            print_list("Recommendations", recommendations);
        }
    }

    let preview: String = record.analyzed_text.chars().take(80).collect();
    let ellipsis = if record.analyzed_text.chars().count() > 80 {
        "…"
    } else {
        ""
    };
    println!("analyzed ({}): {}{}", record.range, preview, ellipsis);
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{}:", title);
    for item in items {
        println!("  - {}", item);
    }
    println!();
}
