//! Event logging subsystem for copydesk.
//!
//! This module implements append-only event logging to support audit and
//! recovery of workspace history. Events are stored in NDJSON format (one
//! JSON object per line) in `.copydesk/events/events.ndjson`.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (init, generate, align, etc.)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `document`: Optional document ID for document-scoped events
//! - `details`: Freeform object with action-specific details
//!
//! # Usage
//!
//! ```no_run
//! use copydesk::events::{Event, EventAction, append_event};
//! use copydesk::context::WorkspaceContext;
//! use serde_json::json;
//!
//! let ctx = WorkspaceContext::resolve()?;
//! let event = Event::new(EventAction::Generate)
//!     .with_document("DOC-001")
//!     .with_details(json!({"template": "email-promo"}));
//! append_event(&ctx, &event)?;
//! # Ok::<(), copydesk::error::CopydeskError>(())
//! ```

use crate::context::WorkspaceContext;
use crate::error::{CopydeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Workspace initialization
    Init,
    /// Copy generated from a template
    Generate,
    /// Alignment check run against a brand voice or persona
    Align,
    /// Alignment result cleared
    AlignClear,
    /// Optimized rewrite requested
    OptimizeRequest,
    /// Optimized rewrite accepted into a document
    OptimizeAccept,
    /// Optimized rewrite rejected
    OptimizeReject,
    /// Document created
    DocCreate,
    /// Document version snapshot written
    DocVersion,
    /// Persona added
    PersonaAdd,
    /// Persona updated
    PersonaUpdate,
    /// Persona removed
    PersonaRemove,
    /// Brand voice set or replaced
    BrandVoiceSet,
    /// Brand voice cleared
    BrandVoiceClear,
    /// Snippet saved
    SnippetSave,
    /// Snippet inserted into a document
    SnippetInsert,
    /// Request lock cleared manually
    LockClear,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventAction::Init => "init",
            EventAction::Generate => "generate",
            EventAction::Align => "align",
            EventAction::AlignClear => "align_clear",
            EventAction::OptimizeRequest => "optimize_request",
            EventAction::OptimizeAccept => "optimize_accept",
            EventAction::OptimizeReject => "optimize_reject",
            EventAction::DocCreate => "doc_create",
            EventAction::DocVersion => "doc_version",
            EventAction::PersonaAdd => "persona_add",
            EventAction::PersonaUpdate => "persona_update",
            EventAction::PersonaRemove => "persona_remove",
            EventAction::BrandVoiceSet => "brand_voice_set",
            EventAction::BrandVoiceClear => "brand_voice_clear",
            EventAction::SnippetSave => "snippet_save",
            EventAction::SnippetInsert => "snippet_insert",
            EventAction::LockClear => "lock_clear",
        };
        write!(f, "{}", s)
    }
}

/// An event record for the audit log.
///
/// Events are serialized as single-line JSON objects and appended to
/// the events.ndjson file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Optional document ID for document-scoped events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            document: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the document ID for this event.
    pub fn with_document(mut self, doc_id: impl Into<String>) -> Self {
        self.document = Some(doc_id.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            CopydeskError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the events log.
///
/// Appends the event as a single JSON line to the events.ndjson file,
/// creating the file and its directory if needed. The file is synced to
/// disk before returning.
///
/// If JSON serialization fails, this is a user-visible internal error and
/// the caller should not proceed with state transitions.
pub fn append_event(ctx: &WorkspaceContext, event: &Event) -> Result<()> {
    let events_file = ctx.events_file();

    let json_line = event.to_ndjson_line()?;

    let events_dir = ctx.events_dir();
    if !events_dir.exists() {
        fs::create_dir_all(&events_dir).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to create events directory '{}': {}",
                events_dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&events_file)
        .map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        CopydeskError::UserError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        CopydeskError::UserError(format!(
            "failed to sync events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    Ok(())
}

/// Read the last `n` events from the log.
///
/// Returns an empty vector when the log does not exist. Lines that fail to
/// parse are skipped (the log is forward compatible with future fields but
/// may contain truncated lines after a crash).
pub fn tail_events(ctx: &WorkspaceContext, n: usize) -> Result<Vec<Event>> {
    let events_file = ctx.events_file();
    if !events_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&events_file).map_err(|e| {
        CopydeskError::UserError(format!(
            "failed to read events file '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    let mut events: Vec<Event> = content
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect();

    if events.len() > n {
        events.drain(..events.len() - n);
    }
    Ok(events)
}
