//! Optimize-and-compare workflow for copydesk.
//!
//! State machine: `idle -> loading -> result-ready -> {accepted | rejected |
//! edited-then-accepted}`. A run posts the originally analyzed text (never
//! the document's current selection) plus the stored alignment result, and
//! stores the rewritten copy. Accepting splices the rewrite - or a
//! user-edited version of it - into the document at the recorded range,
//! after a best-effort version snapshot. Rejecting discards the result and
//! leaves the document byte-for-byte untouched.

use crate::align::AlignmentTarget;
use crate::context::WorkspaceContext;
use crate::document::{versions, DocumentFile, SelectionRange};
use crate::error::{CopydeskError, Result};
use crate::session::SessionState;
use crate::workspace::DocumentIndex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


/// A stored optimize result awaiting accept/reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRecord {
    /// Document the original text came from.
    pub doc_id: String,

    /// Selection range the original text came from.
    pub range: SelectionRange,

    /// Snapshot of the text that was optimized.
    pub original_text: String,

    /// The rewritten HTML returned by the service.
    pub rewritten_html: String,

    /// Summary of what changed.
    pub changes: Vec<String>,

    /// The brand voice or persona the rewrite targets.
    pub target: AlignmentTarget,

    /// When the rewrite was requested.
    pub requested_at: DateTime<Utc>,
}

/// Outcome of accepting an optimize result.
#[derive(Debug, Clone)]
pub struct AcceptOutcome {
    /// Document that was updated.
    pub doc_id: String,

    /// Version snapshot number, when the snapshot succeeded.
    pub snapshot_version: Option<u32>,

    /// Whether user-edited content was committed instead of the rewrite.
    pub edited: bool,
}

/// Accept the stored optimize result.
///
/// When `edited` is given, the user-edited content is committed instead of
/// the server rewrite. The current document state is snapshotted first;
/// snapshot failure is reported through the returned outcome (and a warning)
/// but does not block the replacement. The optimize slice is cleared on
/// success.
pub fn accept(
    ctx: &WorkspaceContext,
    session: &mut SessionState,
    edited: Option<String>,
) -> Result<AcceptOutcome> {
    let record = session
        .optimize
        .value()
        .cloned()
        .ok_or_else(no_pending_result)?;

    let index = DocumentIndex::build(ctx)?;
    let info = index.require(&record.doc_id)?;
    let mut document = DocumentFile::load(&info.path)?;

    // Best-effort snapshot before the destructive splice
    let snapshot_version = match versions::snapshot(ctx, &document) {
        Ok(number) => {
            document.record_version();
            Some(number)
        }
        Err(e) => {
            eprintln!(
                "Warning: failed to snapshot {} before replacement: {}",
                record.doc_id, e
            );
            None
        }
    };

    let was_edited = edited.is_some();
    let replacement = edited.unwrap_or_else(|| record.rewritten_html.clone());
    document.replace_range(record.range, &replacement)?;
    document.save(&info.path)?;

    session.optimize = std::mem::take(&mut session.optimize).clear();
    session.save(ctx)?;

    Ok(AcceptOutcome {
        doc_id: record.doc_id,
        snapshot_version,
        edited: was_edited,
    })
}

/// Reject the stored optimize result.
///
/// The document is left untouched; only the in-memory result is discarded.
pub fn reject(ctx: &WorkspaceContext, session: &mut SessionState) -> Result<OptimizeRecord> {
    let record = session
        .optimize
        .value()
        .cloned()
        .ok_or_else(no_pending_result)?;

    session.optimize = std::mem::take(&mut session.optimize).clear();
    session.save(ctx)?;

    Ok(record)
}

fn no_pending_result() -> CopydeskError {
    CopydeskError::UserError(
        "no optimize result is pending.\n\
         Run `copydesk optimize run` after an alignment check."
            .to_string(),
    )
}
