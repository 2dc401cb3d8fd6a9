//! Version snapshots for documents.
//!
//! Snapshots are append-only copies of a document written to
//! `.copydesk/versions/<doc-id>/vN.md` before destructive replacement.
//! Numbering is derived by scanning the snapshot directory, so snapshots
//! survive frontmatter counter drift.

use super::DocumentFile;
use crate::context::WorkspaceContext;
use crate::error::{CopydeskError, Result};
use crate::fs::atomic_write_file;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static VERSION_FILENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v(\d+)\.md$").expect("invalid version filename regex"));

/// A recorded version snapshot.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Version number (1-based).
    pub number: u32,
    /// Snapshot file path.
    pub path: PathBuf,
}

/// Write a snapshot of the document's current state.
///
/// Returns the snapshot version number. Callers treating snapshots as
/// best-effort should log the error and continue rather than propagate it.
pub fn snapshot(ctx: &WorkspaceContext, document: &DocumentFile) -> Result<u32> {
    let doc_id = &document.frontmatter.id;
    let dir = ctx.versions_dir(doc_id);

    let number = next_version_number(ctx, doc_id)?;
    let path = dir.join(format!("v{}.md", number));

    let content = document.to_string()?;
    atomic_write_file(&path, &content)?;

    Ok(number)
}

/// List snapshots for a document, sorted by version number.
pub fn list(ctx: &WorkspaceContext, doc_id: &str) -> Result<Vec<VersionInfo>> {
    let dir = ctx.versions_dir(doc_id);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(&dir).map_err(|e| {
        CopydeskError::UserError(format!(
            "failed to read versions directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            CopydeskError::UserError(format!("failed to read directory entry: {}", e))
        })?;
        let path = entry.path();
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(captures) = VERSION_FILENAME_REGEX.captures(filename) else {
            continue;
        };
        let number: u32 = captures[1].parse().unwrap_or(0);
        versions.push(VersionInfo { number, path });
    }

    versions.sort_by_key(|v| v.number);
    Ok(versions)
}

/// The next available version number for a document.
fn next_version_number(ctx: &WorkspaceContext, doc_id: &str) -> Result<u32> {
    let versions = list(ctx, doc_id)?;
    Ok(versions.last().map(|v| v.number).unwrap_or(0) + 1)
}
