//! Workspace operations and document index for copydesk.
//!
//! This module provides:
//! - Document index: enumerate the documents directory and map IDs to paths
//! - Document ID validation and generation
//! - Title slugification for document filenames

use crate::context::WorkspaceContext;
use crate::error::{CopydeskError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

/// Regex pattern for valid document IDs.
static DOC_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DOC-\d{3,}$").expect("invalid document ID regex"));

/// Regex for extracting the ID prefix from a document filename.
static DOC_FILENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(DOC-\d{3,})(?:-.*)?\.md$").expect("invalid filename regex"));

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("invalid slug regex"));

/// Information about a document in the workspace.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    /// The document ID (e.g., "DOC-001").
    pub id: String,

    /// The full path to the document file.
    pub path: PathBuf,

    /// The numeric part of the document ID.
    pub number: u32,
}

/// Index of all documents in the workspace.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    /// Map of document ID to document info.
    documents: HashMap<String, DocumentInfo>,

    /// Maximum document number seen (for generating new IDs).
    max_number: u32,
}

impl DocumentIndex {
    /// Build a document index by scanning the documents directory.
    ///
    /// Files matching the pattern `DOC-{id}-{slug}.md` are indexed; other
    /// files are ignored.
    pub fn build(ctx: &WorkspaceContext) -> Result<Self> {
        let mut index = DocumentIndex::default();

        let documents_dir = ctx.documents_dir();
        if !documents_dir.exists() {
            return Ok(index);
        }

        let entries = fs::read_dir(&documents_dir).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read documents directory '{}': {}",
                documents_dir.display(),
                e
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                CopydeskError::UserError(format!("failed to read directory entry: {}", e))
            })?;
            let path = entry.path();

            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(captures) = DOC_FILENAME_REGEX.captures(filename) else {
                continue;
            };

            let id = captures[1].to_string();
            let number: u32 = id[4..].parse().unwrap_or(0);

            index.max_number = index.max_number.max(number);
            index.documents.insert(
                id.clone(),
                DocumentInfo { id, path, number },
            );
        }

        Ok(index)
    }

    /// Look up a document by ID.
    pub fn get(&self, id: &str) -> Option<&DocumentInfo> {
        self.documents.get(id)
    }

    /// Look up a document by ID, erroring with guidance when unknown.
    pub fn require(&self, id: &str) -> Result<&DocumentInfo> {
        self.get(id).ok_or_else(|| {
            CopydeskError::UserError(format!(
                "unknown document '{}'.\nRun `copydesk doc list` to see documents.",
                id
            ))
        })
    }

    /// All documents, sorted by number.
    pub fn all(&self) -> Vec<&DocumentInfo> {
        let mut docs: Vec<&DocumentInfo> = self.documents.values().collect();
        docs.sort_by_key(|d| d.number);
        docs
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The next available document number.
    pub fn next_number(&self) -> u32 {
        self.max_number + 1
    }
}

/// Validate a document ID format.
pub fn is_valid_doc_id(id: &str) -> bool {
    DOC_ID_REGEX.is_match(id)
}

/// Generate a document ID from a number (e.g., 1 -> "DOC-001").
pub fn generate_doc_id(number: u32) -> String {
    format!("DOC-{:03}", number)
}

/// Generate a document filename from an ID and title.
///
/// The title is slugified and truncated so filenames stay manageable.
pub fn generate_doc_filename(id: &str, title: &str) -> String {
    let slug = slugify(title);
    let slug: String = slug.chars().take(48).collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        format!("{}.md", id)
    } else {
        format!("{}-{}.md", id, slug)
    }
}

/// Slugify a name for use in filenames.
///
/// Lowercases, replaces non-alphanumeric runs with `-`, and trims dashes.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lower, "-");
    slug.trim_matches('-').to_string()
}

/// Validate that a generated filename contains no path separators.
pub fn validate_filename_safe(filename: &str) -> Result<()> {
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(CopydeskError::UserError(format!(
            "unsafe filename generated: '{}'",
            filename
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_ctx() -> (TempDir, WorkspaceContext) {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path());
        fs::create_dir_all(ctx.documents_dir()).unwrap();
        (temp_dir, ctx)
    }

    #[test]
    fn doc_id_validation() {
        assert!(is_valid_doc_id("DOC-001"));
        assert!(is_valid_doc_id("DOC-1234"));
        assert!(!is_valid_doc_id("DOC-01"));
        assert!(!is_valid_doc_id("doc-001"));
        assert!(!is_valid_doc_id("TASK-001"));
        assert!(!is_valid_doc_id("DOC-001-extra"));
    }

    #[test]
    fn generate_doc_id_pads_to_three_digits() {
        assert_eq!(generate_doc_id(1), "DOC-001");
        assert_eq!(generate_doc_id(42), "DOC-042");
        assert_eq!(generate_doc_id(1234), "DOC-1234");
    }

    #[test]
    fn generate_filename_slugifies_title() {
        assert_eq!(
            generate_doc_filename("DOC-001", "Spring Launch Email"),
            "DOC-001-spring-launch-email.md"
        );
    }

    #[test]
    fn generate_filename_handles_empty_slug() {
        assert_eq!(generate_doc_filename("DOC-001", "!!!"), "DOC-001.md");
    }

    #[test]
    fn generate_filename_truncates_long_titles() {
        let title = "a".repeat(200);
        let filename = generate_doc_filename("DOC-001", &title);
        assert!(filename.len() < 70);
        assert!(filename.ends_with(".md"));
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Spring Launch!"), "spring-launch");
        assert_eq!(slugify("  CTO  Carl  "), "cto-carl");
        assert_eq!(slugify("a --- b"), "a-b");
    }

    #[test]
    fn filename_safety() {
        assert!(validate_filename_safe("DOC-001-launch.md").is_ok());
        assert!(validate_filename_safe("../evil.md").is_err());
        assert!(validate_filename_safe("a/b.md").is_err());
    }

    #[test]
    fn index_empty_directory() {
        let (_tmp, ctx) = test_ctx();
        let index = DocumentIndex::build(&ctx).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.next_number(), 1);
    }

    #[test]
    fn index_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path());
        let index = DocumentIndex::build(&ctx).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn index_scans_documents() {
        let (_tmp, ctx) = test_ctx();
        fs::write(ctx.documents_dir().join("DOC-001-launch.md"), "---\nid: DOC-001\ntitle: L\n---\n").unwrap();
        fs::write(ctx.documents_dir().join("DOC-003-promo.md"), "---\nid: DOC-003\ntitle: P\n---\n").unwrap();
        fs::write(ctx.documents_dir().join("notes.txt"), "ignored").unwrap();

        let index = DocumentIndex::build(&ctx).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.get("DOC-001").is_some());
        assert!(index.get("DOC-002").is_none());
        assert_eq!(index.next_number(), 4);

        let ids: Vec<&str> = index.all().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["DOC-001", "DOC-003"]);
    }

    #[test]
    fn index_accepts_id_only_filenames() {
        let (_tmp, ctx) = test_ctx();
        fs::write(ctx.documents_dir().join("DOC-007.md"), "---\nid: DOC-007\ntitle: S\n---\n").unwrap();

        let index = DocumentIndex::build(&ctx).unwrap();
        assert!(index.get("DOC-007").is_some());
    }

    #[test]
    fn require_unknown_document_errors() {
        let (_tmp, ctx) = test_ctx();
        let index = DocumentIndex::build(&ctx).unwrap();
        let err = index.require("DOC-999").unwrap_err();
        assert!(err.to_string().contains("DOC-999"));
        assert!(err.to_string().contains("doc list"));
    }
}
