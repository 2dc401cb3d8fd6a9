//! Saved copy snippets.
//!
//! Snippets are named, reusable blocks of copy stored as
//! `.copydesk/snippets/<slug>.yaml`. They are captured from literal text or
//! a document range and inserted into documents at a character offset.

use crate::context::WorkspaceContext;
use crate::error::{CopydeskError, Result};
use crate::fs::atomic_write_file;
use crate::workspace::slugify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A saved snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    /// Snippet name.
    pub name: String,

    /// HTML content.
    pub content: String,

    /// When the snippet was saved.
    pub saved_at: DateTime<Utc>,
}

impl Snippet {
    /// Create a snippet with the current timestamp.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            saved_at: Utc::now(),
        }
    }

    /// The file path for this snippet in the given workspace.
    pub fn path(&self, ctx: &WorkspaceContext) -> PathBuf {
        snippet_path(ctx, &self.name)
    }

    /// Atomically save this snippet, replacing any existing one of the same name.
    pub fn save(&self, ctx: &WorkspaceContext) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CopydeskError::UserError(format!("failed to serialize snippet: {}", e)))?;
        atomic_write_file(self.path(ctx), &yaml)
    }

    /// Load a snippet by name.
    pub fn load(ctx: &WorkspaceContext, name: &str) -> Result<Self> {
        let path = snippet_path(ctx, name);
        if !path.exists() {
            return Err(CopydeskError::UserError(format!(
                "unknown snippet '{}'.\nRun `copydesk snippet list` to see saved snippets.",
                name
            )));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read snippet '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to parse snippet '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load all snippets, sorted by name.
    pub fn load_all(ctx: &WorkspaceContext) -> Result<Vec<Self>> {
        let dir = ctx.snippets_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read snippets directory '{}': {}",
                dir.display(),
                e
            ))
        })?;

        let mut snippets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                CopydeskError::UserError(format!("failed to read directory entry: {}", e))
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }

            let content = std::fs::read_to_string(&path).map_err(|e| {
                CopydeskError::UserError(format!(
                    "failed to read snippet '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            let snippet: Snippet = serde_yaml::from_str(&content).map_err(|e| {
                CopydeskError::UserError(format!(
                    "failed to parse snippet '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            snippets.push(snippet);
        }

        snippets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snippets)
    }
}

/// The file path for a snippet name in the given workspace.
fn snippet_path(ctx: &WorkspaceContext, name: &str) -> PathBuf {
    ctx.snippets_dir().join(format!("{}.yaml", slugify(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_ctx() -> (TempDir, WorkspaceContext) {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path());
        std::fs::create_dir_all(&ctx.workspace_dir).unwrap();
        (temp_dir, ctx)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (_tmp, ctx) = test_ctx();
        Snippet::new("Primary CTA", "<p>Start free</p>").save(&ctx).unwrap();

        let loaded = Snippet::load(&ctx, "Primary CTA").unwrap();
        assert_eq!(loaded.name, "Primary CTA");
        assert_eq!(loaded.content, "<p>Start free</p>");

        // Slug lookup also resolves
        let by_slug = Snippet::load(&ctx, "primary-cta").unwrap();
        assert_eq!(by_slug.content, "<p>Start free</p>");
    }

    #[test]
    fn load_unknown_is_user_error() {
        let (_tmp, ctx) = test_ctx();
        let err = Snippet::load(&ctx, "missing").unwrap_err();
        assert!(err.to_string().contains("snippet list"));
    }

    #[test]
    fn load_all_sorted() {
        let (_tmp, ctx) = test_ctx();
        Snippet::new("zeta", "z").save(&ctx).unwrap();
        Snippet::new("alpha", "a").save(&ctx).unwrap();

        let snippets = Snippet::load_all(&ctx).unwrap();
        let names: Vec<&str> = snippets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn load_all_empty_without_dir() {
        let (_tmp, ctx) = test_ctx();
        assert!(Snippet::load_all(&ctx).unwrap().is_empty());
    }

    #[test]
    fn save_replaces_same_name() {
        let (_tmp, ctx) = test_ctx();
        Snippet::new("cta", "<p>v1</p>").save(&ctx).unwrap();
        Snippet::new("cta", "<p>v2</p>").save(&ctx).unwrap();

        let loaded = Snippet::load(&ctx, "cta").unwrap();
        assert_eq!(loaded.content, "<p>v2</p>");
        assert_eq!(Snippet::load_all(&ctx).unwrap().len(), 1);
    }
}
