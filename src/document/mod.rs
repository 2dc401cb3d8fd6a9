//! Document model for copydesk.
//!
//! Documents are the rich-text artifacts of the workspace: generated or
//! hand-written marketing copy. Each document is a file with YAML
//! frontmatter followed by an HTML body:
//!
//! ```text
//! ---
//! id: DOC-001
//! title: Spring launch email
//! ---
//!
//! <h2>Spring is here</h2>
//! <p>...</p>
//! ```
//!
//! The implementation supports:
//!
//! - Round-trip preservation of unknown YAML fields (forward compatibility)
//! - Exact preservation of body content
//! - Character-offset selection ranges and range splicing

use crate::error::{CopydeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod io;
mod mutations;
mod range;
pub mod versions;

#[cfg(test)]
mod tests;

pub use range::SelectionRange;

/// A parsed document with frontmatter and HTML body.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    /// The parsed frontmatter fields.
    pub frontmatter: DocumentFrontmatter,
    /// The HTML body content (everything after the closing `---`).
    pub body: String,
}

/// Document frontmatter fields.
///
/// Known fields are explicitly typed, while unknown fields are preserved
/// in the `extra` map for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFrontmatter {
    /// Document identifier (e.g., "DOC-001").
    pub id: String,

    /// Document title.
    pub title: String,

    /// Template this document was generated from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Number of version snapshots taken so far.
    #[serde(default)]
    pub versions: u32,

    /// Any fields not explicitly defined above.
    /// Using BTreeMap for deterministic serialization order.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for DocumentFrontmatter {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            template: None,
            created: None,
            updated: None,
            versions: 0,
            extra: BTreeMap::new(),
        }
    }
}

impl DocumentFile {
    /// Create a new document with the given id, title, and body.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            frontmatter: DocumentFrontmatter {
                id: id.into(),
                title: title.into(),
                created: Some(Utc::now()),
                ..Default::default()
            },
            body: body.into(),
        }
    }

    /// Parse a document from its content string.
    ///
    /// The content must have YAML frontmatter delimited by `---` lines,
    /// followed by the body. Both Unix (LF) and Windows (CRLF) line endings
    /// are supported; the body is preserved exactly as-is.
    pub fn parse(content: &str) -> Result<Self> {
        // Normalize line endings for delimiter detection, preserve original for body
        let normalized = content.replace("\r\n", "\n");

        let (frontmatter_yaml, body_start) = Self::extract_frontmatter(&normalized, content)?;

        let frontmatter: DocumentFrontmatter =
            serde_yaml::from_str(&frontmatter_yaml).map_err(|e| {
                CopydeskError::UserError(format!("failed to parse document frontmatter: {}", e))
            })?;

        let body = if body_start < content.len() {
            content[body_start..].to_string()
        } else {
            String::new()
        };

        Ok(Self { frontmatter, body })
    }

    /// Extract frontmatter YAML and return the byte offset where the body starts.
    fn extract_frontmatter(normalized: &str, original: &str) -> Result<(String, usize)> {
        if !normalized.starts_with("---") {
            return Err(CopydeskError::UserError(
                "document must start with '---' frontmatter delimiter".to_string(),
            ));
        }

        let first_newline = normalized.find('\n').ok_or_else(|| {
            CopydeskError::UserError("document frontmatter is incomplete".to_string())
        })?;

        let rest = &normalized[first_newline + 1..];
        let closing_pos = rest.find("\n---").ok_or_else(|| {
            CopydeskError::UserError(
                "document missing closing '---' frontmatter delimiter".to_string(),
            )
        })?;

        let frontmatter_yaml = rest[..closing_pos].to_string();

        let normalized_body_start = first_newline + 1 + closing_pos + 4; // +4 for "\n---"

        let body_start = Self::find_original_position(original, normalized_body_start);

        // Skip the newline after the closing delimiter if present
        let body_start = if body_start < original.len() {
            let remaining = &original[body_start..];
            if remaining.starts_with("\r\n") {
                body_start + 2
            } else if remaining.starts_with('\n') {
                body_start + 1
            } else {
                body_start
            }
        } else {
            body_start
        };

        Ok((frontmatter_yaml, body_start))
    }

    /// Find the position in original content given a position in normalized content.
    fn find_original_position(original: &str, normalized_pos: usize) -> usize {
        let mut orig_pos = 0;
        let mut norm_pos = 0;
        let orig_bytes = original.as_bytes();

        while norm_pos < normalized_pos && orig_pos < original.len() {
            if orig_pos + 1 < original.len()
                && orig_bytes[orig_pos] == b'\r'
                && orig_bytes[orig_pos + 1] == b'\n'
            {
                // CRLF in original maps to single LF in normalized
                orig_pos += 2;
                norm_pos += 1;
            } else {
                orig_pos += 1;
                norm_pos += 1;
            }
        }

        orig_pos
    }
}
