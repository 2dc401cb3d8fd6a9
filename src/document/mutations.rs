//! Mutation helpers for documents.

use super::{DocumentFile, SelectionRange};
use crate::error::Result;
use chrono::Utc;

impl DocumentFile {
    /// Replace the selected range of the body with new content.
    ///
    /// The splice happens at exactly the recorded character offsets; content
    /// before and after the range is untouched. Updates the `updated`
    /// timestamp.
    pub fn replace_range(&mut self, range: SelectionRange, replacement: &str) -> Result<()> {
        let (from, to) = range.byte_bounds(&self.body)?;

        let mut body = String::with_capacity(self.body.len() - (to - from) + replacement.len());
        body.push_str(&self.body[..from]);
        body.push_str(replacement);
        body.push_str(&self.body[to..]);
        self.body = body;

        self.touch();
        Ok(())
    }

    /// Replace the entire body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.touch();
    }

    /// Insert content at a character offset.
    pub fn insert_at(&mut self, offset: usize, content: &str) -> Result<()> {
        self.replace_range(SelectionRange::new(offset, offset)?, content)
    }

    /// Record a version snapshot on the frontmatter counter.
    pub fn record_version(&mut self) -> u32 {
        self.frontmatter.versions += 1;
        self.frontmatter.versions
    }

    /// Set the `updated` timestamp to now.
    pub fn touch(&mut self) {
        self.frontmatter.updated = Some(Utc::now());
    }
}
