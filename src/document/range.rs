//! Selection ranges over document bodies.
//!
//! A selection range is a half-open character-offset range `from..to` over a
//! document body, mirroring an editor selection. Offsets count characters,
//! not bytes, so multi-byte content behaves the way a user sees it.

use crate::error::{CopydeskError, Result};
use serde::{Deserialize, Serialize};

/// A half-open character range `from..to` over a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    /// Start offset in characters (inclusive).
    pub from: usize,
    /// End offset in characters (exclusive).
    pub to: usize,
}

impl SelectionRange {
    /// Create a range, validating the ordering.
    pub fn new(from: usize, to: usize) -> Result<Self> {
        if from > to {
            return Err(CopydeskError::UserError(format!(
                "invalid range {}..{}: start exceeds end",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    /// The whole-body range for the given text.
    pub fn whole(text: &str) -> Self {
        Self {
            from: 0,
            to: text.chars().count(),
        }
    }

    /// Parse a `FROM..TO` argument.
    pub fn parse(s: &str) -> Result<Self> {
        let Some((from, to)) = s.split_once("..") else {
            return Err(CopydeskError::UserError(format!(
                "invalid range '{}': expected FROM..TO (character offsets)",
                s
            )));
        };
        let from: usize = from.trim().parse().map_err(|_| {
            CopydeskError::UserError(format!("invalid range start '{}'", from))
        })?;
        let to: usize = to.trim().parse().map_err(|_| {
            CopydeskError::UserError(format!("invalid range end '{}'", to))
        })?;
        Self::new(from, to)
    }

    /// Length of the range in characters.
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    /// Whether the range is empty.
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Validate the range against a text, returning the byte bounds.
    pub fn byte_bounds(&self, text: &str) -> Result<(usize, usize)> {
        let char_count = text.chars().count();
        if self.to > char_count {
            return Err(CopydeskError::UserError(format!(
                "range {}..{} exceeds document length of {} characters",
                self.from, self.to, char_count
            )));
        }

        let mut indices = text.char_indices().map(|(i, _)| i);
        let from_byte = indices.clone().nth(self.from).unwrap_or(text.len());
        let to_byte = indices.nth(self.to).unwrap_or(text.len());
        Ok((from_byte, to_byte))
    }

    /// Extract the selected text.
    pub fn slice<'a>(&self, text: &'a str) -> Result<&'a str> {
        let (from, to) = self.byte_bounds(text)?;
        Ok(&text[from..to])
    }
}

impl std::fmt::Display for SelectionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}
