//! Alignment checking for copydesk.
//!
//! An alignment check scores a text sample against a brand voice or persona
//! and stores the categorized feedback. The one rule enforced across
//! components: an alignment record always carries the literal text it was
//! computed from (`analyzed_text`), so a later optimize request operates on
//! that text even if the document has since changed.

use crate::document::SelectionRange;
use crate::error::{CopydeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


/// What an alignment check compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentKind {
    /// Brand-voice consistency.
    Brand,
    /// Persona resonance.
    Persona,
}

impl AlignmentKind {
    /// Wire name used in API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentKind::Brand => "brand",
            AlignmentKind::Persona => "persona",
        }
    }
}

impl std::fmt::Display for AlignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The target of an alignment check: kind plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentTarget {
    /// Brand or persona.
    pub kind: AlignmentKind,

    /// Brand name or persona name.
    pub name: String,
}

impl AlignmentTarget {
    /// Parse a `--against` argument: `brand` or `persona:<name>`.
    pub fn parse(s: &str) -> Result<TargetSpec> {
        if s.eq_ignore_ascii_case("brand") {
            return Ok(TargetSpec::Brand);
        }
        if let Some(name) = s.strip_prefix("persona:") {
            let name = name.trim();
            if name.is_empty() {
                return Err(CopydeskError::UserError(
                    "persona target needs a name: persona:<name>".to_string(),
                ));
            }
            return Ok(TargetSpec::Persona(name.to_string()));
        }
        Err(CopydeskError::UserError(format!(
            "invalid alignment target '{}': expected 'brand' or 'persona:<name>'",
            s
        )))
    }
}

impl std::fmt::Display for AlignmentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            AlignmentKind::Brand => write!(f, "brand voice '{}'", self.name),
            AlignmentKind::Persona => write!(f, "persona '{}'", self.name),
        }
    }
}

/// A parsed `--against` argument, before the target entity is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    Brand,
    Persona(String),
}

/// Categorized feedback lists from a scoring endpoint.
///
/// Brand checks return matches/violations; persona checks return
/// strengths/improvements. Both carry recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlignmentFeedback {
    Brand {
        matches: Vec<String>,
        violations: Vec<String>,
        recommendations: Vec<String>,
    },
    Persona {
        strengths: Vec<String>,
        improvements: Vec<String>,
        recommendations: Vec<String>,
    },
}

impl AlignmentFeedback {
    /// The recommendations list, common to both variants.
    pub fn recommendations(&self) -> &[String] {
        match self {
            AlignmentFeedback::Brand { recommendations, .. } => recommendations,
            AlignmentFeedback::Persona { recommendations, .. } => recommendations,
        }
    }
}

/// A scored alignment check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// Score from 0 to 100.
    pub score: u8,

    /// One-paragraph assessment.
    pub assessment: String,

    /// Categorized feedback lists.
    pub feedback: AlignmentFeedback,
}

impl AlignmentResult {
    /// Validate a raw score from the API, rejecting out-of-range values.
    pub fn validate_score(raw: i64) -> Result<u8> {
        if !(0..=100).contains(&raw) {
            return Err(CopydeskError::ApiError(format!(
                "scoring endpoint returned out-of-range score {}",
                raw
            )));
        }
        Ok(raw as u8)
    }
}

/// A stored alignment check, keyed to the exact text analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    /// Document the text came from.
    pub doc_id: String,

    /// Selection range the text came from.
    pub range: SelectionRange,

    /// The literal text that was scored. Optimize operates on this text,
    /// never on the document's current selection.
    pub analyzed_text: String,

    /// What the text was compared against.
    pub target: AlignmentTarget,

    /// The scored result.
    pub result: AlignmentResult,

    /// When the check ran.
    pub checked_at: DateTime<Utc>,
}
