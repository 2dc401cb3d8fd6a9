//! Brand voice model and file store.

use crate::context::WorkspaceContext;
use crate::error::{CopydeskError, Result};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project-scoped set of tone and vocabulary constraints.
///
/// At most one brand voice exists per workspace: the `brand_voice.yaml` file
/// either exists or it does not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandVoice {
    /// Brand name.
    pub brand_name: String,

    /// Tone description (e.g., "confident but never boastful").
    pub tone: String,

    /// Phrases to use where natural.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approved_phrases: Vec<String>,

    /// Words that must never appear.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden_words: Vec<String>,

    /// Brand values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,

    /// Mission statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,

    /// When this brand voice was saved.
    pub saved_at: DateTime<Utc>,
}

impl BrandVoice {
    /// Load the workspace brand voice, if one is set.
    pub fn load(ctx: &WorkspaceContext) -> Result<Option<Self>> {
        let path = ctx.brand_voice_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read brand voice '{}': {}",
                path.display(),
                e
            ))
        })?;

        let voice: BrandVoice = serde_yaml::from_str(&content).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to parse brand voice '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Some(voice))
    }

    /// Load the workspace brand voice, erroring when none is set.
    pub fn require(ctx: &WorkspaceContext) -> Result<Self> {
        Self::load(ctx)?.ok_or_else(|| {
            CopydeskError::UserError(
                "no brand voice is set for this workspace.\n\
                 Run `copydesk brand-voice set` to create one."
                    .to_string(),
            )
        })
    }

    /// Atomically save this brand voice, replacing any existing one.
    pub fn save(&self, ctx: &WorkspaceContext) -> Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| {
            CopydeskError::UserError(format!("failed to serialize brand voice: {}", e))
        })?;
        atomic_write_file(ctx.brand_voice_path(), &yaml)
    }

    /// Remove the workspace brand voice.
    ///
    /// Returns whether a brand voice existed.
    pub fn clear(ctx: &WorkspaceContext) -> Result<bool> {
        let path = ctx.brand_voice_path();
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to remove brand voice '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(true)
    }
}
