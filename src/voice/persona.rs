//! Persona model and file store.

use super::slugify;
use crate::context::WorkspaceContext;
use crate::error::{CopydeskError, Result};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A project-scoped audience profile.
///
/// Used the same way as a brand voice in generation and alignment, but
/// targeting audience resonance instead of brand consistency. A workspace
/// may hold many personas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Persona name (e.g., "Data-Driven Dana").
    pub name: String,

    /// Optional photo reference (path or URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Demographics summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<String>,

    /// Psychographics summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psychographics: Option<String>,

    /// Pain points this persona experiences.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pain_points: Vec<String>,

    /// Phrases and vocabulary this persona uses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub language_patterns: Vec<String>,

    /// What this persona is trying to achieve.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,

    /// When this persona was created.
    pub created_at: DateTime<Utc>,

    /// When this persona was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Persona {
    /// The filename slug for this persona.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// The file path for this persona in the given workspace.
    pub fn path(&self, ctx: &WorkspaceContext) -> PathBuf {
        persona_path(ctx, &self.name)
    }

    /// Atomically save this persona.
    pub fn save(&self, ctx: &WorkspaceContext) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CopydeskError::UserError(format!("failed to serialize persona: {}", e)))?;
        atomic_write_file(self.path(ctx), &yaml)
    }

    /// Load a persona by name.
    ///
    /// Matching is by slug, so `load` accepts the display name or the slug.
    pub fn load(ctx: &WorkspaceContext, name: &str) -> Result<Self> {
        let path = persona_path(ctx, name);
        if !path.exists() {
            return Err(CopydeskError::UserError(format!(
                "unknown persona '{}'.\nRun `copydesk persona list` to see saved personas.",
                name
            )));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read persona '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to parse persona '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Whether a persona with this name already exists.
    pub fn exists(ctx: &WorkspaceContext, name: &str) -> bool {
        persona_path(ctx, name).exists()
    }

    /// Load all personas, sorted by name.
    pub fn load_all(ctx: &WorkspaceContext) -> Result<Vec<Self>> {
        let dir = ctx.personas_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read personas directory '{}': {}",
                dir.display(),
                e
            ))
        })?;

        let mut personas = Vec::new();
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
                    "failed to read persona '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            let persona: Persona = serde_yaml::from_str(&content).map_err(|e| {
                CopydeskError::UserError(format!(
                    "failed to parse persona '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            personas.push(persona);
        }

        personas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(personas)
    }

    /// Remove a persona by name.
    pub fn remove(ctx: &WorkspaceContext, name: &str) -> Result<()> {
        let path = persona_path(ctx, name);
        if !path.exists() {
            return Err(CopydeskError::UserError(format!(
                "unknown persona '{}'.\nRun `copydesk persona list` to see saved personas.",
                name
            )));
        }
        std::fs::remove_file(&path).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to remove persona '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// The file path for a persona name in the given workspace.
fn persona_path(ctx: &WorkspaceContext, name: &str) -> PathBuf {
    ctx.personas_dir().join(format!("{}.yaml", slugify(name)))
}
