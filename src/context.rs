//! Workspace context resolution for copydesk.
//!
//! This module provides the "environment resolution" layer that finds the
//! workspace root from any working directory and resolves the canonical
//! workspace state paths.
//!
//! All copydesk commands must use this module to locate workspace state, so
//! operations always target the same `.copydesk/` directory regardless of
//! where the command is invoked from.

use crate::error::{CopydeskError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Workspace state directory name.
pub const WORKSPACE_DIR: &str = ".copydesk";

/// Resolved paths for the copydesk workspace.
///
/// All paths are absolute.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    /// Absolute path to the directory containing `.copydesk/`.
    pub root: PathBuf,

    /// Absolute path to the workspace state directory (`{root}/.copydesk/`).
    pub workspace_dir: PathBuf,
}

impl WorkspaceContext {
    /// Resolve the workspace context from the current working directory.
    ///
    /// Walks up from the current directory until a `.copydesk/` directory is
    /// found. When none exists, the context anchors to the current directory
    /// (so `init` can create the workspace there).
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            CopydeskError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(&cwd))
    }

    /// Resolve the workspace context from a specific directory.
    ///
    /// This is useful for testing or when the working directory is known.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Self {
        let cwd = cwd.as_ref();

        let root = Self::find_workspace_root(cwd).unwrap_or_else(|| cwd.to_path_buf());
        let workspace_dir = root.join(WORKSPACE_DIR);

        Self { root, workspace_dir }
    }

    /// Walk up from `start` looking for a directory containing `.copydesk/`.
    fn find_workspace_root(start: &Path) -> Option<PathBuf> {
        let mut current = Some(start);
        while let Some(dir) = current {
            if dir.join(WORKSPACE_DIR).is_dir() {
                return Some(dir.to_path_buf());
            }
            current = dir.parent();
        }
        None
    }

    /// Check if the workspace has been initialized.
    pub fn workspace_exists(&self) -> bool {
        self.workspace_dir.is_dir()
    }

    /// Ensure the workspace is initialized, returning an error if not.
    ///
    /// This should be called by all commands except `init` to provide
    /// a helpful error message guiding users to run `copydesk init`.
    pub fn ensure_initialized(&self) -> Result<()> {
        if !self.workspace_exists() {
            return Err(CopydeskError::UserError(format!(
                "copydesk workspace not initialized.\n\
                 Expected workspace directory at: {}\n\n\
                 Run `copydesk init` to initialize a workspace here.",
                self.workspace_dir.display()
            )));
        }
        Ok(())
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.workspace_dir.join("config.yaml")
    }

    /// Get the path to the documents directory.
    pub fn documents_dir(&self) -> PathBuf {
        self.workspace_dir.join("documents")
    }

    /// Get the path to the version snapshots directory for a document.
    pub fn versions_dir(&self, doc_id: &str) -> PathBuf {
        self.workspace_dir.join("versions").join(doc_id)
    }

    /// Get the path to the personas directory.
    pub fn personas_dir(&self) -> PathBuf {
        self.workspace_dir.join("personas")
    }

    /// Get the path to the snippets directory.
    pub fn snippets_dir(&self) -> PathBuf {
        self.workspace_dir.join("snippets")
    }

    /// Get the path to the brand voice file (at most one per workspace).
    pub fn brand_voice_path(&self) -> PathBuf {
        self.workspace_dir.join("brand_voice.yaml")
    }

    /// Get the path to the session state file.
    pub fn session_path(&self) -> PathBuf {
        self.workspace_dir.join("state").join("session.yaml")
    }

    /// Get the path to the events directory.
    pub fn events_dir(&self) -> PathBuf {
        self.workspace_dir.join("events")
    }

    /// Get the path to the main events log file.
    pub fn events_file(&self) -> PathBuf {
        self.events_dir().join("events.ndjson")
    }

    /// Get the path to the locks directory.
    pub fn locks_dir(&self) -> PathBuf {
        self.workspace_dir.join("locks")
    }

    /// Get the path to a request lock file for a named action.
    pub fn request_lock_path(&self, action: &str) -> PathBuf {
        self.locks_dir().join(format!("{}.lock", action))
    }
}

/// Convenience function to resolve context and ensure the workspace exists.
///
/// Use this in most commands (except `init`) to get the workspace context
/// with proper error handling for uninitialized workspaces.
pub fn require_initialized_workspace() -> Result<WorkspaceContext> {
    let ctx = WorkspaceContext::resolve()?;
    ctx.ensure_initialized()?;
    Ok(ctx)
}
