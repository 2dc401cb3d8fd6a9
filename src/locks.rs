//! Request locking for copydesk.
//!
//! This module enforces at-most-one-in-flight per remote action. Each call to
//! the generation/scoring service holds a lock file under `.copydesk/locks/`
//! named after the action (`generate.lock`, `align.lock`, `optimize.lock`).
//!
//! Lock files are created with **create_new** semantics (exclusive create) so
//! that only one process can run a given action at a time. A double-submit
//! therefore fails fast with a lock error instead of racing the first request.
//!
//! # Lock Metadata
//!
//! Each lock file contains JSON metadata:
//! - `owner`: The owner of the lock (e.g., `user@HOST`)
//! - `pid`: The process ID (optional)
//! - `created_at`: RFC3339 timestamp
//! - `action`: The action being performed (generate/align/optimize)
//!
//! # RAII Guards
//!
//! Locks are managed through RAII guard objects that automatically release
//! the lock when dropped. If deletion fails during drop, a warning is printed
//! but the program does not crash.

use crate::context::WorkspaceContext;
use crate::error::{CopydeskError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lock metadata stored in lock files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockMetadata {
    /// Owner of the lock (e.g., `user@HOST`).
    pub owner: String,

    /// Process ID of the lock holder (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    /// Timestamp when the lock was created (RFC3339).
    pub created_at: DateTime<Utc>,

    /// The action being performed (generate/align/optimize).
    pub action: String,
}

impl LockMetadata {
    /// Create new lock metadata with the current timestamp.
    pub fn new(action: &str) -> Self {
        Self {
            owner: get_owner_string(),
            pid: Some(std::process::id()),
            created_at: Utc::now(),
            action: action.to_string(),
        }
    }

    /// Parse lock metadata from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read lock file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to parse lock file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Serialize lock metadata to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            CopydeskError::UserError(format!("failed to serialize lock metadata: {}", e))
        })
    }

    /// Calculate the age of the lock.
    pub fn age(&self) -> Duration {
        Utc::now().signed_duration_since(self.created_at)
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let age = self.age();
        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes)
        }
    }

    /// Check if the lock is stale based on the given threshold in minutes.
    pub fn is_stale(&self, stale_minutes: u32) -> bool {
        self.age().num_minutes() > stale_minutes as i64
    }
}

/// Get the owner string for lock metadata.
fn get_owner_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// RAII guard for a request lock file.
///
/// When dropped, the lock file is automatically deleted.
/// If deletion fails, a warning is printed but no panic occurs.
#[derive(Debug)]
pub struct LockGuard {
    /// Path to the lock file.
    path: PathBuf,

    /// Whether the lock has been released manually.
    released: bool,
}

impl LockGuard {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Manually release the lock.
    ///
    /// Useful when the lock should be released before the guard goes out of
    /// scope and errors must be handled explicitly.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        fs::remove_file(&self.path).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to release lock '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = fs::remove_file(&self.path)
        {
            eprintln!(
                "Warning: failed to release lock '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Information about an active request lock.
#[derive(Debug, Clone)]
pub struct LockInfo {
    /// The lock file path.
    pub path: PathBuf,

    /// The lock name (e.g., "generate").
    pub name: String,

    /// The lock metadata.
    pub metadata: LockMetadata,

    /// Whether the lock is stale.
    pub is_stale: bool,
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (owner: {}, age: {}{})",
            self.name,
            self.metadata.owner,
            self.metadata.age_string(),
            if self.is_stale { ", STALE" } else { "" }
        )
    }
}

/// Acquire the request lock for a remote action.
///
/// # Returns
///
/// * `Ok(LockGuard)` - Successfully acquired lock with RAII guard
/// * `Err(CopydeskError::LockError)` - Lock already held (exit code 4)
pub fn acquire_request_lock(ctx: &WorkspaceContext, action: &str) -> Result<LockGuard> {
    let metadata = LockMetadata::new(action);
    acquire_lock(&ctx.request_lock_path(action), &metadata)
}

/// Acquire a lock file using create_new semantics.
fn acquire_lock(lock_path: &Path, metadata: &LockMetadata) -> Result<LockGuard> {
    // Ensure the locks directory exists
    if let Some(parent) = lock_path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to create locks directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(lock_path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                // Read the existing lock metadata for a helpful error message
                let existing_info = match LockMetadata::from_file(lock_path) {
                    Ok(meta) => format!(
                        "\nLock: {} (created {} ago by {})\nAction: {}",
                        lock_path.display(),
                        meta.age_string(),
                        meta.owner,
                        meta.action
                    ),
                    Err(_) => format!("\nLock: {}", lock_path.display()),
                };
                CopydeskError::LockError(format!(
                    "a request is already in flight{}\n\n\
                     If the previous run crashed, clear it with \
                     `copydesk lock clear <action> --force`.",
                    existing_info
                ))
            } else {
                CopydeskError::LockError(format!(
                    "failed to acquire lock '{}': {}",
                    lock_path.display(),
                    e
                ))
            }
        })?;

    let json = metadata.to_json()?;
    file.write_all(json.as_bytes()).map_err(|e| {
        let _ = fs::remove_file(lock_path);
        CopydeskError::LockError(format!("failed to write lock metadata: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(lock_path);
        CopydeskError::LockError(format!("failed to sync lock file: {}", e))
    })?;

    Ok(LockGuard::new(lock_path.to_path_buf()))
}

/// List all active request locks.
pub fn list_locks(ctx: &WorkspaceContext, stale_minutes: u32) -> Result<Vec<LockInfo>> {
    let locks_dir = ctx.locks_dir();
    if !locks_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&locks_dir).map_err(|e| {
        CopydeskError::UserError(format!(
            "failed to read locks directory '{}': {}",
            locks_dir.display(),
            e
        ))
    })?;

    let mut locks = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            CopydeskError::UserError(format!("failed to read directory entry: {}", e))
        })?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("lock") {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        // Skip lock files that vanish or fail to parse between listing and read
        let Ok(metadata) = LockMetadata::from_file(&path) else {
            continue;
        };

        let is_stale = metadata.is_stale(stale_minutes);
        locks.push(LockInfo {
            path,
            name,
            metadata,
            is_stale,
        });
    }

    locks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(locks)
}

/// Clear a lock file by action name.
pub fn clear_lock(ctx: &WorkspaceContext, action: &str) -> Result<()> {
    let path = ctx.request_lock_path(action);
    if !path.exists() {
        return Err(CopydeskError::UserError(format!(
            "no lock found for action '{}'",
            action
        )));
    }
    fs::remove_file(&path).map_err(|e| {
        CopydeskError::UserError(format!(
            "failed to remove lock '{}': {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_ctx() -> (TempDir, WorkspaceContext) {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WorkspaceContext::resolve_from(temp_dir.path());
        fs::create_dir_all(&ctx.workspace_dir).unwrap();
        (temp_dir, ctx)
    }

    #[test]
    fn acquire_and_release_on_drop() {
        let (_tmp, ctx) = test_ctx();
        let lock_path = ctx.request_lock_path("generate");

        {
            let _guard = acquire_request_lock(&ctx, "generate").unwrap();
            assert!(lock_path.exists());
        }

        assert!(!lock_path.exists());
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let (_tmp, ctx) = test_ctx();

        let _guard = acquire_request_lock(&ctx, "generate").unwrap();
        let result = acquire_request_lock(&ctx, "generate");

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, CopydeskError::LockError(_)));
        assert!(err.to_string().contains("already in flight"));
    }

    #[test]
    fn different_actions_do_not_conflict() {
        let (_tmp, ctx) = test_ctx();

        let _g1 = acquire_request_lock(&ctx, "generate").unwrap();
        let g2 = acquire_request_lock(&ctx, "align");
        assert!(g2.is_ok());
    }

    #[test]
    fn manual_release() {
        let (_tmp, ctx) = test_ctx();
        let lock_path = ctx.request_lock_path("optimize");

        let guard = acquire_request_lock(&ctx, "optimize").unwrap();
        assert!(lock_path.exists());
        guard.release().unwrap();
        assert!(!lock_path.exists());
    }

    #[test]
    fn lock_metadata_contents() {
        let (_tmp, ctx) = test_ctx();

        let _guard = acquire_request_lock(&ctx, "generate").unwrap();
        let metadata = LockMetadata::from_file(ctx.request_lock_path("generate")).unwrap();

        assert_eq!(metadata.action, "generate");
        assert!(metadata.owner.contains('@'));
        assert_eq!(metadata.pid, Some(std::process::id()));
        assert!(!metadata.is_stale(30));
    }

    #[test]
    fn stale_detection() {
        let metadata = LockMetadata {
            owner: "user@host".to_string(),
            pid: None,
            created_at: Utc::now() - Duration::minutes(45),
            action: "generate".to_string(),
        };
        assert!(metadata.is_stale(30));
        assert!(!metadata.is_stale(60));
    }

    #[test]
    fn list_locks_reports_active() {
        let (_tmp, ctx) = test_ctx();

        let _g1 = acquire_request_lock(&ctx, "generate").unwrap();
        let _g2 = acquire_request_lock(&ctx, "align").unwrap();

        let locks = list_locks(&ctx, 30).unwrap();
        let names: Vec<&str> = locks.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["align", "generate"]);
    }

    #[test]
    fn list_locks_empty_when_no_dir() {
        let (_tmp, ctx) = test_ctx();
        let locks = list_locks(&ctx, 30).unwrap();
        assert!(locks.is_empty());
    }

    #[test]
    fn clear_lock_removes_file() {
        let (_tmp, ctx) = test_ctx();

        let guard = acquire_request_lock(&ctx, "generate").unwrap();
        // Keep the file around after the guard would drop
        std::mem::forget(guard);

        clear_lock(&ctx, "generate").unwrap();
        assert!(!ctx.request_lock_path("generate").exists());
    }

    #[test]
    fn clear_missing_lock_is_user_error() {
        let (_tmp, ctx) = test_ctx();
        let result = clear_lock(&ctx, "generate");
        assert!(matches!(result, Err(CopydeskError::UserError(_))));
    }

    #[test]
    fn lock_info_display() {
        let info = LockInfo {
            path: PathBuf::from("/tmp/generate.lock"),
            name: "generate".to_string(),
            metadata: LockMetadata::new("generate"),
            is_stale: false,
        };
        let text = info.to_string();
        assert!(text.starts_with("generate (owner: "));
        assert!(!text.contains("STALE"));
    }
}
