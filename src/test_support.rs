//! Shared test fixtures.

use crate::config::Config;
use crate::context::WorkspaceContext;
use crate::fs::atomic_write_file;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Guard that switches the process working directory and restores it on drop.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not
        // thread-safe. Lock it so tests don't race even if a #[serial]
        // annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Guard that points the API client at a test server via the env override.
pub(crate) struct ApiUrlOverride;

impl ApiUrlOverride {
    pub(crate) fn set(url: &str) -> Self {
        unsafe { std::env::set_var(crate::config::API_URL_ENV, url) };
        ApiUrlOverride
    }
}

impl Drop for ApiUrlOverride {
    fn drop(&mut self) {
        unsafe { std::env::remove_var(crate::config::API_URL_ENV) };
    }
}

/// Create a temporary directory with an initialized workspace skeleton.
pub(crate) fn create_test_workspace() -> (TempDir, WorkspaceContext) {
    let temp_dir = TempDir::new().unwrap();
    let ctx = WorkspaceContext::resolve_from(temp_dir.path());

    for dir in [
        ctx.workspace_dir.clone(),
        ctx.documents_dir(),
        ctx.personas_dir(),
        ctx.snippets_dir(),
        ctx.events_dir(),
        ctx.locks_dir(),
    ] {
        std::fs::create_dir_all(&dir).unwrap();
    }

    let config = Config::default();
    atomic_write_file(ctx.config_path(), &config.to_yaml().unwrap()).unwrap();

    (temp_dir, ctx)
}
