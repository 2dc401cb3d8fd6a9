//! Atomic filesystem operations for copydesk.
//!
//! This module provides atomic file write operations that ensure workspace
//! state is never left in a corrupted state due to crashes or interruptions.
//!
//! # Implementation Strategy
//!
//! All atomic writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Atomically replace the original file
//!
//! # Cross-Platform Behavior
//!
//! - **POSIX (Linux, macOS)**: Uses `rename()` which is atomic if source and
//!   destination are on the same filesystem.
//! - **Windows**: Attempts `std::fs::rename()` first, falling back to
//!   `MoveFileExW` with replace semantics for existing files.
//!
//! # Important Notes
//!
//! - Source and destination must be on the same filesystem/volume
//! - On crash, a temporary file may remain (named `.{filename}.tmp`)

use crate::error::{CopydeskError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Atomically write bytes to a file.
///
/// Writes the content to a temporary file, syncs it to disk, and then
/// atomically replaces the target file, so the target is never observed
/// in a partial state.
///
/// # Example
///
/// ```no_run
/// use copydesk::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new("config.yaml"), b"project: demo\n")?;
/// # Ok::<(), copydesk::error::CopydeskError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = generate_temp_path(path)?;

    write_and_sync(&temp_path, content)?;

    atomic_replace(&temp_path, path)?;

    Ok(())
}

/// Atomically write a string to a file.
///
/// Convenience wrapper around `atomic_write` for string content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Generate a temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<std::path::PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CopydeskError::UserError("invalid file path".to_string()))?;

    let temp_name = format!(".{}.tmp", filename);
    Ok(parent.join(temp_name))
}

/// Write content to a file and sync to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        CopydeskError::UserError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        CopydeskError::UserError(format!("failed to write to temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        CopydeskError::UserError(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}

/// Atomically replace the target file with the source file.
#[cfg(unix)]
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    // On POSIX, rename() is atomic and replaces the destination if it exists
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        CopydeskError::UserError(format!(
            "failed to atomically replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    // Sync the parent directory so the directory entry is persisted
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Windows-specific atomic replace implementation.
#[cfg(windows)]
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    use std::os::windows::ffi::OsStrExt;

    // First, try a simple rename (works if target doesn't exist)
    match fs::rename(source, target) {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            // Target exists, fall through to MoveFileExW
        }
        Err(e) => {
            let _ = fs::remove_file(source);
            return Err(CopydeskError::UserError(format!(
                "failed to atomically replace '{}': {}",
                target.display(),
                e
            )));
        }
    }

    unsafe {
        let source_wide: Vec<u16> = source
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();
        let target_wide: Vec<u16> = target
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        const MOVEFILE_REPLACE_EXISTING: u32 = 0x1;
        const MOVEFILE_WRITE_THROUGH: u32 = 0x8;

        #[link(name = "kernel32")]
        unsafe extern "system" {
            fn MoveFileExW(
                lpExistingFileName: *const u16,
                lpNewFileName: *const u16,
                dwFlags: u32,
            ) -> i32;

            fn GetLastError() -> u32;
        }

        let result = MoveFileExW(
            source_wide.as_ptr(),
            target_wide.as_ptr(),
            MOVEFILE_REPLACE_EXISTING | MOVEFILE_WRITE_THROUGH,
        );

        if result == 0 {
            let error_code = GetLastError();
            let _ = fs::remove_file(source);
            return Err(CopydeskError::UserError(format!(
                "failed to atomically replace '{}': Windows error code {}",
                target.display(),
                error_code
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        atomic_write(&file_path, b"hello world").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        fs::write(&file_path, "original content").unwrap();

        atomic_write(&file_path, b"new content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "new content");
    }

    #[test]
    fn atomic_write_file_string() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        atomic_write_file(&file_path, "string content\nwith newlines").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "string content\nwith newlines");
    }

    #[test]
    fn atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("dirs").join("test.txt");

        atomic_write(&file_path, b"nested content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "nested content");
    }

    #[test]
    fn atomic_write_preserves_frontmatter_document() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("doc.md");

        let content = r#"---
id: DOC-001
title: Launch email
---

<p>Body content.</p>
"#;

        atomic_write_file(&file_path, content).unwrap();

        let read_content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(read_content, content);
    }

    #[test]
    fn atomic_write_temp_file_cleanup() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        atomic_write(&file_path, b"content").unwrap();

        // Temp file should be cleaned up (renamed to target)
        let temp_path = temp_dir.path().join(".test.txt.tmp");
        assert!(!temp_path.exists());
    }

    #[test]
    fn generate_temp_path_shape() {
        let target = Path::new("/some/path/file.txt");
        let temp = generate_temp_path(target).unwrap();

        assert_eq!(temp.parent().unwrap(), Path::new("/some/path"));
        assert!(temp.file_name().unwrap().to_str().unwrap().starts_with('.'));
        assert!(
            temp.file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .ends_with(".tmp")
        );
    }

    #[test]
    fn atomic_write_empty_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.txt");

        atomic_write(&file_path, b"").unwrap();

        let content = fs::read(&file_path).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn atomic_write_unicode_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("unicode.txt");

        atomic_write_file(&file_path, "café ☕ 日本語").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "café ☕ 日本語");
    }

    #[test]
    fn atomic_write_concurrent_different_files() {
        let temp_dir = TempDir::new().unwrap();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let path = temp_dir.path().join(format!("file_{}.txt", i));
                let content = format!("content {}", i);
                std::thread::spawn(move || {
                    atomic_write_file(&path, &content).unwrap();
                    (path, content)
                })
            })
            .collect();

        for handle in handles {
            let (path, expected_content) = handle.join().unwrap();
            let actual_content = fs::read_to_string(&path).unwrap();
            assert_eq!(actual_content, expected_content);
        }
    }
}
