//! Implementation of the `copydesk init` command.
//!
//! Creates the `.copydesk/` state directory, subdirectories, and the default
//! configuration file.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::context::WorkspaceContext;
use crate::error::{CopydeskError, Result};
use crate::events::{append_event, Event, EventAction};
use crate::fs::atomic_write_file;
use serde_json::json;
use std::fs;

/// Execute the `copydesk init` command.
pub fn cmd_init(args: InitArgs) -> Result<()> {
    let ctx = WorkspaceContext::resolve()?;

    if ctx.workspace_exists() {
        return Err(CopydeskError::UserError(format!(
            "copydesk workspace already initialized at {}",
            ctx.workspace_dir.display()
        )));
    }

    let project = args
        .project
        .or_else(|| {
            ctx.root
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| "untitled".to_string());

    let config = Config {
        project,
        ..Config::default()
    };
    config.validate()?;

    // Create the workspace skeleton
    for dir in [
        ctx.workspace_dir.clone(),
        ctx.documents_dir(),
        ctx.personas_dir(),
        ctx.snippets_dir(),
        ctx.events_dir(),
        ctx.locks_dir(),
    ] {
        fs::create_dir_all(&dir).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to create directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    atomic_write_file(ctx.config_path(), &config.to_yaml()?)?;

    let event = Event::new(EventAction::Init).with_details(json!({
        "project": config.project,
        "api_base_url": config.api_base_url,
    }));
    append_event(&ctx, &event)?;

    println!("Initialized copydesk workspace for '{}'", config.project);
    println!("  state: {}", ctx.workspace_dir.display());
    println!("  api:   {}", config.api_base_url);
    println!();
    println!("Next steps:");
    println!("  copydesk templates list");
    println!("  copydesk brand-voice set --name <brand> --tone <tone>");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::DirGuard;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn init_creates_workspace_skeleton() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        cmd_init(InitArgs {
            project: Some("acme".to_string()),
        })
        .unwrap();

        let ctx = WorkspaceContext::resolve_from(temp_dir.path());
        assert!(ctx.workspace_exists());
        assert!(ctx.documents_dir().is_dir());
        assert!(ctx.personas_dir().is_dir());
        assert!(ctx.snippets_dir().is_dir());
        assert!(ctx.locks_dir().is_dir());
        assert!(ctx.config_path().is_file());
        assert!(ctx.events_file().is_file());

        let config = Config::load(ctx.config_path()).unwrap();
        assert_eq!(config.project, "acme");
    }

    #[test]
    #[serial]
    fn init_twice_fails() {
        let temp_dir = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp_dir.path());

        cmd_init(InitArgs { project: None }).unwrap();

        let err = cmd_init(InitArgs { project: None }).unwrap_err();
        assert!(err.to_string().contains("already initialized"));
    }

    #[test]
    #[serial]
    fn init_defaults_project_to_directory_name() {
        let temp_dir = TempDir::new().unwrap();
        let project_dir = temp_dir.path().join("spring-campaign");
        std::fs::create_dir_all(&project_dir).unwrap();
        let _guard = DirGuard::new(&project_dir);

        cmd_init(InitArgs { project: None }).unwrap();

        let ctx = WorkspaceContext::resolve_from(&project_dir);
        let config = Config::load(ctx.config_path()).unwrap();
        assert_eq!(config.project, "spring-campaign");
    }
}
