//! Session store tests.

use super::*;
use tempfile::TempDir;

fn test_ctx() -> (TempDir, WorkspaceContext) {
    let temp_dir = TempDir::new().unwrap();
    let ctx = WorkspaceContext::resolve_from(temp_dir.path());
    std::fs::create_dir_all(&ctx.workspace_dir).unwrap();
    (temp_dir, ctx)
}

fn record(doc_id: &str) -> GenerationRecord {
    GenerationRecord {
        template_id: "email-promo".to_string(),
        doc_id: doc_id.to_string(),
        chars: 420,
        generated_at: Utc::now(),
    }
}

#[test]
fn default_slice_is_idle_with_zero_token() {
    let slice: Slice<GenerationRecord> = Slice::default();
    assert!(slice.is_idle());
    assert_eq!(slice.token, 0);
    assert!(slice.value().is_none());
    assert!(slice.error().is_none());
}

#[test]
fn begin_issues_fresh_token_and_loads() {
    let slice: Slice<GenerationRecord> = Slice::default();
    let (slice, token) = slice.begin();

    assert_eq!(token, 1);
    assert!(slice.is_loading());

    let (slice, token2) = slice.begin();
    assert_eq!(token2, 2);
    assert!(slice.is_loading());
    assert_eq!(slice.token, 2);
}

#[test]
fn resolve_with_current_token_applies() {
    let (slice, token) = Slice::default().begin();
    let (slice, applied) = slice.resolve(token, record("DOC-001"));

    assert!(applied);
    assert_eq!(slice.value().unwrap().doc_id, "DOC-001");
}

#[test]
fn resolve_with_stale_token_is_dropped() {
    let (slice, stale_token) = Slice::default().begin();
    // A second request supersedes the first
    let (slice, fresh_token) = slice.begin();

    let (slice, applied) = slice.resolve(stale_token, record("DOC-OLD"));
    assert!(!applied);
    assert!(slice.is_loading());

    let (slice, applied) = slice.resolve(fresh_token, record("DOC-NEW"));
    assert!(applied);
    assert_eq!(slice.value().unwrap().doc_id, "DOC-NEW");
}

#[test]
fn fail_with_current_token_applies() {
    let (slice, token) = Slice::<GenerationRecord>::default().begin();
    let (slice, applied) = slice.fail(token, "rate limited");

    assert!(applied);
    assert_eq!(slice.error(), Some("rate limited"));
}

#[test]
fn fail_with_stale_token_is_dropped() {
    let (slice, stale) = Slice::<GenerationRecord>::default().begin();
    let (slice, _fresh) = slice.begin();

    let (slice, applied) = slice.fail(stale, "too late");
    assert!(!applied);
    assert!(slice.is_loading());
}

#[test]
fn resolve_after_clear_is_dropped() {
    let (slice, token) = Slice::<GenerationRecord>::default().begin();
    let slice = slice.clear();

    let (slice, applied) = slice.resolve(token, record("DOC-001"));
    assert!(!applied);
    assert!(slice.is_idle());
}

#[test]
fn clear_preserves_token() {
    let (slice, _) = Slice::<GenerationRecord>::default().begin();
    let (slice, _) = slice.begin();
    let cleared = slice.clear();

    assert!(cleared.is_idle());
    assert_eq!(cleared.token, 2);

    // The next begin continues the sequence
    let (_, token) = cleared.begin();
    assert_eq!(token, 3);
}

#[test]
fn resolve_on_ready_slice_is_dropped() {
    let (slice, token) = Slice::default().begin();
    let (slice, _) = slice.resolve(token, record("DOC-001"));

    // A duplicate response with the same token must not overwrite
    let (slice, applied) = slice.resolve(token, record("DOC-DUP"));
    assert!(!applied);
    assert_eq!(slice.value().unwrap().doc_id, "DOC-001");
}

#[test]
fn session_load_defaults_without_file() {
    let (_tmp, ctx) = test_ctx();
    let session = SessionState::load(&ctx).unwrap();
    assert_eq!(session, SessionState::default());
}

#[test]
fn session_save_and_load_roundtrip() {
    let (_tmp, ctx) = test_ctx();

    let mut session = SessionState::default();
    let (slice, token) = std::mem::take(&mut session.generation).begin();
    let (slice, _) = slice.resolve(token, record("DOC-002"));
    session.generation = slice;

    session.save(&ctx).unwrap();

    let loaded = SessionState::load(&ctx).unwrap();
    assert_eq!(loaded.generation.token, 1);
    assert_eq!(loaded.generation.value().unwrap().doc_id, "DOC-002");
    assert!(loaded.alignment.is_idle());
    assert!(loaded.optimize.is_idle());
}

#[test]
fn session_yaml_status_tags_are_snake_case() {
    let (_tmp, ctx) = test_ctx();

    let mut session = SessionState::default();
    let (slice, token) = std::mem::take(&mut session.generation).begin();
    let (slice, _) = slice.fail(token, "rate limited");
    session.generation = slice;
    session.save(&ctx).unwrap();

    let content = std::fs::read_to_string(ctx.session_path()).unwrap();
    assert!(content.contains("status: failed"));
    assert!(content.contains("status: idle"));
    assert!(content.contains("message: rate limited"));
}

#[test]
fn loading_state_survives_persistence() {
    let (_tmp, ctx) = test_ctx();

    let mut session = SessionState::default();
    let (slice, _token) = std::mem::take(&mut session.alignment).begin();
    session.alignment = slice;
    session.save(&ctx).unwrap();

    let loaded = SessionState::load(&ctx).unwrap();
    assert!(loaded.alignment.is_loading());
    assert_eq!(loaded.alignment.token, 1);
}
