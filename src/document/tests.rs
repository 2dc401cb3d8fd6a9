//! Document model tests.

use super::*;
use crate::context::WorkspaceContext;
use tempfile::TempDir;

const SAMPLE: &str = r#"---
id: DOC-001
title: Spring launch email
template: email-promo
---

<h2>Spring is here</h2>
<p>Fresh deploys for everyone.</p>
"#;

#[test]
fn parse_extracts_frontmatter_and_body() {
    let doc = DocumentFile::parse(SAMPLE).unwrap();

    assert_eq!(doc.frontmatter.id, "DOC-001");
    assert_eq!(doc.frontmatter.title, "Spring launch email");
    assert_eq!(doc.frontmatter.template.as_deref(), Some("email-promo"));
    assert!(doc.body.starts_with("\n<h2>Spring is here</h2>"));
}

#[test]
fn parse_requires_frontmatter() {
    let result = DocumentFile::parse("<p>no frontmatter</p>");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("---"));
}

#[test]
fn parse_requires_closing_delimiter() {
    let result = DocumentFile::parse("---\nid: DOC-001\ntitle: T\n");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("closing"));
}

#[test]
fn unknown_frontmatter_fields_roundtrip() {
    let content = "---\nid: DOC-001\ntitle: T\nfuture_field: kept\n---\nbody\n";
    let doc = DocumentFile::parse(content).unwrap();

    assert_eq!(
        doc.frontmatter.extra.get("future_field").and_then(|v| v.as_str()),
        Some("kept")
    );

    let serialized = doc.to_string().unwrap();
    assert!(serialized.contains("future_field: kept"));
}

#[test]
fn roundtrip_preserves_body_exactly() {
    let doc = DocumentFile::parse(SAMPLE).unwrap();
    let serialized = doc.to_string().unwrap();
    let reparsed = DocumentFile::parse(&serialized).unwrap();
    assert_eq!(reparsed.body, doc.body);
}

#[test]
fn parse_crlf_line_endings() {
    let content = "---\r\nid: DOC-001\r\ntitle: T\r\n---\r\n<p>body</p>\r\n";
    let doc = DocumentFile::parse(content).unwrap();
    assert_eq!(doc.frontmatter.id, "DOC-001");
    assert_eq!(doc.body, "<p>body</p>\r\n");
}

#[test]
fn save_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("DOC-001-spring.md");

    let doc = DocumentFile::new("DOC-001", "Spring launch", "<p>Hello</p>");
    doc.save(&path).unwrap();

    let loaded = DocumentFile::load(&path).unwrap();
    assert_eq!(loaded.frontmatter.id, "DOC-001");
    assert_eq!(loaded.frontmatter.title, "Spring launch");
    assert_eq!(loaded.body, "<p>Hello</p>");
    assert!(loaded.frontmatter.created.is_some());
}

#[test]
fn replace_range_splices_at_offsets() {
    let mut doc = DocumentFile::new("DOC-001", "T", "0123456789");
    doc.replace_range(SelectionRange::new(2, 5).unwrap(), "ABC").unwrap();
    assert_eq!(doc.body, "01ABC56789");
    assert!(doc.frontmatter.updated.is_some());
}

#[test]
fn replace_range_handles_multibyte() {
    let mut doc = DocumentFile::new("DOC-001", "T", "café latte");
    // Characters 0..4 are "café"
    doc.replace_range(SelectionRange::new(0, 4).unwrap(), "tea").unwrap();
    assert_eq!(doc.body, "tea latte");
}

#[test]
fn replace_range_out_of_bounds_errors() {
    let mut doc = DocumentFile::new("DOC-001", "T", "short");
    let result = doc.replace_range(SelectionRange::new(0, 100).unwrap(), "x");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("exceeds document length"));
}

#[test]
fn replace_whole_range() {
    let mut doc = DocumentFile::new("DOC-001", "T", "<p>old</p>");
    let range = SelectionRange::whole(&doc.body);
    doc.replace_range(range, "<p>new</p>").unwrap();
    assert_eq!(doc.body, "<p>new</p>");
}

#[test]
fn insert_at_offset() {
    let mut doc = DocumentFile::new("DOC-001", "T", "ad");
    doc.insert_at(1, "bc").unwrap();
    assert_eq!(doc.body, "abcd");
}

#[test]
fn selection_range_parse() {
    let range = SelectionRange::parse("3..10").unwrap();
    assert_eq!(range.from, 3);
    assert_eq!(range.to, 10);
    assert_eq!(range.len(), 7);
    assert_eq!(range.to_string(), "3..10");
}

#[test]
fn selection_range_parse_rejects_garbage() {
    assert!(SelectionRange::parse("3-10").is_err());
    assert!(SelectionRange::parse("a..b").is_err());
    assert!(SelectionRange::parse("10..3").is_err());
}

#[test]
fn selection_range_slice() {
    let range = SelectionRange::new(4, 8).unwrap();
    assert_eq!(range.slice("the quick fox").unwrap(), "quic");
}

#[test]
fn version_snapshot_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = WorkspaceContext::resolve_from(temp_dir.path());
    std::fs::create_dir_all(&ctx.workspace_dir).unwrap();

    let doc = DocumentFile::new("DOC-001", "T", "<p>v1 body</p>");

    let n1 = versions::snapshot(&ctx, &doc).unwrap();
    let n2 = versions::snapshot(&ctx, &doc).unwrap();
    assert_eq!(n1, 1);
    assert_eq!(n2, 2);

    let listed = versions::list(&ctx, "DOC-001").unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].number, 1);
    assert_eq!(listed[1].number, 2);

    let snapshot_doc = DocumentFile::load(&listed[0].path).unwrap();
    assert_eq!(snapshot_doc.body, "<p>v1 body</p>");
}

#[test]
fn version_list_empty_for_unknown_doc() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = WorkspaceContext::resolve_from(temp_dir.path());
    assert!(versions::list(&ctx, "DOC-999").unwrap().is_empty());
}

#[test]
fn record_version_increments_counter() {
    let mut doc = DocumentFile::new("DOC-001", "T", "");
    assert_eq!(doc.record_version(), 1);
    assert_eq!(doc.record_version(), 2);
    assert_eq!(doc.frontmatter.versions, 2);
}
