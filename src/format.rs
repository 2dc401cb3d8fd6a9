//! Content formatter for copydesk.
//!
//! Normalizes HTML returned by the generation service before it is stored in
//! a document. Models often wrap output in Markdown code fences or full HTML
//! document shells; neither belongs inside a document body. The formatter
//! also extracts plain text from HTML for alignment scoring.
//!
//! Formatting is idempotent: running it over already-formatted content is a
//! no-op.

use regex::Regex;
use std::sync::LazyLock;

static DOCTYPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<!DOCTYPE[^>]*>").expect("invalid doctype regex"));

static SHELL_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)</?(?:html|body)[^>]*>").expect("invalid shell tag regex")
});

static HEAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head[^>]*>.*?</head>").expect("invalid head regex"));

static STYLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("invalid style regex"));

static EXCESS_NEWLINES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid newline regex"));

static H1_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h1([^>]*)>").expect("invalid h1 regex"));

static H1_CLOSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</h1>").expect("invalid h1 close regex"));

static BLOCK_END_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</p>|</h[1-6]>|</li>|</div>").expect("invalid block end regex")
});

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("invalid tag regex"));

static SPACE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("invalid space run regex"));

/// Normalize generated HTML for document storage.
///
/// - strips Markdown code fences the model may wrap output in
/// - drops `<!DOCTYPE>` declarations and `<html>`/`<head>`/`<body>` shells
/// - collapses runs of three or more newlines and trims the result
/// - in email mode, demotes `<h1>` to `<h2>` and strips `<style>` blocks
pub fn format_generated_html(raw: &str, email_mode: bool) -> String {
    let mut html = strip_code_fence(raw).to_string();

    html = DOCTYPE_REGEX.replace_all(&html, "").into_owned();
    html = HEAD_REGEX.replace_all(&html, "").into_owned();
    html = SHELL_TAG_REGEX.replace_all(&html, "").into_owned();

    if email_mode {
        html = STYLE_REGEX.replace_all(&html, "").into_owned();
        html = H1_OPEN_REGEX.replace_all(&html, "<h2$1>").into_owned();
        html = H1_CLOSE_REGEX.replace_all(&html, "</h2>").into_owned();
    }

    html = EXCESS_NEWLINES_REGEX.replace_all(&html, "\n\n").into_owned();
    html.trim().to_string()
}

/// Strip a wrapping Markdown code fence, if present.
///
/// Handles ``` and ```html fences around the entire payload. Fences inside
/// the content are left alone.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "html") on the opening fence line
    match body.split_once('\n') {
        Some((info, content)) if info.trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            content.trim_matches('\n')
        }
        _ => body.trim_matches('\n'),
    }
}

/// Extract plain text from HTML.
///
/// Block-level closers become newlines, remaining tags are stripped, and the
/// common named entities are decoded. Used to derive the analyzed text for
/// alignment scoring.
pub fn html_to_text(html: &str) -> String {
    let text = BLOCK_END_REGEX.replace_all(html, "\n");
    let text = TAG_REGEX.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = SPACE_RUN_REGEX.replace_all(&text, " ");
    let text = EXCESS_NEWLINES_REGEX.replace_all(&text, "\n\n");

    // Trim trailing spaces per line left behind by tag removal
    let lines: Vec<&str> = text.lines().map(|l| l.trim()).collect();
    lines.join("\n").trim().to_string()
}

/// Decode the common named HTML entities.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
