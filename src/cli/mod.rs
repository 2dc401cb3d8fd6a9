//! CLI argument parsing for copydesk.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Copydesk: file-based AI copywriting workspace.
///
/// State lives in a `.copydesk/` directory:
/// - Documents are frontmatter + HTML files with version snapshots
/// - Brand voice and personas steer generation and alignment scoring
/// - An append-only event log records every state change
#[derive(Parser, Debug)]
#[command(name = "copydesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for copydesk.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a copydesk workspace in the current directory.
    ///
    /// Creates the `.copydesk/` state directory and default configuration.
    Init(InitArgs),

    /// Browse the template catalog.
    Templates(TemplatesCommand),

    /// Generate copy from a template.
    ///
    /// Validates field values, assembles the prompt, calls the generation
    /// service, and writes the formatted result to a document.
    Generate(GenerateArgs),

    /// Document management commands.
    Doc(DocCommand),

    /// Check copy alignment against a brand voice or persona.
    Align(AlignCommand),

    /// Request, review, and apply alignment-driven rewrites.
    Optimize(OptimizeCommand),

    /// Persona management commands.
    Persona(PersonaCommand),

    /// Brand voice management commands.
    #[command(name = "brand-voice")]
    BrandVoice(BrandVoiceCommand),

    /// Snippet management commands.
    Snippet(SnippetCommand),

    /// Lock management commands.
    ///
    /// List or clear in-flight request locks.
    Lock(LockCommand),

    /// Show workspace status summary.
    ///
    /// Displays document, persona, and snippet counts, session slice states,
    /// active request locks, and recent events.
    Status(StatusArgs),
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Project name recorded in the workspace config.
    #[arg(long)]
    pub project: Option<String>,
}

/// Template catalog subcommands.
#[derive(Parser, Debug)]
pub struct TemplatesCommand {
    #[command(subcommand)]
    pub action: TemplatesAction,
}

/// Available template catalog actions.
#[derive(Subcommand, Debug)]
pub enum TemplatesAction {
    /// List templates, optionally filtered by category.
    List(TemplatesListArgs),

    /// Show a template's fields and prompt structure.
    Show(TemplatesShowArgs),
}

/// Arguments for the `templates list` command.
#[derive(Parser, Debug)]
pub struct TemplatesListArgs {
    /// Filter by category (website, email, social, strategic, rewrite).
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the `templates show` command.
#[derive(Parser, Debug)]
pub struct TemplatesShowArgs {
    /// Template id (e.g., brand-messaging).
    pub template_id: String,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Template id (e.g., product-description).
    pub template_id: String,

    /// Field values as key=value pairs (repeatable).
    ///
    /// Select fields set to "Other" take a companion value via
    /// `--field <fieldId>_other=...`.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Apply the workspace brand voice to generation.
    #[arg(long)]
    pub brand_voice: bool,

    /// Target a saved persona by name.
    #[arg(long)]
    pub persona: Option<String>,

    /// Title for the new document (defaults to the template name).
    #[arg(long)]
    pub title: Option<String>,

    /// Replace the body of an existing document instead of creating one.
    #[arg(long, value_name = "DOC_ID")]
    pub into: Option<String>,

    /// Print the assembled prompt and exit without calling the API.
    #[arg(long)]
    pub show_prompt: bool,
}

/// Document subcommands.
#[derive(Parser, Debug)]
pub struct DocCommand {
    #[command(subcommand)]
    pub action: DocAction,
}

/// Available document actions.
#[derive(Subcommand, Debug)]
pub enum DocAction {
    /// Create an empty document.
    New(DocNewArgs),

    /// List documents.
    List,

    /// Show a document's metadata and body.
    Show(DocShowArgs),

    /// List version snapshots of a document.
    Versions(DocVersionsArgs),
}

/// Arguments for the `doc new` command.
#[derive(Parser, Debug)]
pub struct DocNewArgs {
    /// Title for the new document.
    pub title: String,

    /// Initial HTML body.
    #[arg(long, default_value = "")]
    pub body: String,
}

/// Arguments for the `doc show` command.
#[derive(Parser, Debug)]
pub struct DocShowArgs {
    /// Document id (e.g., DOC-001).
    pub doc_id: String,
}

/// Arguments for the `doc versions` command.
#[derive(Parser, Debug)]
pub struct DocVersionsArgs {
    /// Document id (e.g., DOC-001).
    pub doc_id: String,
}

/// Alignment subcommands.
#[derive(Parser, Debug)]
pub struct AlignCommand {
    #[command(subcommand)]
    pub action: AlignAction,
}

/// Available alignment actions.
#[derive(Subcommand, Debug)]
pub enum AlignAction {
    /// Score a document (or selection) against a brand voice or persona.
    Run(AlignRunArgs),

    /// Show the stored alignment result.
    Show,

    /// Clear the stored alignment result.
    Clear,
}

/// Arguments for the `align run` command.
#[derive(Parser, Debug)]
pub struct AlignRunArgs {
    /// Document id to analyze.
    pub doc_id: String,

    /// Target: `brand` or `persona:<name>`.
    #[arg(long)]
    pub against: String,

    /// Character range FROM..TO to analyze (defaults to the whole body).
    #[arg(long)]
    pub range: Option<String>,
}

/// Optimize subcommands.
#[derive(Parser, Debug)]
pub struct OptimizeCommand {
    #[command(subcommand)]
    pub action: OptimizeAction,
}

/// Available optimize actions.
#[derive(Subcommand, Debug)]
pub enum OptimizeAction {
    /// Request a rewrite of the last analyzed text.
    Run,

    /// Show the pending rewrite next to the original.
    Show,

    /// Accept the pending rewrite into the document.
    ///
    /// Snapshots the document first (best effort), then splices the rewrite
    /// at the recorded range.
    Accept(OptimizeAcceptArgs),

    /// Reject the pending rewrite, leaving the document untouched.
    Reject,
}

/// Arguments for the `optimize accept` command.
#[derive(Parser, Debug)]
pub struct OptimizeAcceptArgs {
    /// Commit the contents of this file instead of the server rewrite.
    #[arg(long, value_name = "PATH")]
    pub edited_file: Option<PathBuf>,
}

/// Persona subcommands.
#[derive(Parser, Debug)]
pub struct PersonaCommand {
    #[command(subcommand)]
    pub action: PersonaAction,
}

/// Available persona actions.
#[derive(Subcommand, Debug)]
pub enum PersonaAction {
    /// Add a persona.
    Add(PersonaAddArgs),

    /// Update an existing persona (only the provided flags change).
    Update(PersonaUpdateArgs),

    /// List personas.
    List,

    /// Show a persona.
    Show(PersonaShowArgs),

    /// Remove a persona.
    Remove(PersonaRemoveArgs),
}

/// Arguments for the `persona add` command.
#[derive(Parser, Debug)]
pub struct PersonaAddArgs {
    /// Persona name.
    pub name: String,

    /// Photo reference (path or URL).
    #[arg(long)]
    pub photo: Option<String>,

    /// Demographics summary.
    #[arg(long)]
    pub demographics: Option<String>,

    /// Psychographics summary.
    #[arg(long)]
    pub psychographics: Option<String>,

    /// Pain points (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub pain_points: Vec<String>,

    /// Language patterns (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub language_patterns: Vec<String>,

    /// Goals (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub goals: Vec<String>,
}

/// Arguments for the `persona update` command.
#[derive(Parser, Debug)]
pub struct PersonaUpdateArgs {
    /// Persona name.
    pub name: String,

    /// Photo reference (path or URL).
    #[arg(long)]
    pub photo: Option<String>,

    /// Demographics summary.
    #[arg(long)]
    pub demographics: Option<String>,

    /// Psychographics summary.
    #[arg(long)]
    pub psychographics: Option<String>,

    /// Pain points (comma separated, replaces the list).
    #[arg(long, value_delimiter = ',')]
    pub pain_points: Option<Vec<String>>,

    /// Language patterns (comma separated, replaces the list).
    #[arg(long, value_delimiter = ',')]
    pub language_patterns: Option<Vec<String>>,

    /// Goals (comma separated, replaces the list).
    #[arg(long, value_delimiter = ',')]
    pub goals: Option<Vec<String>>,
}

/// Arguments for the `persona show` command.
#[derive(Parser, Debug)]
pub struct PersonaShowArgs {
    /// Persona name.
    pub name: String,
}

/// Arguments for the `persona remove` command.
#[derive(Parser, Debug)]
pub struct PersonaRemoveArgs {
    /// Persona name.
    pub name: String,
}

/// Brand voice subcommands.
#[derive(Parser, Debug)]
pub struct BrandVoiceCommand {
    #[command(subcommand)]
    pub action: BrandVoiceAction,
}

/// Available brand voice actions.
#[derive(Subcommand, Debug)]
pub enum BrandVoiceAction {
    /// Set (or replace) the workspace brand voice.
    Set(BrandVoiceSetArgs),

    /// Show the workspace brand voice.
    Show,

    /// Clear the workspace brand voice.
    Clear,
}

/// Arguments for the `brand-voice set` command.
#[derive(Parser, Debug)]
pub struct BrandVoiceSetArgs {
    /// Brand name.
    #[arg(long)]
    pub name: String,

    /// Tone description.
    #[arg(long)]
    pub tone: String,

    /// Approved phrases (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub approved_phrases: Vec<String>,

    /// Forbidden words (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub forbidden_words: Vec<String>,

    /// Brand values (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub values: Vec<String>,

    /// Mission statement.
    #[arg(long)]
    pub mission: Option<String>,
}

/// Snippet subcommands.
#[derive(Parser, Debug)]
pub struct SnippetCommand {
    #[command(subcommand)]
    pub action: SnippetAction,
}

/// Available snippet actions.
#[derive(Subcommand, Debug)]
pub enum SnippetAction {
    /// Save a snippet from literal text or a document range.
    Save(SnippetSaveArgs),

    /// List snippets.
    List,

    /// Insert a snippet into a document at a character offset.
    Insert(SnippetInsertArgs),
}

/// Arguments for the `snippet save` command.
#[derive(Parser, Debug)]
pub struct SnippetSaveArgs {
    /// Snippet name.
    pub name: String,

    /// Literal snippet content.
    #[arg(long, conflicts_with = "from_doc")]
    pub text: Option<String>,

    /// Copy content from this document.
    #[arg(long, value_name = "DOC_ID")]
    pub from_doc: Option<String>,

    /// Character range FROM..TO within the source document.
    #[arg(long, requires = "from_doc")]
    pub range: Option<String>,
}

/// Arguments for the `snippet insert` command.
#[derive(Parser, Debug)]
pub struct SnippetInsertArgs {
    /// Snippet name.
    pub name: String,

    /// Document to insert into.
    pub doc_id: String,

    /// Character offset to insert at (defaults to the end of the body).
    #[arg(long)]
    pub at: Option<usize>,
}

/// Lock subcommands.
#[derive(Parser, Debug)]
pub struct LockCommand {
    #[command(subcommand)]
    pub action: LockAction,
}

/// Available lock actions.
#[derive(Subcommand, Debug)]
pub enum LockAction {
    /// List active request locks.
    ///
    /// Shows each lock with its age and owner, marking stale ones.
    List,

    /// Clear a request lock.
    ///
    /// Requires --force to prevent accidental clearing.
    Clear(LockClearArgs),
}

/// Arguments for the `lock clear` command.
#[derive(Parser, Debug)]
pub struct LockClearArgs {
    /// Action whose lock should be cleared (generate, align, optimize).
    pub action: String,

    /// Force clearing the lock (required for safety).
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Show the last N events from the audit log (0 disables).
    #[arg(long, default_value_t = 5)]
    pub tail: usize,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
