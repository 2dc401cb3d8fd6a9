//! Command implementations for copydesk.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Commands are thin orchestration over the library
//! modules: catalog, form, prompt, client, document, session, and events.

mod align_cmd;
mod brand_voice;
mod doc;
mod generate;
mod init;
mod lock;
mod optimize_cmd;
mod persona;
mod snippet_cmd;
mod status;
mod templates;

use crate::cli::{
    AlignAction, BrandVoiceAction, Command, DocAction, LockAction, OptimizeAction, PersonaAction,
    SnippetAction, TemplatesAction,
};
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Init(args) => init::cmd_init(args),
        Command::Templates(cmd) => match cmd.action {
            TemplatesAction::List(args) => templates::cmd_list(args),
            TemplatesAction::Show(args) => templates::cmd_show(args),
        },
        Command::Generate(args) => generate::cmd_generate(args),
        Command::Doc(cmd) => match cmd.action {
            DocAction::New(args) => doc::cmd_new(args),
            DocAction::List => doc::cmd_list(),
            DocAction::Show(args) => doc::cmd_show(args),
            DocAction::Versions(args) => doc::cmd_versions(args),
        },
        Command::Align(cmd) => match cmd.action {
            AlignAction::Run(args) => align_cmd::cmd_run(args),
            AlignAction::Show => align_cmd::cmd_show(),
            AlignAction::Clear => align_cmd::cmd_clear(),
        },
        Command::Optimize(cmd) => match cmd.action {
            OptimizeAction::Run => optimize_cmd::cmd_run(),
            OptimizeAction::Show => optimize_cmd::cmd_show(),
            OptimizeAction::Accept(args) => optimize_cmd::cmd_accept(args),
            OptimizeAction::Reject => optimize_cmd::cmd_reject(),
        },
        Command::Persona(cmd) => match cmd.action {
            PersonaAction::Add(args) => persona::cmd_add(args),
            PersonaAction::Update(args) => persona::cmd_update(args),
            PersonaAction::List => persona::cmd_list(),
            PersonaAction::Show(args) => persona::cmd_show(args),
            PersonaAction::Remove(args) => persona::cmd_remove(args),
        },
        Command::BrandVoice(cmd) => match cmd.action {
            BrandVoiceAction::Set(args) => brand_voice::cmd_set(args),
            BrandVoiceAction::Show => brand_voice::cmd_show(),
            BrandVoiceAction::Clear => brand_voice::cmd_clear(),
        },
        Command::Snippet(cmd) => match cmd.action {
            SnippetAction::Save(args) => snippet_cmd::cmd_save(args),
            SnippetAction::List => snippet_cmd::cmd_list(),
            SnippetAction::Insert(args) => snippet_cmd::cmd_insert(args),
        },
        Command::Lock(cmd) => match cmd.action {
            LockAction::List => lock::cmd_list(),
            LockAction::Clear(args) => lock::cmd_clear(args),
        },
        Command::Status(args) => status::cmd_status(args),
    }
}
