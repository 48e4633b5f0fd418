//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Turns clap arguments into a checked [`Invocation`]
//! 2. Runs it on the [`GitModule`]
//! 3. Renders and prints the result
//!
//! Handlers do NOT call Git directly.

use anyhow::Result;

use super::args::Command;
use super::Context;
use crate::module::metadata::ModuleInfo;
use crate::module::{GitModule, Invocation};
use crate::ui::output;

/// Dispatch a command to the module and print what it produced.
pub fn dispatch(command: Command, module: &mut GitModule, ctx: &Context) -> Result<()> {
    let invocation = match command {
        Command::Init { .. } => Invocation::Init,
        Command::Status { .. } => Invocation::Status,
        Command::Add { path, .. } => Invocation::add(path),
        Command::Commit { message, .. } => Invocation::commit(message)?,
        Command::Log { .. } => Invocation::Log,
    };

    let result = module.execute(invocation)?;
    let text = output::render(&result, ctx.hash_style);

    if result.is_confirmation() {
        output::success(text, ctx.verbosity);
    } else {
        output::print(text);
    }

    Ok(())
}

/// Print module metadata as a single JSON object.
pub fn info() -> Result<()> {
    let json = serde_json::to_string(&ModuleInfo::current())?;
    output::print(json);
    Ok(())
}
