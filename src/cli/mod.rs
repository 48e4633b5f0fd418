//! cli
//!
//! The standalone command-line front-end.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve [`Settings`] (standalone defaults, config file, flags)
//! - Build a [`GitModule`] and delegate to command handlers
//! - Map outcomes to exit codes: 0 on success, 1 on any error
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`crate::module`]. It never calls Git itself.

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::error::ErrorKind;
use clap::CommandFactory;

use crate::core::config::{HashStyle, Settings};
use crate::module::{metadata, GitModule, ModuleConfig, ModuleError, Verb};
use crate::ui::output::{self, Verbosity};

/// Program name used in usage hints.
pub const PROGRAM: &str = "memex-git";

/// Execution context for command handlers.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub verbosity: Verbosity,
    pub hash_style: HashStyle,
}

/// Run the CLI with already-parsed arguments.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    if cli.info {
        return commands::info();
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        bail!("command required");
    };

    let settings = Settings::resolve(
        Settings::standalone(),
        cli.config.as_deref(),
        &cli.overrides(),
    )?;

    let ctx = Context {
        verbosity: Verbosity::from_flags(cli.quiet),
        hash_style: settings.hash_style,
    };

    let mut module = GitModule::new(ModuleConfig::new(
        cli.repo.clone().unwrap_or_default(),
        settings,
    ));

    commands::dispatch(command, &mut module, &ctx)
}

/// Print a clap parse outcome and choose the exit code.
///
/// `--help` and `--version` succeed; everything else, including running
/// with no arguments at all, is a usage error.
pub fn exit_for_parse_error(err: clap::Error) -> ExitCode {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

/// Print an error from [`run`], with a usage hint where one helps.
pub fn report_error(err: &anyhow::Error) {
    output::error(err);
    if let Some(ModuleError::CommitMessageRequired) = err.downcast_ref::<ModuleError>() {
        eprintln!(
            "Usage: {}",
            metadata::descriptor(Verb::Commit).usage_with(PROGRAM)
        );
    }
}
