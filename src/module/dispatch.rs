//! module::dispatch
//!
//! The closed set of verbs and their argument checks.
//!
//! Parsing is separate from execution so that usage errors (such as a
//! missing commit message) are reported before the repository handle is
//! consulted, and without mutating anything.

use std::str::FromStr;

use super::ModuleError;

/// Default path for `add` when none is given: the repository root.
pub const DEFAULT_ADD_PATH: &str = ".";

/// A command name the dispatcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Init,
    Status,
    Add,
    Commit,
    Log,
}

impl Verb {
    /// All verbs, in help order.
    pub const ALL: [Verb; 5] = [Verb::Init, Verb::Status, Verb::Add, Verb::Commit, Verb::Log];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Init => "init",
            Verb::Status => "status",
            Verb::Add => "add",
            Verb::Commit => "commit",
            Verb::Log => "log",
        }
    }
}

impl FromStr for Verb {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str() == s)
            .ok_or_else(|| ModuleError::UnknownCommand(s.to_string()))
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A verb with its arguments checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Init,
    Status,
    Add { path: String },
    Commit { message: String },
    Log,
}

impl Invocation {
    /// Check `args` against what `verb` needs.
    ///
    /// Extra arguments are ignored. `add` defaults to the repository root.
    ///
    /// # Errors
    ///
    /// - [`ModuleError::UnknownCommand`] for a verb outside the closed set
    /// - [`ModuleError::CommitMessageRequired`] for `commit` without a
    ///   non-blank message
    pub fn parse(verb: &str, args: &[String]) -> Result<Self, ModuleError> {
        let verb: Verb = verb.parse()?;
        Ok(match verb {
            Verb::Init => Invocation::Init,
            Verb::Status => Invocation::Status,
            Verb::Add => Invocation::add(args.first().cloned()),
            Verb::Commit => Invocation::commit(args.first().cloned())?,
            Verb::Log => Invocation::Log,
        })
    }

    /// `add`, defaulting to the repository root.
    pub fn add(path: Option<String>) -> Self {
        Invocation::Add {
            path: path.unwrap_or_else(|| DEFAULT_ADD_PATH.to_string()),
        }
    }

    /// `commit`, requiring a non-blank message.
    pub fn commit(message: Option<String>) -> Result<Self, ModuleError> {
        match message {
            Some(message) if !message.trim().is_empty() => Ok(Invocation::Commit { message }),
            _ => Err(ModuleError::CommitMessageRequired),
        }
    }

    pub fn verb(&self) -> Verb {
        match self {
            Invocation::Init => Verb::Init,
            Invocation::Status => Verb::Status,
            Invocation::Add { .. } => Verb::Add,
            Invocation::Commit { .. } => Verb::Commit,
            Invocation::Log => Verb::Log,
        }
    }
}
