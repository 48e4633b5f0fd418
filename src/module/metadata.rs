//! module::metadata
//!
//! Static identity of the git module and its command descriptors.
//!
//! These values are constants for the life of the process: the plugin
//! protocol answers `id`, `name`, and `describe` from them without touching
//! the repository.

use serde::{Deserialize, Serialize};

use super::dispatch::Verb;

/// Module identifier.
pub const ID: &str = "git";

/// Human-readable module name.
pub const NAME: &str = "Git Management";

/// One-line module description.
pub const DESCRIPTION: &str = "Manages Git version control within memex repositories";

/// Module version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Describes one supported command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    /// Verb as typed by the user
    pub name: &'static str,
    /// What the command does
    pub description: &'static str,
    /// Argument synopsis, without the program name
    pub usage: &'static str,
}

impl CommandDescriptor {
    /// Full usage line under the given program name.
    ///
    /// ```
    /// use memex_git::module::metadata::COMMANDS;
    ///
    /// assert_eq!(COMMANDS[3].usage_with("memex-git"), "memex-git commit <message>");
    /// ```
    pub fn usage_with(&self, program: &str) -> String {
        format!("{} {}", program, self.usage)
    }
}

/// Every command the module supports, in help order.
pub const COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "init",
        description: "Initialize a new Git repository",
        usage: "init",
    },
    CommandDescriptor {
        name: "status",
        description: "Show working tree status",
        usage: "status",
    },
    CommandDescriptor {
        name: "add",
        description: "Add files to the index (default: repository root)",
        usage: "add [path]",
    },
    CommandDescriptor {
        name: "commit",
        description: "Commit staged changes with a message",
        usage: "commit <message>",
    },
    CommandDescriptor {
        name: "log",
        description: "Show commit history",
        usage: "log",
    },
];

/// Look up the descriptor for a verb.
pub fn descriptor(verb: Verb) -> &'static CommandDescriptor {
    match verb {
        Verb::Init => &COMMANDS[0],
        Verb::Status => &COMMANDS[1],
        Verb::Add => &COMMANDS[2],
        Verb::Commit => &COMMANDS[3],
        Verb::Log => &COMMANDS[4],
    }
}

/// Module metadata as printed by `memex-git --info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
}

impl ModuleInfo {
    /// Metadata of this build.
    pub fn current() -> Self {
        Self {
            id: ID.to_string(),
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            version: VERSION.to_string(),
        }
    }
}
