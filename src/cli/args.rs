//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--repo <path>`: Repository location (`$MEMEX_REPO_PATH`)
//! - `--config <file>`: Settings file (`$MEMEX_GIT_CONFIG`)
//! - `--hash <full|short>`: How `log` prints hashes
//! - `--author-name` / `--author-email`: Commit identity
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Suppress confirmation messages

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::{HashStyle, Overrides, CONFIG_ENV};

/// Environment variable holding the repository path.
pub const REPO_PATH_ENV: &str = "MEMEX_REPO_PATH";

const AFTER_HELP: &str = "\
ENVIRONMENT VARIABLES:
    MEMEX_REPO_PATH     Path to the repository (default: current directory)
    MEMEX_GIT_CONFIG    Settings file for commit identity and log format
    RUST_LOG            Log filter, e.g. memex_git=debug

EXAMPLES:
    memex-git init
    memex-git add notes/
    memex-git commit \"Add reading notes\"
    memex-git log";

/// memex-git - Git version control integration for memex
#[derive(Parser, Debug)]
#[command(name = "memex-git")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true, after_help = AFTER_HELP)]
pub struct Cli {
    /// Path to the repository
    #[arg(long, global = true, env = REPO_PATH_ENV, value_name = "PATH")]
    pub repo: Option<String>,

    /// Settings file (commit identity, hash style)
    #[arg(long, global = true, env = CONFIG_ENV, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How `log` prints commit hashes
    #[arg(long, global = true, value_enum, value_name = "STYLE")]
    pub hash: Option<HashArg>,

    /// Author name for new commits
    #[arg(long, global = true, value_name = "NAME")]
    pub author_name: Option<String>,

    /// Author email for new commits
    #[arg(long, global = true, value_name = "EMAIL")]
    pub author_email: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress confirmation messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show module metadata (JSON)
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Settings given on the command line.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            author_name: self.author_name.clone(),
            author_email: self.author_email.clone(),
            hash: self.hash.map(Into::into),
        }
    }
}

/// Available commands.
///
/// Each takes the same arguments as over the plugin protocol: missing ones
/// are reported by the dispatcher, extra ones are ignored.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize a new Git repository
    Init {
        #[command(flatten)]
        rest: Ignored,
    },

    /// Show working tree status
    Status {
        #[command(flatten)]
        rest: Ignored,
    },

    /// Add files to the index (default: repository root)
    Add {
        /// File or directory to stage
        #[arg(allow_hyphen_values = true)]
        path: Option<String>,

        #[command(flatten)]
        rest: Ignored,
    },

    /// Commit staged changes with a message
    Commit {
        /// Commit message
        #[arg(allow_hyphen_values = true)]
        message: Option<String>,

        #[command(flatten)]
        rest: Ignored,
    },

    /// Show commit history
    Log {
        #[command(flatten)]
        rest: Ignored,
    },
}

/// Trailing arguments accepted and dropped.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct Ignored {
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// Hash style for `--hash`
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashArg {
    /// Full object id
    Full,
    /// First seven characters
    Short,
}

impl From<HashArg> for HashStyle {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Full => HashStyle::Full,
            HashArg::Short => HashStyle::Short,
        }
    }
}
