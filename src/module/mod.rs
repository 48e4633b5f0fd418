//! module
//!
//! The git module: one repository handle plus the commands that act on it.
//!
//! # Lifecycle
//!
//! A [`GitModule`] resolves its repository path once, at construction, and
//! then tries to open an existing repository there. Failure to open is not
//! an error; the handle simply stays absent until `init` creates one.
//!
//! ```text
//! Unopened --init--> Open
//! Unopened --open at construction--> Open
//! ```
//!
//! Every command except `init` needs an open handle and reports
//! [`ModuleError::NotInitialized`] otherwise.
//!
//! # Front-ends
//!
//! The module knows nothing about argv, environment variables, or output
//! streams. [`crate::cli`] and [`crate::plugin`] build a [`ModuleConfig`],
//! call [`GitModule::handle_command`] or [`GitModule::execute`], and render
//! the returned [`CommandOutput`] with [`crate::ui::output`].

pub mod dispatch;
pub mod metadata;

pub use dispatch::{Invocation, Verb};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::Settings;
use crate::core::paths::resolve_repo_path;
use crate::core::types::Oid;
use crate::git::{CommitInfo, Git, GitError, StatusReport};

/// Errors reported by module commands.
///
/// None of these are fatal to the process; front-ends print them and exit
/// non-zero.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// A command that needs a repository ran before one was opened.
    #[error("git repository not initialized")]
    NotInitialized,

    /// `commit` without a message.
    #[error("commit message required")]
    CommitMessageRequired,

    /// A verb outside the supported set.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The Git library call itself failed.
    #[error("{context}: {error}")]
    Delegate {
        /// Which operation failed
        context: &'static str,
        /// What the library reported
        error: GitError,
    },
}

impl ModuleError {
    fn delegate(context: &'static str) -> impl FnOnce(GitError) -> ModuleError {
        move |error| ModuleError::Delegate { context, error }
    }
}

/// Everything needed to construct a [`GitModule`].
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    /// Raw repository path; empty means the current directory
    pub repo_path: String,
    /// Behavioral settings for this front-end
    pub settings: Settings,
}

impl ModuleConfig {
    pub fn new(repo_path: impl Into<String>, settings: Settings) -> Self {
        Self {
            repo_path: repo_path.into(),
            settings,
        }
    }
}

/// What a command produced.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// A repository was created (or re-initialized).
    Initialized { git_dir: PathBuf },
    /// Working tree status.
    Status(StatusReport),
    /// A path was staged.
    Added { path: String },
    /// A commit was created.
    Committed { oid: Oid, message: String },
    /// History from HEAD, newest first.
    Log(Vec<CommitInfo>),
}

impl CommandOutput {
    /// Whether this output only confirms a mutation (and may be silenced).
    pub fn is_confirmation(&self) -> bool {
        matches!(
            self,
            CommandOutput::Initialized { .. }
                | CommandOutput::Added { .. }
                | CommandOutput::Committed { .. }
        )
    }
}

/// Git repository management for one repository path.
#[derive(Debug)]
pub struct GitModule {
    repo_path: PathBuf,
    settings: Settings,
    git: Option<Git>,
}

impl GitModule {
    /// Resolve the path and try to open an existing repository there.
    pub fn new(config: ModuleConfig) -> Self {
        let repo_path = resolve_repo_path(&config.repo_path);

        let git = match Git::open(&repo_path) {
            Ok(git) => {
                debug!(path = %repo_path.display(), "opened existing repository");
                Some(git)
            }
            Err(e) => {
                debug!(path = %repo_path.display(), error = %e, "no repository opened");
                None
            }
        };

        Self {
            repo_path,
            settings: config.settings,
            git,
        }
    }

    /// The absolute repository path.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a repository handle is present.
    pub fn is_open(&self) -> bool {
        self.git.is_some()
    }

    fn require_git(&self) -> Result<&Git, ModuleError> {
        self.git.as_ref().ok_or(ModuleError::NotInitialized)
    }

    /// Parse and run a verb with string arguments.
    ///
    /// Argument checks happen before the handle is consulted, so
    /// `commit` without a message fails the same way in every state.
    pub fn handle_command(
        &mut self,
        verb: &str,
        args: &[String],
    ) -> Result<CommandOutput, ModuleError> {
        let invocation = Invocation::parse(verb, args)?;
        self.execute(invocation)
    }

    /// Run an already-checked invocation.
    pub fn execute(&mut self, invocation: Invocation) -> Result<CommandOutput, ModuleError> {
        debug!(verb = %invocation.verb(), "executing");
        match invocation {
            Invocation::Init => self.init().map(|git_dir| CommandOutput::Initialized { git_dir }),
            Invocation::Status => self.status().map(CommandOutput::Status),
            Invocation::Add { path } => {
                self.add(&path)?;
                Ok(CommandOutput::Added { path })
            }
            Invocation::Commit { message } => {
                let oid = self.commit(&message)?;
                Ok(CommandOutput::Committed { oid, message })
            }
            Invocation::Log => self.log().map(CommandOutput::Log),
        }
    }

    /// Create a repository at the module's path and hold it open.
    ///
    /// Returns the `.git` directory. Re-running on an existing repository
    /// re-initializes it.
    pub fn init(&mut self) -> Result<PathBuf, ModuleError> {
        let git = Git::init(&self.repo_path)
            .map_err(ModuleError::delegate("initializing git repository"))?;
        let git_dir = git.git_dir().to_path_buf();
        info!(path = %self.repo_path.display(), "initialized repository");
        self.git = Some(git);
        Ok(git_dir)
    }

    /// Per-path staged/unstaged state.
    pub fn status(&self) -> Result<StatusReport, ModuleError> {
        self.require_git()?
            .status()
            .map_err(ModuleError::delegate("getting status"))
    }

    /// Stage `path`, relative to the repository root.
    pub fn add(&self, path: &str) -> Result<(), ModuleError> {
        let git = self.require_git()?;
        git.stage(Path::new(path))
            .map_err(ModuleError::delegate("adding files"))?;
        info!(path, "staged");
        Ok(())
    }

    /// Commit the index with the configured identity.
    pub fn commit(&self, message: &str) -> Result<Oid, ModuleError> {
        let git = self.require_git()?;
        let oid = git
            .commit(message, &self.settings.identity)
            .map_err(ModuleError::delegate("creating commit"))?;
        info!(oid = %oid, "committed");
        Ok(oid)
    }

    /// History from HEAD, newest first.
    pub fn log(&self) -> Result<Vec<CommitInfo>, ModuleError> {
        let git = self.require_git()?;
        git.log().map_err(|e| match e {
            GitError::UnbornHead => ModuleError::delegate("reading HEAD")(e),
            other => ModuleError::delegate("walking history")(other),
        })
    }
}
