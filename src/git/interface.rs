//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! memex-git. It returns structured results and normalizes `git2` errors
//! into typed failure categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: No repository at the path
//! - [`GitError::UnbornHead`]: HEAD has no commits yet
//! - [`GitError::PathOutsideRepo`] / [`GitError::PathNotFound`] /
//!   [`GitError::PathIgnored`]: bad `add` target
//! - [`GitError::NothingToCommit`]: The index matches HEAD
//! - [`GitError::IdentityUnavailable`]: No `user.name`/`user.email` configured
//!
//! # Example
//!
//! ```ignore
//! use memex_git::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let report = git.status()?;
//! println!("{} changed paths", report.entries.len());
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Offset, Utc};
use thiserror::Error;
use tracing::debug;

use crate::core::config::CommitIdentity;
use crate::core::paths;
use crate::core::types::{Oid, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// No repository at the given path.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was opened
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// HEAD points at a branch with no commits.
    #[error("current branch has no commits yet")]
    UnbornHead,

    /// A path given to `add` lies outside the working directory.
    #[error("path is outside the repository: {path}")]
    PathOutsideRepo {
        /// The offending path as given
        path: PathBuf,
    },

    /// A path given to `add` matches nothing on disk or in the index.
    #[error("pathspec '{path}' did not match any files")]
    PathNotFound {
        /// The offending path as given
        path: PathBuf,
    },

    /// A path given to `add` is untracked and matched by an ignore rule.
    #[error("path is ignored: {path}")]
    PathIgnored {
        /// The offending path as given
        path: PathBuf,
    },

    /// The index has nothing that differs from HEAD.
    #[error("nothing to commit")]
    NothingToCommit,

    /// The repository's Git config has no usable identity.
    #[error("no commit identity configured: {message}")]
    IdentityUnavailable {
        /// Message from libgit2
        message: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::UnbornBranch => GitError::UnbornHead,
            git2::ErrorCode::NotFound => GitError::ObjectNotFound {
                oid: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::UnbornBranch => GitError::UnbornHead,
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        GitError::Internal {
            message: err.to_string(),
        }
    }
}

/// One column of a two-letter status code (`XY path`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Unmodified,
    Untracked,
    Modified,
    Added,
    Deleted,
    Renamed,
    TypeChanged,
    Conflicted,
}

impl StatusCode {
    /// The porcelain letter for this code.
    pub fn as_char(self) -> char {
        match self {
            StatusCode::Unmodified => ' ',
            StatusCode::Untracked => '?',
            StatusCode::Modified => 'M',
            StatusCode::Added => 'A',
            StatusCode::Deleted => 'D',
            StatusCode::Renamed => 'R',
            StatusCode::TypeChanged => 'T',
            StatusCode::Conflicted => 'U',
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Status of one path: staged (index) and unstaged (worktree) state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    /// Index vs HEAD
    pub staged: StatusCode,
    /// Worktree vs index
    pub unstaged: StatusCode,
}

impl FileStatus {
    fn from_flags(path: String, flags: git2::Status) -> Self {
        if flags.is_conflicted() {
            return Self {
                path,
                staged: StatusCode::Conflicted,
                unstaged: StatusCode::Conflicted,
            };
        }

        if flags.is_wt_new() {
            return Self {
                path,
                staged: StatusCode::Untracked,
                unstaged: StatusCode::Untracked,
            };
        }

        let staged = if flags.is_index_new() {
            StatusCode::Added
        } else if flags.is_index_modified() {
            StatusCode::Modified
        } else if flags.is_index_deleted() {
            StatusCode::Deleted
        } else if flags.is_index_renamed() {
            StatusCode::Renamed
        } else if flags.is_index_typechange() {
            StatusCode::TypeChanged
        } else {
            StatusCode::Unmodified
        };

        let unstaged = if flags.is_wt_modified() {
            StatusCode::Modified
        } else if flags.is_wt_deleted() {
            StatusCode::Deleted
        } else if flags.is_wt_renamed() {
            StatusCode::Renamed
        } else if flags.is_wt_typechange() {
            StatusCode::TypeChanged
        } else {
            StatusCode::Unmodified
        };

        Self {
            path,
            staged,
            unstaged,
        }
    }

    /// Whether this path has changes in the index.
    pub fn is_staged(&self) -> bool {
        !matches!(
            self.staged,
            StatusCode::Unmodified | StatusCode::Untracked | StatusCode::Conflicted
        )
    }
}

/// Working tree status of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Current branch, if HEAD is on one (born or unborn)
    pub branch: Option<String>,
    /// Changed paths, sorted by path
    pub entries: Vec<FileStatus>,
}

impl StatusReport {
    /// Check if there is nothing to report (untracked files count as changes).
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Information about a commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// The commit OID
    pub oid: Oid,
    /// First line of the commit message
    pub summary: String,
    /// Full commit message
    pub message: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp, in the author's own offset
    pub author_time: DateTime<FixedOffset>,
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. No other module
/// imports `git2`.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Creation and Opening
    // =========================================================================

    /// Create a repository at `path`, creating missing directories.
    ///
    /// Running this against an existing repository re-initializes it, as
    /// `git init` does.
    pub fn init(path: &Path) -> Result<Self, GitError> {
        debug!(path = %path.display(), "initializing repository");
        let repo =
            git2::Repository::init(path).map_err(|e| GitError::from_git2(e, "init"))?;
        Ok(Self { repo })
    }

    /// Open the repository rooted exactly at `path`.
    ///
    /// Unlike discovery, parent directories are not searched.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if there is no repository at `path`
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open(path).map_err(|e| {
            debug!(path = %path.display(), error = %e.message(), "open failed");
            GitError::NotARepo {
                path: path.to_path_buf(),
            }
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Path to the working directory.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    /// Path to the .git directory.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Name of the branch HEAD points at.
    ///
    /// Works for unborn branches too. Returns `None` for a detached HEAD.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        let head = self
            .repo
            .find_reference("HEAD")
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;

        Ok(head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(str::to_string))
    }

    // =========================================================================
    // Working Tree Status
    // =========================================================================

    /// Per-path status including untracked files, excluding ignored ones.
    pub fn status(&self) -> Result<StatusReport, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, "status"))?;

        let mut entries: Vec<FileStatus> = statuses
            .iter()
            .filter(|entry| entry.status() != git2::Status::CURRENT)
            .map(|entry| {
                let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                FileStatus::from_flags(path, entry.status())
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        debug!(
            entries = entries.len(),
            staged = entries.iter().filter(|e| e.is_staged()).count(),
            "status collected"
        );

        Ok(StatusReport {
            branch: self.current_branch()?,
            entries,
        })
    }

    // =========================================================================
    // Staging
    // =========================================================================

    /// Stage `path` (a file or directory) including deletions.
    ///
    /// `path` may be relative to the working directory or absolute inside
    /// it, also through a symlinked parent. An empty path or `.` stages the
    /// whole tree. Any other path is taken literally, never as a glob.
    ///
    /// # Errors
    ///
    /// - [`GitError::PathOutsideRepo`] if `path` escapes the working directory
    /// - [`GitError::PathNotFound`] if `path` is neither on disk nor tracked
    /// - [`GitError::PathIgnored`] if `path` is untracked and ignored
    pub fn stage(&self, path: &Path) -> Result<(), GitError> {
        let work_dir = paths::canonicalize_existing(self.work_dir()?);
        let target = Self::resolve_target(&work_dir, path);
        let relative =
            paths::relative_to(&work_dir, &target).ok_or_else(|| GitError::PathOutsideRepo {
                path: path.to_path_buf(),
            })?;

        if relative.starts_with(".git") {
            return Err(GitError::PathOutsideRepo {
                path: path.to_path_buf(),
            });
        }

        let mut index = self.repo.index()?;

        if relative.as_os_str().is_empty() {
            debug!("staging whole tree");
            index
                .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
                .map_err(|e| GitError::from_git2(e, "add"))?;
            index
                .update_all(["*"], None)
                .map_err(|e| GitError::from_git2(e, "add"))?;
            index.write()?;
            return Ok(());
        }

        let pathspec = relative.to_string_lossy().replace('\\', "/");
        let on_disk = work_dir.join(&relative).symlink_metadata().is_ok();
        let tracked = Self::tracked_under(&index, &pathspec);

        if !on_disk && tracked.is_empty() {
            return Err(GitError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if on_disk && tracked.is_empty() && self.repo.is_path_ignored(&relative)? {
            return Err(GitError::PathIgnored {
                path: path.to_path_buf(),
            });
        }

        debug!(pathspec = %pathspec, tracked = tracked.len(), "staging");

        if on_disk {
            index
                .add_all(
                    [pathspec.as_str()],
                    git2::IndexAddOption::DISABLE_PATHSPEC_MATCH,
                    None,
                )
                .map_err(|e| GitError::from_git2(e, "add"))?;
        }
        for entry in &tracked {
            if work_dir.join(entry).symlink_metadata().is_err() {
                index
                    .remove_path(Path::new(entry))
                    .map_err(|e| GitError::from_git2(e, "add"))?;
            }
        }
        index.write()?;

        Ok(())
    }

    /// Absolute form of an `add` argument with symlinked parents resolved.
    ///
    /// The final component is kept as named so a symlink inside the tree is
    /// staged as itself, unless the whole path resolves to the work dir.
    fn resolve_target(work_dir: &Path, path: &Path) -> PathBuf {
        let lexical = paths::normalize(&work_dir.join(path));
        let resolved = paths::canonicalize_existing(&lexical);
        if resolved == work_dir {
            return resolved;
        }
        match (lexical.parent(), lexical.file_name()) {
            (Some(parent), Some(name)) => paths::canonicalize_existing(parent).join(name),
            _ => resolved,
        }
    }

    /// Index entries equal to `pathspec` or under it as a directory.
    fn tracked_under(index: &git2::Index, pathspec: &str) -> Vec<String> {
        let dir_prefix = format!("{}/", pathspec.trim_end_matches('/'));
        index
            .iter()
            .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
            .filter(|entry_path| entry_path == pathspec || entry_path.starts_with(&dir_prefix))
            .collect()
    }

    // =========================================================================
    // Committing
    // =========================================================================

    /// Commit the index onto HEAD.
    ///
    /// Author and committer are both taken from `identity`.
    ///
    /// # Errors
    ///
    /// - [`GitError::IdentityUnavailable`] for [`CommitIdentity::LibraryDefault`]
    ///   without `user.name`/`user.email`
    /// - [`GitError::NothingToCommit`] if the index tree equals HEAD's tree,
    ///   or the index is empty on an unborn branch
    pub fn commit(&self, message: &str, identity: &CommitIdentity) -> Result<Oid, GitError> {
        let signature = match identity {
            CommitIdentity::Fixed { name, email } => git2::Signature::now(name, email)
                .map_err(|e| GitError::IdentityUnavailable {
                    message: e.message().to_string(),
                })?,
            CommitIdentity::LibraryDefault => {
                self.repo
                    .signature()
                    .map_err(|e| GitError::IdentityUnavailable {
                        message: e.message().to_string(),
                    })?
            }
        };

        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(
                head.peel_to_commit()
                    .map_err(|e| GitError::from_git2(e, "HEAD"))?,
            ),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                None
            }
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };

        let unchanged = match &parent {
            Some(p) => p.tree_id() == tree_id,
            None => index.is_empty(),
        };
        if unchanged {
            return Err(GitError::NothingToCommit);
        }

        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .map_err(|e| GitError::from_git2(e, "commit"))?;

        debug!(oid = %oid, parents = parents.len(), "created commit");
        Ok(Oid::new(oid.to_string())?)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Commits reachable from HEAD, newest first.
    ///
    /// # Errors
    ///
    /// - [`GitError::UnbornHead`] if HEAD has no commits
    pub fn log(&self) -> Result<Vec<CommitInfo>, GitError> {
        match self.repo.head() {
            Ok(_) => {}
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                return Err(GitError::UnbornHead)
            }
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        }

        let mut walk = self.repo.revwalk()?;
        walk.push_head()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;

        let mut commits = Vec::new();
        for id in walk {
            let id = id?;
            let commit = self
                .repo
                .find_commit(id)
                .map_err(|e| GitError::from_git2(e, &id.to_string()))?;
            commits.push(Self::commit_info(&commit)?);
        }

        debug!(count = commits.len(), "walked history");
        Ok(commits)
    }

    fn commit_info(commit: &git2::Commit<'_>) -> Result<CommitInfo, GitError> {
        let author = commit.author();
        let when = author.when();
        let offset = FixedOffset::east_opt(when.offset_minutes() * 60)
            .unwrap_or_else(|| Utc.fix());
        let author_time = DateTime::from_timestamp(when.seconds(), 0)
            .unwrap_or(DateTime::UNIX_EPOCH)
            .with_timezone(&offset);

        Ok(CommitInfo {
            oid: Oid::new(commit.id().to_string())?,
            summary: commit.summary().unwrap_or("").to_string(),
            message: commit.message().unwrap_or("").to_string(),
            author_name: author.name().unwrap_or("").to_string(),
            author_email: author.email().unwrap_or("").to_string(),
            author_time,
        })
    }
}
